use super::interface::{Model, ModelError, ModelFamily};
use crate::core::descriptors::DescriptorSet;
use std::fmt;

pub const DEFAULT_RADIUS: u8 = 2;
pub const DEFAULT_HASHED_BITS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexScope {
    /// Fragments of active molecules only.
    Active,
    /// Fragments of active and inactive molecules, weighted against each other.
    ActiveInactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexModel {
    name: String,
    scope: IndexScope,
}

impl IndexModel {
    pub fn new(name: impl Into<String>, scope: IndexScope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    pub fn scope(&self) -> IndexScope {
        self.scope
    }
}

impl Model for IndexModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Index
    }

    fn summary(&self) -> String {
        match self.scope {
            IndexScope::Active => "fragment index built from active molecules".to_string(),
            IndexScope::ActiveInactive => {
                "fragment index contrasting active and inactive molecules".to_string()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DescriptorModel {
    name: String,
    descriptors: DescriptorSet,
}

impl DescriptorModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_descriptors(name, DescriptorSet::all())
    }

    pub fn with_descriptors(name: impl Into<String>, descriptors: DescriptorSet) -> Self {
        Self {
            name: name.into(),
            descriptors,
        }
    }

    pub fn descriptors(&self) -> &DescriptorSet {
        &self.descriptors
    }
}

impl Model for DescriptorModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Descriptor
    }

    fn summary(&self) -> String {
        format!(
            "descriptor similarity over {} descriptors ({})",
            self.descriptors.len(),
            self.descriptors.names().collect::<Vec<_>>().join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintKind {
    Ecfp,
    Fcfp,
    TopologicalTorsion,
    AtomPair,
}

impl FingerprintKind {
    /// Circular fingerprints are parameterised by a radius.
    pub fn is_circular(self) -> bool {
        matches!(self, FingerprintKind::Ecfp | FingerprintKind::Fcfp)
    }
}

impl fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FingerprintKind::Ecfp => "ECFP",
            FingerprintKind::Fcfp => "FCFP",
            FingerprintKind::TopologicalTorsion => "topological torsion",
            FingerprintKind::AtomPair => "atom pair",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Sparse feature identifiers as emitted by the toolkit.
    Native,
    /// Features folded into a fixed-width bit vector.
    Hashed { bits: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintModel {
    name: String,
    kind: FingerprintKind,
    radius: Option<u8>,
    encoding: Encoding,
}

impl FingerprintModel {
    pub fn native(name: impl Into<String>, kind: FingerprintKind) -> Self {
        Self {
            name: name.into(),
            kind,
            radius: kind.is_circular().then_some(DEFAULT_RADIUS),
            encoding: Encoding::Native,
        }
    }

    pub fn hashed(
        name: impl Into<String>,
        kind: FingerprintKind,
        bits: u32,
    ) -> Result<Self, ModelError> {
        let mut model = Self::native(name, kind);
        if bits == 0 {
            return Err(model.invalid("hashed fingerprints need at least one bit"));
        }
        model.encoding = Encoding::Hashed { bits };
        Ok(model)
    }

    pub fn with_radius(mut self, radius: u8) -> Result<Self, ModelError> {
        if !self.kind.is_circular() {
            return Err(self.invalid(&format!("{} fingerprints have no radius", self.kind)));
        }
        self.radius = Some(radius);
        Ok(self)
    }

    pub fn kind(&self) -> FingerprintKind {
        self.kind
    }

    pub fn radius(&self) -> Option<u8> {
        self.radius
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn invalid(&self, reason: &str) -> ModelError {
        ModelError::Configuration {
            model: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Model for FingerprintModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Fingerprint
    }

    fn summary(&self) -> String {
        let mut text = format!("{} fingerprint", self.kind);
        if let Some(radius) = self.radius {
            text.push_str(&format!(", radius {radius}"));
        }
        match self.encoding {
            Encoding::Native => text.push_str(", native features"),
            Encoding::Hashed { bits } => text.push_str(&format!(", hashed to {bits} bits")),
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regressor {
    Linear,
    DecisionTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionModel {
    name: String,
    regressor: Regressor,
}

impl RegressionModel {
    pub fn new(name: impl Into<String>, regressor: Regressor) -> Self {
        Self {
            name: name.into(),
            regressor,
        }
    }

    pub fn regressor(&self) -> Regressor {
        self.regressor
    }
}

impl Model for RegressionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Regression
    }

    fn summary(&self) -> String {
        match self.regressor {
            Regressor::Linear => "linear regression over fragment descriptors".to_string(),
            Regressor::DecisionTree => "decision tree regression over fragment descriptors".to_string(),
        }
    }
}

/// Models with no tunable configuration, distinguished only by family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceModel {
    name: String,
    family: ModelFamily,
}

impl ReferenceModel {
    pub fn control(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: ModelFamily::Control,
        }
    }

    pub fn baseline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: ModelFamily::Baseline,
        }
    }

    pub fn equivalent_class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: ModelFamily::EquivalentClass,
        }
    }
}

impl Model for ReferenceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        self.family
    }

    fn summary(&self) -> String {
        match self.family {
            ModelFamily::Control => "control scoring with no learned signal".to_string(),
            ModelFamily::Baseline => "baseline similarity to the nearest active molecule".to_string(),
            ModelFamily::EquivalentClass => {
                "fragments grouped into equivalence classes before scoring".to_string()
            }
            other => format!("{other} model"),
        }
    }
}

/// Scores pairs of circular fingerprint features rather than single features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintPairModel {
    name: String,
    kind: FingerprintKind,
    radius: u8,
}

impl FingerprintPairModel {
    pub fn new(name: impl Into<String>, kind: FingerprintKind, radius: u8) -> Self {
        Self {
            name: name.into(),
            kind,
            radius,
        }
    }
}

impl Model for FingerprintPairModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::FingerprintPair
    }

    fn summary(&self) -> String {
        format!("{} feature pairs, radius {}", self.kind, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_circular_fingerprints_get_default_radius() {
        let ecfp = FingerprintModel::native("rdkit_ecfp", FingerprintKind::Ecfp);
        assert_eq!(ecfp.radius(), Some(DEFAULT_RADIUS));
        assert_eq!(ecfp.encoding(), Encoding::Native);
        let tt = FingerprintModel::native("rdkit_tt", FingerprintKind::TopologicalTorsion);
        assert_eq!(tt.radius(), None);
    }

    #[test]
    fn hashed_fingerprints_reject_zero_width() {
        let err = FingerprintModel::hashed("nbit_ap", FingerprintKind::AtomPair, 0).unwrap_err();
        assert!(matches!(err, ModelError::Configuration { ref model, .. } if model == "nbit_ap"));
    }

    #[test]
    fn radius_applies_only_to_circular_kinds() {
        let ok = FingerprintModel::hashed("nbit_fcfp2", FingerprintKind::Fcfp, 1024)
            .unwrap()
            .with_radius(1)
            .unwrap();
        assert_eq!(ok.radius(), Some(1));
        assert!(
            FingerprintModel::native("rdkit_ap", FingerprintKind::AtomPair)
                .with_radius(1)
                .is_err()
        );
    }

    #[test]
    fn summaries_describe_configuration() {
        let model = FingerprintModel::hashed("nbit_ecfp", FingerprintKind::Ecfp, 2048).unwrap();
        assert_eq!(model.summary(), "ECFP fingerprint, radius 2, hashed to 2048 bits");
        let descriptors = DescriptorModel::with_descriptors(
            "descriptors",
            DescriptorSet::select(&["MolWt", "RingCount"]).unwrap(),
        );
        assert_eq!(
            descriptors.summary(),
            "descriptor similarity over 2 descriptors (MolWt, RingCount)"
        );
    }

    #[test]
    fn reference_models_report_their_family() {
        assert_eq!(ReferenceModel::control("control").family(), ModelFamily::Control);
        assert_eq!(ReferenceModel::baseline("baseline").family(), ModelFamily::Baseline);
        assert_eq!(
            ReferenceModel::equivalent_class("equivalent_class").family(),
            ModelFamily::EquivalentClass
        );
    }
}
