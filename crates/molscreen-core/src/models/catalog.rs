//! The discovery table of built-in models.
//!
//! Names are kept exactly as existing pipeline configuration files spell them,
//! including `rdkt_fcfp`. The `*2` hashed variants are the radius-1 (ECFP2 /
//! FCFP2) counterparts of their unsuffixed siblings.

use super::families::{
    DEFAULT_HASHED_BITS, DEFAULT_RADIUS, DescriptorModel, FingerprintKind, FingerprintModel,
    FingerprintPairModel, IndexModel, IndexScope, ReferenceModel, RegressionModel, Regressor,
};
use super::interface::{Model, ModelError};

pub type BuiltinConstructor = fn() -> Result<Box<dyn Model>, ModelError>;

macro_rules! boxed {
    ($model:expr) => {
        Ok(Box::new($model) as Box<dyn Model>)
    };
}

pub static BUILTIN_MODELS: &[(&str, BuiltinConstructor)] = &[
    ("active_index", || {
        boxed!(IndexModel::new("active_index", IndexScope::Active))
    }),
    ("descriptors", || boxed!(DescriptorModel::new("descriptors"))),
    ("rdkit_ecfp", || {
        boxed!(FingerprintModel::native("rdkit_ecfp", FingerprintKind::Ecfp))
    }),
    ("rdkt_fcfp", || {
        boxed!(FingerprintModel::native("rdkt_fcfp", FingerprintKind::Fcfp))
    }),
    ("rdkit_tt", || {
        boxed!(FingerprintModel::native(
            "rdkit_tt",
            FingerprintKind::TopologicalTorsion
        ))
    }),
    ("rdkit_ap", || {
        boxed!(FingerprintModel::native("rdkit_ap", FingerprintKind::AtomPair))
    }),
    ("control", || boxed!(ReferenceModel::control("control"))),
    ("active_inactive_index", || {
        boxed!(IndexModel::new(
            "active_inactive_index",
            IndexScope::ActiveInactive
        ))
    }),
    ("linear_regression", || {
        boxed!(RegressionModel::new("linear_regression", Regressor::Linear))
    }),
    ("decision_tree", || {
        boxed!(RegressionModel::new("decision_tree", Regressor::DecisionTree))
    }),
    ("nbit_ecfp", || {
        boxed!(FingerprintModel::hashed(
            "nbit_ecfp",
            FingerprintKind::Ecfp,
            DEFAULT_HASHED_BITS
        )?)
    }),
    ("nbit_fcfp", || {
        boxed!(FingerprintModel::hashed(
            "nbit_fcfp",
            FingerprintKind::Fcfp,
            DEFAULT_HASHED_BITS
        )?)
    }),
    ("nbit_ap", || {
        boxed!(FingerprintModel::hashed(
            "nbit_ap",
            FingerprintKind::AtomPair,
            DEFAULT_HASHED_BITS
        )?)
    }),
    ("nbit_ecfp2", || {
        boxed!(
            FingerprintModel::hashed("nbit_ecfp2", FingerprintKind::Ecfp, DEFAULT_HASHED_BITS)?
                .with_radius(1)?
        )
    }),
    ("nbit_fcfp2", || {
        boxed!(
            FingerprintModel::hashed("nbit_fcfp2", FingerprintKind::Fcfp, DEFAULT_HASHED_BITS)?
                .with_radius(1)?
        )
    }),
    ("nbit_tt", || {
        boxed!(FingerprintModel::hashed(
            "nbit_tt",
            FingerprintKind::TopologicalTorsion,
            DEFAULT_HASHED_BITS
        )?)
    }),
    ("equivalent_class", || {
        boxed!(ReferenceModel::equivalent_class("equivalent_class"))
    }),
    ("baseline", || boxed!(ReferenceModel::baseline("baseline"))),
    ("ecfp_pair", || {
        boxed!(FingerprintPairModel::new(
            "ecfp_pair",
            FingerprintKind::Ecfp,
            DEFAULT_RADIUS
        ))
    }),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_names_are_unique() {
        let names: HashSet<_> = BUILTIN_MODELS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), BUILTIN_MODELS.len());
        assert_eq!(BUILTIN_MODELS.len(), 19);
    }

    #[test]
    fn every_constructor_builds_a_model_reporting_its_table_name() {
        for (name, constructor) in BUILTIN_MODELS {
            let model = constructor().unwrap();
            assert_eq!(model.name(), *name);
        }
    }

    #[test]
    fn radius_one_variants_differ_from_their_siblings() {
        let lookup = |wanted: &str| {
            let (_, constructor) = BUILTIN_MODELS.iter().find(|(n, _)| *n == wanted).unwrap();
            constructor().unwrap().summary()
        };
        assert!(lookup("nbit_ecfp").contains("radius 2"));
        assert!(lookup("nbit_ecfp2").contains("radius 1"));
        assert!(lookup("nbit_fcfp2").starts_with("FCFP"));
    }
}
