//! # Descriptors Module
//!
//! Named numeric properties of a molecule, addressed by the names used in
//! descriptor tables (`MolWt`, `RingCount`, ...).
//!
//! The [`CATALOG`] fixes both the set of supported names and their default
//! column order. A [`DescriptorSet`] is a validated, ordered selection from the
//! catalog; building one is the only place where an unknown name is reported.
//!
//! ```ignore
//! use molscreen::core::chem::Molecule;
//! use molscreen::core::descriptors::DescriptorSet;
//!
//! let set = DescriptorSet::select(&["MolWt", "RingCount"])?;
//! let row = set.compute(&Molecule::from_smiles("c1ccccc1O")?);
//! ```

pub mod constitutional;
pub mod topological;

use crate::core::chem::Molecule;
use phf::{Map, phf_map};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integral quantities, written without a fractional part.
    Count,
    Real,
}

#[derive(Debug)]
pub struct Descriptor {
    pub name: &'static str,
    pub kind: ValueKind,
    function: fn(&Molecule) -> f64,
}

impl Descriptor {
    #[inline]
    pub fn compute(&self, mol: &Molecule) -> f64 {
        (self.function)(mol)
    }

    /// Counts are written as integers; reals always carry a fractional part
    /// (`1.0`, not `1`).
    pub fn format(&self, value: f64) -> String {
        match self.kind {
            _ if value.is_nan() => "nan".to_string(),
            _ if value.is_infinite() => {
                if value > 0.0 { "inf" } else { "-inf" }.to_string()
            }
            ValueKind::Count => format!("{}", value.round() as i64),
            ValueKind::Real if value.fract() == 0.0 => format!("{value:.1}"),
            ValueKind::Real => value.to_string(),
        }
    }
}

macro_rules! descriptor {
    ($name:literal, $kind:ident, $function:path) => {
        Descriptor {
            name: $name,
            kind: ValueKind::$kind,
            function: $function,
        }
    };
}

pub static CATALOG: &[Descriptor] = &[
    descriptor!("MolWt", Real, constitutional::mol_wt),
    descriptor!("HeavyAtomMolWt", Real, constitutional::heavy_atom_mol_wt),
    descriptor!("ExactMolWt", Real, constitutional::exact_mol_wt),
    descriptor!("NumValenceElectrons", Count, constitutional::num_valence_electrons),
    descriptor!("NumRadicalElectrons", Count, constitutional::num_radical_electrons),
    descriptor!("HeavyAtomCount", Count, constitutional::heavy_atom_count),
    descriptor!("NHOHCount", Count, constitutional::nhoh_count),
    descriptor!("NOCount", Count, constitutional::no_count),
    descriptor!("NumHeteroatoms", Count, constitutional::num_heteroatoms),
    descriptor!("NumRotatableBonds", Count, topological::num_rotatable_bonds),
    descriptor!("RingCount", Count, topological::ring_count),
    descriptor!("FractionCSP3", Real, topological::fraction_csp3),
];

static CATALOG_INDEX: Map<&'static str, usize> = phf_map! {
    "MolWt" => 0,
    "HeavyAtomMolWt" => 1,
    "ExactMolWt" => 2,
    "NumValenceElectrons" => 3,
    "NumRadicalElectrons" => 4,
    "HeavyAtomCount" => 5,
    "NHOHCount" => 6,
    "NOCount" => 7,
    "NumHeteroatoms" => 8,
    "NumRotatableBonds" => 9,
    "RingCount" => 10,
    "FractionCSP3" => 11,
};

pub fn lookup(name: &str) -> Option<&'static Descriptor> {
    CATALOG_INDEX.get(name).map(|&index| &CATALOG[index])
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Unknown descriptor '{0}'. Supported descriptors: {supported}", supported = supported_names().join(", "))]
    UnknownDescriptor(String),
}

pub fn supported_names() -> Vec<&'static str> {
    CATALOG.iter().map(|d| d.name).collect()
}

#[derive(Debug, Clone)]
pub struct DescriptorSet {
    descriptors: Vec<&'static Descriptor>,
}

impl DescriptorSet {
    /// Every catalog descriptor, in catalog order.
    pub fn all() -> Self {
        Self {
            descriptors: CATALOG.iter().collect(),
        }
    }

    /// The named descriptors in the given order; an empty selection means all.
    pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Self, DescriptorError> {
        if names.is_empty() {
            return Ok(Self::all());
        }
        let descriptors = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                lookup(name).ok_or_else(|| DescriptorError::UnknownDescriptor(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { descriptors })
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.name)
    }

    pub fn compute(&self, mol: &Molecule) -> Vec<f64> {
        self.descriptors.iter().map(|d| d.compute(mol)).collect()
    }

    /// Formats a row previously produced by [`DescriptorSet::compute`].
    pub fn format_row(&self, values: &[f64]) -> Vec<String> {
        self.descriptors
            .iter()
            .zip(values)
            .map(|(d, &v)| d.format(v))
            .collect()
    }
}
