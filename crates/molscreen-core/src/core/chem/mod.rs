//! Molecular graph construction from SMILES line notation.
//!
//! The reader covers the organic subset, bracket atoms, branches, ring closures
//! and disconnected components. Stereochemistry is parsed but not retained,
//! and aromatic systems are kept as written (no kekulization).

pub mod elements;
pub mod molecule;
pub mod smiles;

pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use smiles::ParseError;
