//! # Core Module
//!
//! Stateless primitives shared by the rest of the library.
//!
//! - **Chemistry** ([`chem`]) - Element data, the SMILES reader and the molecular graph
//! - **Descriptors** ([`descriptors`]) - Named numeric properties computed from a molecule
//! - **Record I/O** ([`io`]) - Line-delimited JSON records exchanged between pipeline stages

pub mod chem;
pub mod descriptors;
pub mod io;
