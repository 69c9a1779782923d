//! # molscreen Core Library
//!
//! Building blocks for ligand-based virtual screening pipelines: a name-keyed
//! model registry, molecular descriptor computation from SMILES, and the
//! line-delimited JSON/CSV plumbing that connects pipeline stages.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless chemistry primitives (element table,
//!   SMILES reader, molecular graph), the descriptor catalog, and record I/O.
//!
//! - **[`models`]: Strategy Selection.** The model capability contract, the
//!   built-in model families, and the process-wide [`models::registry::ModelRegistry`]
//!   that resolves a model by its configuration name.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures (descriptor tables,
//!   activity joining) with progress reporting, used directly by the CLI.

pub mod core;
pub mod models;
pub mod workflows;
