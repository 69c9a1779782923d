//! # Workflows Module
//!
//! End-to-end pipeline stages built on [`crate::core`].
//!
//! - **Descriptor tables** ([`descriptors`]) - Molecule or fragment JSON lines to
//!   per-input CSV tables of descriptor values
//! - **Activity joining** ([`activity`]) - Attaches ground-truth activity labels
//!   to scored molecules
//!
//! Both stages accept a [`progress::ProgressReporter`] so front ends can render
//! progress without the library depending on any UI crate.

pub mod activity;
pub mod config;
pub mod descriptors;
pub mod progress;
