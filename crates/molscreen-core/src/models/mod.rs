//! # Models Module
//!
//! Screening strategies selected by name at runtime.
//!
//! ## Overview
//!
//! Pipeline stages refer to a model only by its configuration name (for example
//! `"nbit_ecfp"` or `"baseline"`). The [`registry`] resolves that name to a
//! constructor and builds a fresh instance implementing the [`interface::Model`]
//! contract. The set of built-in names is an explicit table in [`catalog`];
//! additional constructors can be registered at runtime and take precedence
//! over built-ins with the same name.
//!
//! ## Key Components
//!
//! - [`interface`] - The capability contract every model satisfies
//! - [`families`] - Built-in model families and their configuration
//! - [`catalog`] - The discovery table of built-in names
//! - [`registry`] - Name-keyed factory with one-time lazy discovery
//!
//! ```ignore
//! use molscreen::models::registry;
//!
//! let model = registry::create_model("baseline")?;
//! println!("{}: {}", model.name(), model.summary());
//! ```

pub mod catalog;
pub mod families;
pub mod interface;
pub mod registry;

pub use interface::{Model, ModelError, ModelFamily};
pub use registry::{ModelRegistry, RegistryError};
