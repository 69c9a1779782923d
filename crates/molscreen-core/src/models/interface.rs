use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    Index,
    Descriptor,
    Fingerprint,
    Regression,
    Control,
    Baseline,
    EquivalentClass,
    FingerprintPair,
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModelFamily::Index => "index",
            ModelFamily::Descriptor => "descriptor",
            ModelFamily::Fingerprint => "fingerprint",
            ModelFamily::Regression => "regression",
            ModelFamily::Control => "control",
            ModelFamily::Baseline => "baseline",
            ModelFamily::EquivalentClass => "equivalent-class",
            ModelFamily::FingerprintPair => "fingerprint-pair",
        };
        f.write_str(label)
    }
}

/// Capability contract for every screening model the registry can build.
pub trait Model: fmt::Debug + Send + Sync {
    /// The registry name this instance was constructed for.
    fn name(&self) -> &str;

    fn family(&self) -> ModelFamily;

    /// One-line description of the configured strategy.
    fn summary(&self) -> String;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid configuration for model '{model}': {reason}")]
    Configuration { model: String, reason: String },
}
