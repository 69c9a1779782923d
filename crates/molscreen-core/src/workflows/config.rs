use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("At least one input file is required")]
    NoInputs,

    #[error("Got {outputs} output file(s) for {inputs} input file(s)")]
    OutputCountMismatch { inputs: usize, outputs: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorConfig {
    /// Line-delimited JSON molecule files, one output table per input.
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    /// Compute one row per fragment instead of one row per molecule.
    pub use_fragments: bool,
    /// Descriptor names in column order; empty selects the whole catalog.
    pub features: Vec<String>,
}

#[derive(Default)]
pub struct DescriptorConfigBuilder {
    inputs: Option<Vec<PathBuf>>,
    outputs: Option<Vec<PathBuf>>,
    use_fragments: bool,
    features: Vec<String>,
}

impl DescriptorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(mut self, paths: Vec<PathBuf>) -> Self {
        self.inputs = Some(paths);
        self
    }
    pub fn outputs(mut self, paths: Vec<PathBuf>) -> Self {
        self.outputs = Some(paths);
        self
    }
    pub fn use_fragments(mut self, enabled: bool) -> Self {
        self.use_fragments = enabled;
        self
    }
    pub fn features(mut self, names: Vec<String>) -> Self {
        self.features = names;
        self
    }

    pub fn build(self) -> Result<DescriptorConfig, ConfigError> {
        let inputs = self.inputs.ok_or(ConfigError::MissingParameter("inputs"))?;
        let outputs = self
            .outputs
            .ok_or(ConfigError::MissingParameter("outputs"))?;
        if inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        if inputs.len() != outputs.len() {
            return Err(ConfigError::OutputCountMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        Ok(DescriptorConfig {
            inputs,
            outputs,
            use_fragments: self.use_fragments,
            features: self.features,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityConfig {
    pub score_path: PathBuf,
    pub activity_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Default)]
pub struct ActivityConfigBuilder {
    score_path: Option<PathBuf>,
    activity_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

impl ActivityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_path(mut self, path: PathBuf) -> Self {
        self.score_path = Some(path);
        self
    }
    pub fn activity_path(mut self, path: PathBuf) -> Self {
        self.activity_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn build(self) -> Result<ActivityConfig, ConfigError> {
        Ok(ActivityConfig {
            score_path: self
                .score_path
                .ok_or(ConfigError::MissingParameter("score_path"))?,
            activity_path: self
                .activity_path
                .ok_or(ConfigError::MissingParameter("activity_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn descriptor_builder_succeeds_with_matching_counts() {
        let config = DescriptorConfigBuilder::new()
            .inputs(paths(&["a.jsonl", "b.jsonl"]))
            .outputs(paths(&["a.csv", "b.csv"]))
            .use_fragments(true)
            .features(vec!["MolWt".to_string()])
            .build()
            .unwrap();
        assert!(config.use_fragments);
        assert_eq!(config.outputs[1], PathBuf::from("b.csv"));
    }

    #[test]
    fn descriptor_builder_rejects_missing_and_mismatched_paths() {
        let missing = DescriptorConfigBuilder::new()
            .inputs(paths(&["a.jsonl"]))
            .build();
        assert_eq!(missing.unwrap_err(), ConfigError::MissingParameter("outputs"));

        let mismatched = DescriptorConfigBuilder::new()
            .inputs(paths(&["a.jsonl", "b.jsonl"]))
            .outputs(paths(&["a.csv"]))
            .build();
        assert_eq!(
            mismatched.unwrap_err(),
            ConfigError::OutputCountMismatch {
                inputs: 2,
                outputs: 1
            }
        );

        let empty = DescriptorConfigBuilder::new()
            .inputs(Vec::new())
            .outputs(Vec::new())
            .build();
        assert_eq!(empty.unwrap_err(), ConfigError::NoInputs);
    }

    #[test]
    fn activity_builder_requires_every_path() {
        let err = ActivityConfigBuilder::new()
            .score_path("scores.jsonl".into())
            .output_path("out.jsonl".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("activity_path"));
    }
}
