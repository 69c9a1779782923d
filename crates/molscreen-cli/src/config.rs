mod defaults;

pub use defaults::DATASETS;

use crate::cli::DescriptorsArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use molscreen::workflows::config::{DescriptorConfig, DescriptorConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDescriptorSection {
    #[serde(rename = "use-fragments")]
    use_fragments: Option<bool>,
    features: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    descriptors: Option<PartialDescriptorSection>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, args: &DescriptorsArgs) -> Result<DescriptorConfig> {
        let defaults = DefaultsConfig::default();
        let section = self.descriptors.unwrap_or_default();

        for (flag, count) in [("--input", args.inputs.len()), ("--output", args.outputs.len())] {
            if count != DATASETS.len() {
                return Err(CliError::Argument(format!(
                    "{flag} expects {} comma-separated paths ({}), got {count}",
                    DATASETS.len(),
                    DATASETS.join(",")
                )));
            }
        }

        let use_fragments = match (args.fragments.fragments, args.fragments.no_fragments) {
            (true, false) => true,
            (false, true) => false,
            _ => section.use_fragments.unwrap_or(defaults.use_fragments),
        };
        let features = args
            .features
            .clone()
            .or(section.features)
            .unwrap_or(defaults.features);

        DescriptorConfigBuilder::new()
            .inputs(args.inputs.clone())
            .outputs(args.outputs.clone())
            .use_fragments(use_fragments)
            .features(features)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("molscreen.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn parse_args(extra: &[&str]) -> DescriptorsArgs {
        let mut argv = vec![
            "molscreen",
            "descriptors",
            "-i",
            "a.jsonl,i.jsonl,t.jsonl",
            "-o",
            "a.csv,i.csv,t.csv",
        ];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Descriptors(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = PartialConfig::load(None)
            .unwrap()
            .merge_with_cli(&parse_args(&[]))
            .unwrap();
        assert!(!config.use_fragments);
        assert!(config.features.is_empty());
        assert_eq!(config.inputs[1], PathBuf::from("i.jsonl"));
    }

    #[test]
    fn file_values_are_used_when_cli_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "[descriptors]\nuse-fragments = true\nfeatures = [\"MolWt\", \"RingCount\"]\n",
        );
        let config = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&parse_args(&[]))
            .unwrap();
        assert!(config.use_fragments);
        assert_eq!(config.features, vec!["MolWt", "RingCount"]);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "[descriptors]\nuse-fragments = true\nfeatures = [\"MolWt\"]\n",
        );
        let config = PartialConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&parse_args(&["--no-fragments", "--features", "NOCount"]))
            .unwrap();
        assert!(!config.use_fragments);
        assert_eq!(config.features, vec!["NOCount"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[descriptors]\nuse_fragments = true\n");
        let result = PartialConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn wrong_number_of_paths_is_an_argument_error() {
        let args = match Cli::parse_from([
            "molscreen",
            "descriptors",
            "-i",
            "a.jsonl,i.jsonl",
            "-o",
            "a.csv,i.csv",
        ])
        .command
        {
            Commands::Descriptors(args) => args,
            other => panic!("unexpected command: {other:?}"),
        };
        let result = PartialConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }
}
