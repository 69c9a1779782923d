use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molscreen CLI - descriptor tables, activity joining and model lookup for ligand-based virtual screening pipelines.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute descriptor tables (CSV) for the active, inactive and test molecule files.
    Descriptors(DescriptorsArgs),
    /// Attach the true activity values to the output of a scoring run.
    AddActivity(AddActivityArgs),
    /// Inspect the models available by name.
    Models(ModelsArgs),
}

/// Arguments for the `descriptors` subcommand.
#[derive(Args, Debug)]
pub struct DescriptorsArgs {
    /// Comma-separated molecule files (JSON lines): active,inactive,test.
    #[arg(
        short,
        long = "input",
        required = true,
        value_delimiter = ',',
        value_name = "PATHS"
    )]
    pub inputs: Vec<PathBuf>,

    /// Comma-separated output CSV files, one per input, in the same order.
    #[arg(
        short,
        long = "output",
        required = true,
        value_delimiter = ',',
        value_name = "PATHS"
    )]
    pub outputs: Vec<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override `descriptors.use-fragments` from the config file.
    #[command(flatten)]
    pub fragments: FragmentMode,

    /// Comma-separated descriptor names, overriding `descriptors.features`.
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub features: Option<Vec<String>>,
}

/// Mutually exclusive flags choosing between molecule and fragment rows.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct FragmentMode {
    /// Compute one row per fragment instead of one per molecule.
    #[arg(long)]
    pub fragments: bool,
    /// Compute one row per molecule, even if the config file enables fragments.
    #[arg(long)]
    pub no_fragments: bool,
}

/// Arguments for the `add-activity` subcommand.
#[derive(Args, Debug)]
pub struct AddActivityArgs {
    /// Score file (JSON lines) produced by a scoring run.
    #[arg(short, long = "score", required = true, value_name = "PATH")]
    pub score: PathBuf,

    /// Activity file whose first line holds the `activity` array.
    #[arg(short, long = "activity", required = true, value_name = "PATH")]
    pub activity: PathBuf,

    /// Output file (JSON lines) with name, score and activity.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `models` subcommand.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommands {
    /// List every registered model name with its family.
    List,
    /// Construct the named model and describe its configuration.
    Show {
        /// Model name as used in pipeline configuration files.
        #[arg(required = true)]
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_paths_are_split_on_commas() {
        let cli = Cli::try_parse_from([
            "molscreen",
            "descriptors",
            "-i",
            "a.jsonl,b.jsonl,c.jsonl",
            "-o",
            "a.csv,b.csv,c.csv",
            "--features",
            "MolWt,RingCount",
        ])
        .unwrap();
        let Commands::Descriptors(args) = cli.command else {
            panic!("expected descriptors command");
        };
        assert_eq!(args.inputs.len(), 3);
        assert_eq!(args.outputs[2], PathBuf::from("c.csv"));
        assert_eq!(
            args.features,
            Some(vec!["MolWt".to_string(), "RingCount".to_string()])
        );
        assert!(!args.fragments.fragments);
    }

    #[test]
    fn fragment_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "molscreen",
            "descriptors",
            "-i",
            "a",
            "-o",
            "b",
            "--fragments",
            "--no-fragments",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["molscreen", "models", "show", "baseline", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Models(ModelsArgs {
                command: ModelsCommands::Show { ref name }
            }) if name == "baseline"
        ));
    }

    #[test]
    fn add_activity_requires_all_paths() {
        assert!(Cli::try_parse_from(["molscreen", "add-activity", "-s", "s.jsonl"]).is_err());
    }
}
