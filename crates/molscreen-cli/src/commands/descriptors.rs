use crate::cli::DescriptorsArgs;
use crate::config::{DATASETS, PartialConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use molscreen::workflows::{self, progress::ProgressReporter};
use tracing::{info, warn};

pub fn run(args: DescriptorsArgs, progress: CliProgressHandler) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    for ((dataset, input), output) in DATASETS.iter().zip(&config.inputs).zip(&config.outputs) {
        info!("{} molecules: {:?} -> {:?}", dataset, input, output);
    }

    let reporter = ProgressReporter::new(progress.sink());
    println!(
        "Computing descriptors per {}...",
        if config.use_fragments {
            "fragment"
        } else {
            "molecule"
        }
    );
    let summary = workflows::descriptors::run(&config, &reporter)?;

    if summary.invalid > 0 {
        warn!(
            "{} of {} entries could not be parsed and were skipped.",
            summary.invalid, summary.total
        );
    }
    println!(
        "✓ Wrote {} row(s); invalid molecules: {}/{}",
        summary.valid(),
        summary.invalid,
        summary.total
    );
    Ok(())
}
