use crate::cli::AddActivityArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use molscreen::workflows::{self, config::ActivityConfigBuilder, progress::ProgressReporter};
use tracing::info;

pub fn run(args: AddActivityArgs, progress: CliProgressHandler) -> Result<()> {
    let config = ActivityConfigBuilder::new()
        .score_path(args.score)
        .activity_path(args.activity)
        .output_path(args.output)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let reporter = ProgressReporter::new(progress.sink());
    info!("Joining {:?} with {:?}", config.score_path, config.activity_path);
    let summary = workflows::activity::run(&config, &reporter)?;

    if summary.written < summary.available {
        info!(
            "{} activity value(s) had no matching score.",
            summary.available - summary.written
        );
    }
    println!(
        "✓ Wrote {} scored record(s) to: {}",
        summary.written,
        config.output_path.display()
    );
    Ok(())
}
