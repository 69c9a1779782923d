use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use molscreen::workflows::progress::{Progress, ProgressSink};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A handler that renders nothing, used with `--quiet`.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn sink(&self) -> ProgressSink<'static> {
        let pb = Arc::clone(&self.pb);

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::StageStart { name } => {
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name);
                }
                Progress::StageFinish => {
                    pb.disable_steady_tick();
                    pb.finish_with_message("✓ Done");
                }
                Progress::MoleculesStart { total } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                    pb.set_message("Computing");
                }
                Progress::MoleculeComputed { valid } => {
                    if !valid {
                        pb.set_message("Computing (invalid skipped)");
                    }
                    pb.inc(1);
                }
                Progress::MoleculesFinish { invalid } => {
                    let length = pb.length().unwrap_or(0);
                    if pb.position() < length {
                        pb.set_position(length);
                    }
                    pb.finish_with_message(format!("✓ {invalid} invalid"));
                }
                Progress::RecordWritten => {
                    pb.inc(1);
                    pb.set_message(format!("Joining scores ({} written)", pb.position()));
                }
                Progress::Message(msg) => {
                    if pb.is_finished() {
                        pb.set_message(msg);
                    } else {
                        pb.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::hidden();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn sink_tracks_a_descriptor_run() {
        let handler = CliProgressHandler::hidden();
        let sink = handler.sink();

        sink(Progress::StageStart {
            name: "Reading molecules",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Reading molecules");
            assert!(!pb.is_finished());
        }
        sink(Progress::StageFinish);

        sink(Progress::MoleculesStart { total: 3 });
        sink(Progress::MoleculeComputed { valid: true });
        sink(Progress::MoleculeComputed { valid: false });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.message(), "Computing (invalid skipped)");
        }

        sink(Progress::MoleculesFinish { invalid: 1 });
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 3);
            assert_eq!(pb.message(), "✓ 1 invalid");
        }

        sink(Progress::Message("active.jsonl -> active.csv".to_string()));
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.message(), "active.jsonl -> active.csv");
    }

    #[test]
    fn written_records_are_counted() {
        let handler = CliProgressHandler::hidden();
        let sink = handler.sink();
        sink(Progress::StageStart {
            name: "Joining scores",
        });
        sink(Progress::RecordWritten);
        sink(Progress::RecordWritten);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.message(), "Joining scores (2 written)");
    }

    #[test]
    fn sink_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let sink = handler.sink();

        thread::spawn(move || {
            sink(Progress::StageStart {
                name: "Joining scores",
            });
            sink(Progress::RecordWritten);
            sink(Progress::StageFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }
}
