use super::config::ActivityConfig;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::jsonl::{JsonLines, JsonLinesWriter, RecordError};
use crate::core::io::records::{ActivityRecord, ScoreRecord, ScoredActivity};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Activity file '{path}' has no 'activity' array on its first line", path = path.display())]
    MissingActivity { path: PathBuf },

    #[error(
        "Score at line {line} has no matching activity; only {available} activity value(s) are available"
    )]
    ActivityExhausted { line: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySummary {
    pub written: usize,
    pub available: usize,
}

/// Reads the activity values from the first record of an activity file.
pub fn read_activity(path: &Path) -> Result<Vec<Value>, ActivityError> {
    let activity = match JsonLines::<_, ActivityRecord>::open(path)?.next() {
        Some(record) => record?.1.activity,
        None => None,
    };
    activity.ok_or_else(|| ActivityError::MissingActivity {
        path: path.to_path_buf(),
    })
}

/// Pairs the `k`-th score record with the `k`-th activity value.
#[instrument(skip_all, name = "activity_workflow")]
pub fn run(
    config: &ActivityConfig,
    reporter: &ProgressReporter,
) -> Result<ActivitySummary, ActivityError> {
    let activity = reporter.stage("Reading activity", || read_activity(&config.activity_path))?;
    info!(
        "Loaded {} activity value(s) from {:?}",
        activity.len(),
        config.activity_path
    );

    reporter.emit(Progress::StageStart {
        name: "Joining scores",
    });
    let mut writer = JsonLinesWriter::create(&config.output_path)?;
    let scores = JsonLines::<_, ScoreRecord>::open(&config.score_path)?;
    for (position, record) in scores.enumerate() {
        let (line, score) = record?;
        let value = activity
            .get(position)
            .ok_or(ActivityError::ActivityExhausted {
                line,
                available: activity.len(),
            })?;
        writer.write(&ScoredActivity {
            name: &score.name,
            score: &score.score,
            activity: value,
        })?;
        reporter.emit(Progress::RecordWritten);
    }
    let written = writer.written();
    writer.finish()?;
    reporter.emit(Progress::StageFinish);

    info!("Wrote {} scored record(s) to {:?}", written, config.output_path);
    Ok(ActivitySummary {
        written,
        available: activity.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::config::ActivityConfigBuilder;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn setup(scores: &str, activity: &str) -> (TempDir, ActivityConfig) {
        let dir = tempdir().unwrap();
        let score_path = dir.path().join("scores.jsonl");
        let activity_path = dir.path().join("activity.json");
        fs::write(&score_path, scores).unwrap();
        fs::write(&activity_path, activity).unwrap();
        let config = ActivityConfigBuilder::new()
            .score_path(score_path)
            .activity_path(activity_path)
            .output_path(dir.path().join("out").join("scored.jsonl"))
            .build()
            .unwrap();
        (dir, config)
    }

    #[test]
    fn scores_are_paired_with_activity_by_position() {
        let (_dir, config) = setup(
            "{\"name\": \"m1\", \"score\": 0.5}\n{\"name\": \"m2\", \"score\": 0.1}\n",
            "{\"activity\": [1, 0, 1]}\n",
        );
        let summary = run(&config, &ProgressReporter::silent()).unwrap();
        assert_eq!(
            summary,
            ActivitySummary {
                written: 2,
                available: 3
            }
        );
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "{\"name\":\"m1\",\"score\":0.5,\"activity\":1}\n{\"name\":\"m2\",\"score\":0.1,\"activity\":0}"
        );
    }

    #[test]
    fn every_joined_record_is_reported() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let (_dir, config) = setup(
            "{\"name\": \"m1\", \"score\": 1}\n{\"name\": \"m2\", \"score\": 2}",
            "{\"activity\": [0, 1]}",
        );
        let written = AtomicUsize::new(0);
        let reporter = ProgressReporter::new(Box::new(|event| {
            if event == Progress::RecordWritten {
                written.fetch_add(1, Ordering::SeqCst);
            }
        }));
        let summary = run(&config, &reporter).unwrap();
        drop(reporter);
        assert_eq!(written.load(Ordering::SeqCst), summary.written);
    }

    #[test]
    fn only_the_first_activity_record_is_used() {
        let (_dir, config) = setup(
            "{\"name\": 7, \"score\": [1, 2]}",
            "{\"activity\": [true]}\n{\"activity\": [false]}\n",
        );
        run(&config, &ProgressReporter::silent()).unwrap();
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "{\"name\":7,\"score\":[1,2],\"activity\":true}"
        );
    }

    #[test]
    fn running_out_of_activity_values_is_an_error() {
        let (_dir, config) = setup(
            "{\"name\": \"m1\", \"score\": 1}\n{\"name\": \"m2\", \"score\": 2}\n",
            "{\"activity\": [1]}",
        );
        let err = run(&config, &ProgressReporter::silent()).unwrap_err();
        assert!(matches!(
            err,
            ActivityError::ActivityExhausted {
                line: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn empty_activity_file_is_reported() {
        let (_dir, config) = setup("", "\n");
        assert!(matches!(
            read_activity(&config.activity_path),
            Err(ActivityError::MissingActivity { .. })
        ));
    }

    #[test]
    fn activity_record_without_activity_field_is_missing_activity() {
        let (_dir, config) = setup("", "{\"values\": [1]}\n{\"activity\": [1]}");
        assert!(matches!(
            read_activity(&config.activity_path),
            Err(ActivityError::MissingActivity { .. })
        ));
    }

    #[test]
    fn activity_that_is_not_an_array_is_a_json_error() {
        let (_dir, config) = setup("", "{\"activity\": 1}");
        assert!(matches!(
            read_activity(&config.activity_path),
            Err(ActivityError::Record(RecordError::Json { line: 1, .. }))
        ));
    }

    #[test]
    fn malformed_score_line_reports_its_line() {
        let (_dir, config) = setup(
            "{\"name\": \"m1\", \"score\": 1}\n{\"name\": \"m2\"}\n",
            "{\"activity\": [1, 2]}",
        );
        let err = run(&config, &ProgressReporter::silent()).unwrap_err();
        assert!(matches!(
            err,
            ActivityError::Record(RecordError::Json { line: 2, .. })
        ));
    }
}
