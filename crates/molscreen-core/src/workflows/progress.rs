/// Events emitted while a workflow runs, for front ends that render progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A named stage (reading an input file, joining scores) begins.
    StageStart { name: &'static str },
    StageFinish,

    /// `total` molecules or fragments are about to be computed.
    MoleculesStart { total: u64 },
    /// One molecule finished; `valid` is false when its SMILES was rejected.
    MoleculeComputed { valid: bool },
    /// All molecules of the current file are done; `invalid` were skipped.
    MoleculesFinish { invalid: u64 },

    /// One record was appended to an output file.
    RecordWritten,

    Message(String),
}

pub type ProgressSink<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    sink: Option<ProgressSink<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that drops every event.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn new(sink: ProgressSink<'a>) -> Self {
        Self { sink: Some(sink) }
    }

    #[inline]
    pub fn emit(&self, event: Progress) {
        if let Some(sink) = &self.sink {
            sink(event);
        }
    }

    /// Runs `work` between a `StageStart` and a `StageFinish` event. The
    /// finish event is emitted whether or not `work` succeeds.
    pub fn stage<T>(&self, name: &'static str, work: impl FnOnce() -> T) -> T {
        self.emit(Progress::StageStart { name });
        let result = work();
        self.emit(Progress::StageFinish);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_still_runs_stages() {
        let reporter = ProgressReporter::silent();
        assert_eq!(reporter.stage("Reading molecules", || 42), 42);
    }

    #[test]
    fn stage_brackets_work_even_when_it_fails() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::new(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));
        let result: Result<(), &str> = reporter.stage("Reading activity", || {
            reporter.emit(Progress::RecordWritten);
            Err("missing file")
        });
        assert!(result.is_err());
        drop(reporter);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                Progress::StageStart {
                    name: "Reading activity"
                },
                Progress::RecordWritten,
                Progress::StageFinish,
            ]
        );
    }
}
