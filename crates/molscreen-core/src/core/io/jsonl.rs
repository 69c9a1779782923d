use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parsing error in '{path}' at line {line}: {source}", path = path.display())]
    Json {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Failed to write JSON record to '{path}': {source}", path = path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl RecordError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Creates every missing ancestor directory of `path`.
pub fn create_parent_directory(path: &Path) -> Result<(), RecordError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| RecordError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Iterator over the records of a JSON-lines source, yielding each record with
/// its 1-based line number. Blank lines are skipped.
pub struct JsonLines<R, T> {
    reader: R,
    path: PathBuf,
    line: usize,
    buffer: String,
    _record: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonLines<BufReader<File>, T> {
    pub fn open(path: &Path) -> Result<Self, RecordError> {
        let file = File::open(path).map_err(|e| RecordError::io(path, e))?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead, T: DeserializeOwned> JsonLines<R, T> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            line: 0,
            buffer: String::new(),
            _record: PhantomData,
        }
    }
}

impl<R: BufRead, T: DeserializeOwned> Iterator for JsonLines<R, T> {
    type Item = Result<(usize, T), RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(RecordError::io(&self.path, e))),
            }
            self.line += 1;
            let text = self.buffer.trim();
            if text.is_empty() {
                continue;
            }
            let line = self.line;
            return Some(
                serde_json::from_str(text)
                    .map(|record| (line, record))
                    .map_err(|source| RecordError::Json {
                        path: self.path.clone(),
                        line,
                        source,
                    }),
            );
        }
    }
}

/// Writes one JSON document per line, separating records with `\n` and
/// leaving no trailing newline after the last record.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    path: PathBuf,
    written: usize,
}

impl JsonLinesWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, RecordError> {
        create_parent_directory(path)?;
        let file = File::create(path).map_err(|e| RecordError::io(path, e))?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            path: path.into(),
            written: 0,
        }
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), RecordError> {
        if self.written > 0 {
            self.writer
                .write_all(b"\n")
                .map_err(|e| RecordError::io(&self.path, e))?;
        }
        serde_json::to_writer(&mut self.writer, record).map_err(|source| {
            RecordError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<W, RecordError> {
        self.writer
            .flush()
            .map_err(|e| RecordError::io(&self.path, e))?;
        Ok(self.writer)
    }
}
