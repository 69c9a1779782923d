use super::config::DescriptorConfig;
use super::progress::{Progress, ProgressReporter};
use crate::core::chem::{Molecule, ParseError};
use crate::core::descriptors::{DescriptorError, DescriptorSet};
use crate::core::io::jsonl::{self, JsonLines, RecordError};
use crate::core::io::records::MoleculeRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

#[derive(Debug, Error)]
pub enum DescriptorWorkflowError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Record at line {line} of '{path}' has no 'fragments' field", path = path.display())]
    MissingFragments { path: PathBuf, line: usize },

    #[error("CSV writing error for '{path}': {source}", path = path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptorSummary {
    /// Molecules (or fragments) read from all inputs.
    pub total: usize,
    /// Entries whose SMILES could not be parsed; these have no output row.
    pub invalid: usize,
}

impl DescriptorSummary {
    pub fn valid(&self) -> usize {
        self.total - self.invalid
    }
}

#[derive(Debug)]
struct Entry {
    smiles: String,
    index: Option<i64>,
}

#[instrument(skip_all, name = "descriptor_workflow")]
pub fn run(
    config: &DescriptorConfig,
    reporter: &ProgressReporter,
) -> Result<DescriptorSummary, DescriptorWorkflowError> {
    let descriptors = DescriptorSet::select(&config.features)?;
    info!(
        "Computing {} descriptor(s) for {} input file(s), using {}.",
        descriptors.len(),
        config.inputs.len(),
        if config.use_fragments { "fragments" } else { "molecules" }
    );

    for output in &config.outputs {
        jsonl::create_parent_directory(output)?;
    }

    let mut summary = DescriptorSummary::default();
    for (input, output) in config.inputs.iter().zip(&config.outputs) {
        let entries = reporter.stage("Reading molecules", || {
            read_entries(input, config.use_fragments)
        })?;
        reporter.emit(Progress::Message(format!(
            "{} -> {}",
            input.display(),
            output.display()
        )));
        debug!("Read {} entries from {:?}", entries.len(), input);

        let file_summary =
            write_table(output, &entries, &descriptors, config.use_fragments, reporter)?;
        summary.total += file_summary.total;
        summary.invalid += file_summary.invalid;
    }

    info!("Invalid molecules: {}/{}", summary.invalid, summary.total);
    Ok(summary)
}

fn read_entries(path: &Path, use_fragments: bool) -> Result<Vec<Entry>, DescriptorWorkflowError> {
    let mut entries = Vec::new();
    for record in JsonLines::<_, MoleculeRecord>::open(path)? {
        let (line, molecule) = record?;
        if !use_fragments {
            entries.push(Entry {
                smiles: molecule.smiles,
                index: None,
            });
            continue;
        }
        let fragments = molecule
            .fragments
            .ok_or_else(|| DescriptorWorkflowError::MissingFragments {
                path: path.to_path_buf(),
                line,
            })?;
        entries.extend(fragments.into_iter().map(|fragment| Entry {
            smiles: fragment.smiles,
            index: Some(fragment.index),
        }));
    }
    Ok(entries)
}

fn write_table(
    path: &Path,
    entries: &[Entry],
    descriptors: &DescriptorSet,
    use_fragments: bool,
    reporter: &ProgressReporter,
) -> Result<DescriptorSummary, DescriptorWorkflowError> {
    let csv_error = |source: csv::Error| DescriptorWorkflowError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| RecordError::io(path, e))?;
    let mut sink = BufWriter::new(file);

    let mut header = vec!["smiles"];
    if use_fragments {
        header.push("index");
    }
    header.extend(descriptors.names());

    // The header is written unquoted; data rows quote the SMILES column only.
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut sink);
        writer.write_record(&header).map_err(csv_error)?;
        writer.flush().map_err(|e| RecordError::io(path, e))?;
    }
    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut sink);

    let computed: Vec<Result<Vec<f64>, ParseError>> = entries
        .par_iter()
        .map(|entry| Molecule::from_smiles(&entry.smiles).map(|mol| descriptors.compute(&mol)))
        .collect();

    reporter.emit(Progress::MoleculesStart {
        total: entries.len() as u64,
    });
    let mut summary = DescriptorSummary::default();
    for (entry, result) in entries.iter().zip(computed) {
        summary.total += 1;
        reporter.emit(Progress::MoleculeComputed {
            valid: result.is_ok(),
        });
        match result {
            Ok(values) => {
                let mut record = Vec::with_capacity(header.len());
                record.push(entry.smiles.clone());
                if let Some(index) = entry.index {
                    record.push(index.to_string());
                }
                record.extend(descriptors.format_row(&values));
                rows.write_record(&record).map_err(csv_error)?;
            }
            Err(e) => {
                error!("Invalid molecule detected: {} ({})", entry.smiles, e);
                summary.invalid += 1;
            }
        }
    }
    rows.flush().map_err(|e| RecordError::io(path, e))?;
    reporter.emit(Progress::MoleculesFinish {
        invalid: summary.invalid as u64,
    });

    Ok(summary)
}
