//! Tab-separated dataset reader with header and shape validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{Dataset, Value};

/// Name of the training file inside a working directory.
pub const INPUT_FILE: &str = "py_train.tsv";

/// Reads a tabular dataset from a tab-separated file.
///
/// Expected format:
/// - Header line required, naming every column
/// - One record per line, each with exactly as many cells as the header
/// - Cells are trimmed and classified with [`Value::parse`]
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or cannot be opened |
/// | [`IoError::ReadFile`] | Reading fails after opening (e.g. path is a directory) |
/// | [`IoError::MissingHeader`] | File is empty or its header names no columns |
/// | [`IoError::DuplicateColumn`] | Same column name appears twice in the header |
/// | [`IoError::CsvParse`] | Undecodable record (e.g. invalid UTF-8) |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Reader for [`INPUT_FILE`] inside `work_dir`.
    pub fn in_dir(work_dir: &Path) -> Self {
        Self::new(&work_dir.join(INPUT_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_error(&self, e: csv::Error) -> IoError {
        if e.is_io_error() {
            return IoError::ReadFile {
                path: self.path.clone(),
                source: e,
            };
        }
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    /// Read and validate the file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so short or long rows surface as InconsistentRowLength.
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.parse_error(e))?;
        if header.iter().all(str::is_empty) {
            return Err(IoError::MissingHeader {
                path: self.path.clone(),
            });
        }

        let mut columns = Vec::with_capacity(header.len());
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (position, name) in header.iter().enumerate() {
            if let Some(&first) = seen.get(name) {
                return Err(IoError::DuplicateColumn {
                    path: self.path.clone(),
                    column: name.to_string(),
                    first,
                    second: position,
                });
            }
            seen.insert(name, position);
            columns.push(name.to_string());
        }
        let expected = columns.len();
        debug!(n_columns = expected, "read header");

        let mut rows = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_error(e))?;
            if record.len() != expected {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected,
                    got: record.len(),
                });
            }
            rows.push(record.iter().map(Value::parse).collect::<Vec<_>>());
        }

        let n_missing = rows.iter().flatten().filter(|v| v.is_missing()).count();
        info!(n_rows = rows.len(), n_columns = expected, n_missing, "dataset loaded");

        Ok(Dataset::new(columns, rows))
    }
}
