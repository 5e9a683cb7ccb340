//! I/O error types for xtrees-io.

use std::path::PathBuf;

use xtrees_forest::ForestError;

/// Errors from dataset reading, feature selection and artifact writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading fails after the file was opened (e.g. the path
    /// is a directory).
    #[error("cannot read {path}")]
    ReadFile {
        /// Path to the TSV file.
        path: PathBuf,
        /// Underlying CSV error of kind `Io`.
        source: csv::Error,
    },

    /// Returned when the parser encounters a malformed or undecodable record.
    #[error("TSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the TSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the file has no header line.
    #[error("missing header line in {path}")]
    MissingHeader {
        /// Path to the TSV file.
        path: PathBuf,
    },

    /// Returned when the header names the same column twice.
    #[error("duplicate column \"{column}\" in {path}: positions {first} and {second}")]
    DuplicateColumn {
        /// Path to the TSV file.
        path: PathBuf,
        /// The duplicated column name.
        column: String,
        /// Zero-based position of the first occurrence.
        first: usize,
        /// Zero-based position of the second occurrence.
        second: usize,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error("inconsistent row length in {path}: row {row_index} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the TSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when the dataset lacks the response column.
    #[error("dataset has no \"{column}\" column")]
    MissingResponseColumn {
        /// Name of the required column.
        column: String,
    },

    /// Returned when the response is the only column.
    #[error("dataset has no predictor columns besides \"{column}\"")]
    NoPredictorColumns {
        /// Name of the response column.
        column: String,
    },

    /// Returned when the output directory does not exist or is not a directory.
    #[error("output directory {path} is not accessible")]
    OutputDir {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the artifact file cannot be written or moved into place.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the artifact cannot be encoded.
    #[error("cannot encode model artifact")]
    EncodeArtifact(#[source] ForestError),
}
