//! Error taxonomy of the training job.

use std::fmt;

use xtrees_forest::ForestError;
use xtrees_io::IoError;

/// Stage-level category of a job failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input missing or unreadable, or output not writable.
    DataAccess,
    /// Input present but malformed.
    Format,
    /// Required columns absent.
    Schema,
    /// Coercion or fitting failed.
    Training,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::DataAccess => "data access error",
            ErrorKind::Format => "format error",
            ErrorKind::Schema => "schema error",
            ErrorKind::Training => "training error",
        })
    }
}

/// Errors raised while turning selected columns into a fitted model.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    /// Returned when a predictor cell is text rather than a number.
    #[error("predictor \"{column}\" has non-numeric value \"{value}\" at row {row_index}")]
    NonNumericFeature {
        column: String,
        row_index: usize,
        value: String,
    },

    /// Returned when a predictor cell is empty or a missing-value token.
    #[error("predictor \"{column}\" is missing at row {row_index}")]
    MissingFeature { column: String, row_index: usize },

    /// Returned when a response cell is empty or a missing-value token.
    #[error("response is missing at row {row_index}")]
    MissingResponse { row_index: usize },

    /// Returned when predictors and response disagree in row count.
    #[error("{n_predictor_rows} predictor rows but {n_response} response values")]
    RowCountMismatch {
        n_predictor_rows: usize,
        n_response: usize,
    },

    /// Returned when the ensemble rejects the data or configuration.
    #[error("ensemble fitting failed")]
    Fit(#[from] ForestError),

    /// Returned when the fitted model cannot be encoded as an artifact.
    #[error("fitted model cannot be encoded")]
    EncodeModel(#[source] ForestError),
}

/// A failed training job, tagged with the stage category that failed.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("data access error")]
    DataAccess(#[source] IoError),

    #[error("format error")]
    Format(#[source] IoError),

    #[error("schema error")]
    Schema(#[source] IoError),

    #[error("training error")]
    Training(#[source] TrainingError),
}

impl JobError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobError::DataAccess(_) => ErrorKind::DataAccess,
            JobError::Format(_) => ErrorKind::Format,
            JobError::Schema(_) => ErrorKind::Schema,
            JobError::Training(_) => ErrorKind::Training,
        }
    }
}

impl From<IoError> for JobError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::CsvParse { .. }
            | IoError::MissingHeader { .. }
            | IoError::DuplicateColumn { .. }
            | IoError::InconsistentRowLength { .. } => JobError::Format(err),
            IoError::MissingResponseColumn { .. } | IoError::NoPredictorColumns { .. } => {
                JobError::Schema(err)
            }
            IoError::FileNotFound { .. }
            | IoError::ReadFile { .. }
            | IoError::OutputDir { .. }
            | IoError::WriteFile { .. } => JobError::DataAccess(err),
            IoError::EncodeArtifact(source) => JobError::Training(TrainingError::EncodeModel(source)),
        }
    }
}

impl From<TrainingError> for JobError {
    fn from(err: TrainingError) -> Self {
        JobError::Training(err)
    }
}
