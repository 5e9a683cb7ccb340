//! Offline training job for an extremely randomized trees classifier.
//!
//! Reads `<work_dir>/py_train.tsv`, fits the ensemble described by
//! [`config::job_config`] against the `response` column, and writes the
//! fitted model to `<work_dir>/possible_model`.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod trainer;

pub use error::{ErrorKind, JobError, TrainingError};
pub use pipeline::{TrainSummary, run, run_with_config, run_with_fitter};
