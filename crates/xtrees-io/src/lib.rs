//! Dataset ingestion, feature selection and artifact persistence for xtrees.

mod domain;
mod error;
mod reader;
mod select;
mod writer;

pub use domain::{Dataset, MISSING_TOKENS, PredictorMatrix, ResponseVector, Value};
pub use error::IoError;
pub use reader::{DatasetReader, INPUT_FILE};
pub use select::{RESPONSE_COLUMN, select_features};
pub use writer::{ModelWriter, OUTPUT_FILE};
