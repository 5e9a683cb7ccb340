//! Load, select, train, persist: the whole job in one pass.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};
use xtrees_forest::{EnsembleFitter, FittedModel, ForestConfig, ModelArtifact, TreeEnsembleFitter};
use xtrees_io::{DatasetReader, ModelWriter, select_features};

use crate::config::job_config;
use crate::error::JobError;
use crate::trainer::ModelTrainer;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainSummary {
    pub work_dir: PathBuf,
    pub model_path: PathBuf,
    pub n_samples: usize,
    pub n_features: usize,
    pub n_classes: usize,
    pub n_trees: usize,
}

/// Run the job with the fixed configuration from [`job_config`].
///
/// # Errors
///
/// See [`run_with_config`].
pub fn run(work_dir: &Path) -> Result<TrainSummary, JobError> {
    run_with_config(work_dir, &job_config())
}

/// Run the job with an explicit ensemble configuration.
///
/// # Errors
///
/// Returns the [`JobError`] of the first stage that fails; nothing is
/// written unless every earlier stage succeeded.
pub fn run_with_config(work_dir: &Path, config: &ForestConfig) -> Result<TrainSummary, JobError> {
    run_with_fitter(work_dir, ModelTrainer::with_fitter(TreeEnsembleFitter, config.clone()))
}

/// Run the job with any fitter whose model can be serialized.
///
/// # Errors
///
/// | Kind | Stage |
/// |---|---|
/// | `DataAccess` | input file missing or unreadable, output directory not writable |
/// | `Format` | malformed input |
/// | `Schema` | no `response` column, or nothing besides it |
/// | `Training` | coercion or fitting failed |
#[instrument(skip_all, fields(work_dir = %work_dir.display()))]
pub fn run_with_fitter<F>(work_dir: &Path, trainer: ModelTrainer<F>) -> Result<TrainSummary, JobError>
where
    F: EnsembleFitter,
    F::Model: Serialize,
{
    let dataset = DatasetReader::in_dir(work_dir).read()?;
    let n_samples = dataset.n_rows();

    let (response, predictors) = select_features(dataset)?;
    let n_features = predictors.n_columns();

    let model = trainer.train(&predictors, &response)?;
    let n_classes = model.classes().len();

    let writer = ModelWriter::new(work_dir)?;
    let model_path = writer.write(&ModelArtifact::new(model))?;

    info!(path = %model_path.display(), "training job complete");

    Ok(TrainSummary {
        work_dir: work_dir.to_path_buf(),
        model_path,
        n_samples,
        n_features,
        n_classes,
        n_trees: trainer.config().n_trees(),
    })
}
