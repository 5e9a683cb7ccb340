//! Coercion of selected columns and ensemble fitting.

use tracing::{info, instrument};
use xtrees_forest::{EnsembleFitter, FittedModel, ForestConfig, TreeEnsembleFitter};
use xtrees_io::{PredictorMatrix, ResponseVector, Value};

use crate::error::TrainingError;

/// Feature importances reported after fitting.
const TOP_IMPORTANCES: usize = 5;

/// Numeric predictors and string labels ready for an [`EnsembleFitter`].
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<String>,
    pub feature_names: Vec<String>,
}

/// Render a response cell as a class label.
///
/// Integral numbers print without a fractional part so that `1` and `1.0`
/// name the same class.
fn response_label(value: &Value, row_index: usize) -> Result<String, TrainingError> {
    match value {
        Value::Numeric(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
            Ok(format!("{}", *v as i64))
        }
        Value::Numeric(v) => Ok(v.to_string()),
        Value::Categorical(s) => Ok(s.clone()),
        Value::Missing => Err(TrainingError::MissingResponse { row_index }),
    }
}

/// Coerce predictor cells to `f64` and response cells to labels.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TrainingError::RowCountMismatch`] | row counts differ |
/// | [`TrainingError::NonNumericFeature`] | a predictor cell is text |
/// | [`TrainingError::MissingFeature`] | a predictor cell is missing |
/// | [`TrainingError::MissingResponse`] | a response cell is missing |
pub fn coerce(
    predictors: &PredictorMatrix,
    response: &ResponseVector,
) -> Result<TrainingData, TrainingError> {
    if predictors.n_rows() != response.len() {
        return Err(TrainingError::RowCountMismatch {
            n_predictor_rows: predictors.n_rows(),
            n_response: response.len(),
        });
    }

    let names = predictors.names();
    let features = predictors
        .rows()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            row.iter()
                .zip(names)
                .map(|(value, column)| match value {
                    Value::Numeric(v) => Ok(*v),
                    Value::Categorical(s) => Err(TrainingError::NonNumericFeature {
                        column: column.clone(),
                        row_index,
                        value: s.clone(),
                    }),
                    Value::Missing => Err(TrainingError::MissingFeature {
                        column: column.clone(),
                        row_index,
                    }),
                })
                .collect::<Result<Vec<f64>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let labels = response
        .values()
        .iter()
        .enumerate()
        .map(|(row_index, value)| response_label(value, row_index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrainingData {
        features,
        labels,
        feature_names: names.to_vec(),
    })
}

/// Fits a model from a configuration through an [`EnsembleFitter`].
#[derive(Debug, Clone)]
pub struct ModelTrainer<F = TreeEnsembleFitter> {
    fitter: F,
    config: ForestConfig,
}

impl ModelTrainer<TreeEnsembleFitter> {
    #[must_use]
    pub fn new(config: ForestConfig) -> Self {
        Self::with_fitter(TreeEnsembleFitter, config)
    }
}

impl<F: EnsembleFitter> ModelTrainer<F> {
    #[must_use]
    pub fn with_fitter(fitter: F, config: ForestConfig) -> Self {
        Self { fitter, config }
    }

    #[must_use]
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Coerce the selected columns and fit on every row.
    ///
    /// # Errors
    ///
    /// Any coercion failure from [`coerce`], or [`TrainingError::Fit`] when
    /// the fitter rejects the data.
    #[instrument(skip_all, fields(n_rows = response.len(), n_predictors = predictors.n_columns()))]
    pub fn train(
        &self,
        predictors: &PredictorMatrix,
        response: &ResponseVector,
    ) -> Result<F::Model, TrainingError> {
        let data = coerce(predictors, response)?;
        let model = self
            .fitter
            .fit(&data.features, &data.labels, &data.feature_names, &self.config)?;

        for feature in model.feature_importances().iter().take(TOP_IMPORTANCES) {
            info!(
                rank = feature.rank,
                feature = %feature.name,
                importance = feature.importance,
                "feature importance"
            );
        }
        info!(n_classes = model.classes().len(), "model fitted");

        Ok(model)
    }
}
