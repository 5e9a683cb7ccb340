//! Narrow fitting seam between a training pipeline and a classifier family.

use crate::config::ForestConfig;
use crate::error::ForestError;
use crate::forest::Forest;
use crate::importance::RankedFeature;

/// A fitted classifier that scores numeric predictor rows.
pub trait FittedModel {
    /// Number of predictor columns each row must have.
    fn n_features(&self) -> usize;

    /// Predicted class label for one row.
    ///
    /// # Errors
    ///
    /// Returns an error when the row width does not match [`FittedModel::n_features`].
    fn predict(&self, row: &[f64]) -> Result<&str, ForestError>;

    /// Class labels the model can emit, in index order.
    fn classes(&self) -> &[String];

    /// Ranked feature importances, most important first.
    fn feature_importances(&self) -> Vec<RankedFeature>;
}

/// Something that turns a labeled numeric matrix into a [`FittedModel`].
pub trait EnsembleFitter {
    type Model: FittedModel;

    /// Fit on every row of `predictors` against `response`.
    ///
    /// # Errors
    ///
    /// Returns the fitting algorithm's failure unchanged.
    fn fit(
        &self,
        predictors: &[Vec<f64>],
        response: &[String],
        feature_names: &[String],
        config: &ForestConfig,
    ) -> Result<Self::Model, ForestError>;
}

/// Fits [`Forest`] ensembles with the tree-growing strategy named in the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEnsembleFitter;

impl EnsembleFitter for TreeEnsembleFitter {
    type Model = Forest;

    fn fit(
        &self,
        predictors: &[Vec<f64>],
        response: &[String],
        feature_names: &[String],
        config: &ForestConfig,
    ) -> Result<Forest, ForestError> {
        config
            .fit(predictors, response, feature_names)
            .map(crate::result::ForestResult::into_forest)
    }
}

impl FittedModel for Forest {
    fn n_features(&self) -> usize {
        Forest::n_features(self)
    }

    fn predict(&self, row: &[f64]) -> Result<&str, ForestError> {
        Forest::predict(self, row)
    }

    fn classes(&self) -> &[String] {
        Forest::classes(self)
    }

    fn feature_importances(&self) -> Vec<RankedFeature> {
        Forest::feature_importances(self)
    }
}
