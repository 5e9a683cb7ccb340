//! Training result types for ensemble fitting.

use crate::forest::Forest;
use crate::importance::RankedFeature;

/// Metadata about the training run.
#[derive(Debug, Clone)]
pub struct TrainingMetadata {
    /// Number of trees trained.
    pub n_trees: usize,
    /// Number of predictor columns.
    pub n_features: usize,
    /// Number of distinct response classes.
    pub n_classes: usize,
    /// Number of training rows.
    pub n_samples: usize,
    /// Resolved max_features value used at every split.
    pub max_features_resolved: usize,
    /// Master seed the per-tree seeds were derived from.
    pub seed: u64,
}

/// Result of ensemble training: the fitted forest, ranked feature
/// importances and training metadata.
#[derive(Debug)]
pub struct ForestResult {
    forest: Forest,
    importances: Vec<RankedFeature>,
    metadata: TrainingMetadata,
}

impl ForestResult {
    pub(crate) fn new(
        forest: Forest,
        importances: Vec<RankedFeature>,
        metadata: TrainingMetadata,
    ) -> Self {
        Self {
            forest,
            importances,
            metadata,
        }
    }

    /// Borrow the fitted forest.
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Consume the result and return the fitted forest.
    #[must_use]
    pub fn into_forest(self) -> Forest {
        self.forest
    }

    /// Return the ranked feature importances, most important first.
    #[must_use]
    pub fn importances(&self) -> &[RankedFeature] {
        &self.importances
    }

    #[must_use]
    pub fn metadata(&self) -> &TrainingMetadata {
        &self.metadata
    }
}
