//! Configuration builder for ensemble training.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::error::ForestError;
use crate::result::ForestResult;
use crate::split::{SplitCriterion, SplitMethod};

/// Strategy for the number of features evaluated at each split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxFeatures {
    /// Square root of total features.
    Sqrt,
    /// Log base 2 of total features.
    Log2,
    /// A fraction of total features (must be in (0.0, 1.0]).
    Fraction(f64),
    /// A fixed count, capped at the number of available features.
    Fixed(usize),
    /// All features (no subsampling).
    All,
}

impl MaxFeatures {
    /// Resolve to a concrete count for a dataset with `n_features` columns.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::InvalidMaxFeatures`] when the count resolves to
    /// zero or a fraction asks for more than every feature.
    pub fn resolve(self, n_features: usize) -> Result<usize, ForestError> {
        let resolved = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().ceil() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().ceil().max(1.0) as usize,
            MaxFeatures::Fraction(f) => (n_features as f64 * f).ceil() as usize,
            MaxFeatures::Fixed(n) => {
                if n > n_features {
                    debug!(requested = n, n_features, "max_features capped at feature count");
                }
                n.min(n_features)
            }
            MaxFeatures::All => n_features,
        };
        if resolved == 0 || resolved > n_features {
            return Err(ForestError::InvalidMaxFeatures {
                max_features: resolved,
                n_features,
            });
        }
        Ok(resolved)
    }
}

/// Configuration for ensemble training.
///
/// Construct via [`ForestConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter           | Default                      |
/// |---------------------|------------------------------|
/// | `max_features`      | `Sqrt`                       |
/// | `max_depth`         | `None`                       |
/// | `min_samples_split` | 2                            |
/// | `min_samples_leaf`  | 1                            |
/// | `criterion`         | `Gini`                       |
/// | `split_method`      | `Random`                     |
/// | `bootstrap`         | `false`                      |
/// | `seed`              | `None` (drawn from entropy)  |
/// | `n_jobs`            | `None` (global rayon pool)   |
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    pub(crate) n_trees: usize,
    pub(crate) max_features: MaxFeatures,
    pub(crate) max_depth: Option<usize>,
    pub(crate) min_samples_split: usize,
    pub(crate) min_samples_leaf: usize,
    pub(crate) criterion: SplitCriterion,
    pub(crate) split_method: SplitMethod,
    pub(crate) bootstrap: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) n_jobs: Option<usize>,
}

impl ForestConfig {
    /// Create a new config with the given number of trees.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::InvalidTreeCount`] if `n_trees` is zero.
    pub fn new(n_trees: usize) -> Result<Self, ForestError> {
        let Some(count) = NonZeroUsize::new(n_trees) else {
            return Err(ForestError::InvalidTreeCount { n_trees });
        };
        Ok(Self::from_tree_count(count))
    }

    /// Infallible constructor for a tree count known to be non-zero.
    #[must_use]
    pub fn from_tree_count(n_trees: NonZeroUsize) -> Self {
        Self {
            n_trees: n_trees.get(),
            max_features: MaxFeatures::Sqrt,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            criterion: SplitCriterion::Gini,
            split_method: SplitMethod::Random,
            bootstrap: false,
            seed: None,
            n_jobs: None,
        }
    }

    // --- Setters ---

    #[must_use]
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Set the maximum tree depth. `None` means unlimited.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    #[must_use]
    pub fn with_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    #[must_use]
    pub fn with_split_method(mut self, split_method: SplitMethod) -> Self {
        self.split_method = split_method;
        self
    }

    /// Draw each tree's training rows with replacement instead of using all rows.
    #[must_use]
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Fix the master seed; the fitted model is then fully reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit trees on a dedicated pool of `n_jobs` threads.
    #[must_use]
    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }

    // --- Getters ---

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    #[must_use]
    pub fn max_features(&self) -> MaxFeatures {
        self.max_features
    }

    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    #[must_use]
    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    #[must_use]
    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    #[must_use]
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    #[must_use]
    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn n_jobs(&self) -> Option<usize> {
        self.n_jobs
    }

    /// Train an ensemble on the provided dataset.
    ///
    /// `features[sample_idx][feature_idx]` is row-major; `response[sample_idx]`
    /// is the class label of each row; `feature_names` names each column.
    ///
    /// # Errors
    ///
    /// | Variant                                 | When                                             |
    /// |-----------------------------------------|--------------------------------------------------|
    /// | [`ForestError::EmptyDataset`]           | `features` is empty                              |
    /// | [`ForestError::ZeroFeatures`]           | rows have zero columns                           |
    /// | [`ForestError::LabelCountMismatch`]     | `response.len() != features.len()`               |
    /// | [`ForestError::FeatureCountMismatch`]   | rows have inconsistent lengths                   |
    /// | [`ForestError::NonFiniteValue`]         | any value is NaN or infinite                     |
    /// | [`ForestError::FeatureNameMismatch`]    | `feature_names` does not match the column count  |
    /// | [`ForestError::SingleClass`]            | the response holds one distinct class            |
    /// | [`ForestError::InsufficientSamples`]    | fewer rows than `min_samples_split`              |
    /// | [`ForestError::InvalidMaxFeatures`]     | max_features resolves to zero or too many        |
    /// | [`ForestError::InvalidJobCount`]        | `n_jobs` is zero                                 |
    /// | [`ForestError::ThreadPool`]             | the dedicated pool cannot be created             |
    pub fn fit<S: AsRef<str>>(
        &self,
        features: &[Vec<f64>],
        response: &[S],
        feature_names: &[String],
    ) -> Result<ForestResult, ForestError> {
        crate::forest::train(self, features, response, feature_names)
    }
}
