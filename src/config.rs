//! Fixed hyperparameters of the training job.

use std::num::NonZeroUsize;

use xtrees_forest::{ForestConfig, MaxFeatures, SplitCriterion, SplitMethod};

/// Trees in the ensemble.
pub const N_TREES: NonZeroUsize = NonZeroUsize::new(700).unwrap();
/// Features drawn per split, capped at the predictor count.
pub const MAX_FEATURES: usize = 50;
pub const MIN_SAMPLES_SPLIT: usize = 5;
pub const MAX_DEPTH: usize = 50;
pub const MIN_SAMPLES_LEAF: usize = 5;
pub const CRITERION: SplitCriterion = SplitCriterion::Entropy;

/// The ensemble the job fits: extremely randomized trees without bootstrap.
///
/// Seed and parallelism are left unset; callers may set them on the
/// returned value.
#[must_use]
pub fn job_config() -> ForestConfig {
    ForestConfig::from_tree_count(N_TREES)
        .with_max_features(MaxFeatures::Fixed(MAX_FEATURES))
        .with_criterion(CRITERION)
        .with_min_samples_split(MIN_SAMPLES_SPLIT)
        .with_max_depth(Some(MAX_DEPTH))
        .with_min_samples_leaf(MIN_SAMPLES_LEAF)
        .with_split_method(SplitMethod::Random)
        .with_bootstrap(false)
}
