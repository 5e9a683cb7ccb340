//! Ensemble training with parallel tree construction.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, instrument};

use crate::config::ForestConfig;
use crate::error::ForestError;
use crate::importance::aggregate_importances;
use crate::labels;
use crate::result::{ForestResult, TrainingMetadata};
use crate::tree::{DecisionTree, DecisionTreeConfig};

/// A fitted tree ensemble classifier.
///
/// Predictions average the leaf class distributions of every tree and map
/// the winning class index back to its original label.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Forest {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) n_features: usize,
    pub(crate) classes: Vec<String>,
    pub(crate) feature_names: Vec<String>,
}

/// Check a row-major matrix against its label count and return its width.
pub(crate) fn validate_matrix(features: &[Vec<f64>], n_labels: usize) -> Result<usize, ForestError> {
    let Some(first) = features.first() else {
        return Err(ForestError::EmptyDataset);
    };
    let n_features = first.len();
    if n_features == 0 {
        return Err(ForestError::ZeroFeatures);
    }
    if features.len() != n_labels {
        return Err(ForestError::LabelCountMismatch {
            n_rows: features.len(),
            n_labels,
        });
    }
    for (sample_index, row) in features.iter().enumerate() {
        if row.len() != n_features {
            return Err(ForestError::FeatureCountMismatch {
                expected: n_features,
                got: row.len(),
                sample_index,
            });
        }
        if let Some(feature_index) = row.iter().position(|v| !v.is_finite()) {
            return Err(ForestError::NonFiniteValue {
                sample_index,
                feature_index,
            });
        }
    }
    Ok(n_features)
}

/// Transpose row-major features into `columns[feature_idx][sample_idx]`.
pub(crate) fn to_columns(features: &[Vec<f64>], n_features: usize) -> Vec<Vec<f64>> {
    (0..n_features)
        .map(|feat_idx| features.iter().map(|row| row[feat_idx]).collect())
        .collect()
}

/// Rows a single tree trains on: all of them, or a bootstrap draw.
fn tree_rows(n_samples: usize, bootstrap: bool, rng: &mut impl Rng) -> Vec<usize> {
    if bootstrap {
        (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
    } else {
        (0..n_samples).collect()
    }
}

/// Train the ensemble.
#[instrument(skip_all, fields(n_trees = config.n_trees, n_samples = features.len()))]
pub(crate) fn train<S: AsRef<str>>(
    config: &ForestConfig,
    features: &[Vec<f64>],
    response: &[S],
    feature_names: &[String],
) -> Result<ForestResult, ForestError> {
    // --- Validate inputs ---
    let n_features = validate_matrix(features, response.len())?;
    let n_samples = features.len();
    if feature_names.len() != n_features {
        return Err(ForestError::FeatureNameMismatch {
            expected: n_features,
            got: feature_names.len(),
        });
    }

    let encoded = labels::encode(response);
    if let [only] = encoded.classes.as_slice() {
        return Err(ForestError::SingleClass {
            class: only.clone(),
        });
    }
    let n_classes = encoded.classes.len();

    if n_samples < config.min_samples_split {
        return Err(ForestError::InsufficientSamples {
            n_samples,
            min_samples_split: config.min_samples_split,
        });
    }

    // --- Validate config ---
    let max_features_resolved = config.max_features.resolve(n_features)?;
    let tree_template = DecisionTreeConfig::new()
        .with_criterion(config.criterion)
        .with_split_method(config.split_method)
        .with_max_depth(config.max_depth)
        .with_min_samples_split(config.min_samples_split)
        .with_min_samples_leaf(config.min_samples_leaf)
        .with_max_features(Some(max_features_resolved));
    tree_template.validate(n_features)?;

    let pool = match config.n_jobs {
        Some(0) => return Err(ForestError::InvalidJobCount { n_jobs: 0 }),
        Some(n_jobs) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(n_jobs)
                .build()
                .map_err(|source| ForestError::ThreadPool { n_jobs, source })?,
        ),
        None => None,
    };

    let master_seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());

    info!(
        n_trees = config.n_trees,
        n_samples,
        n_features,
        n_classes,
        max_features = max_features_resolved,
        split_method = ?config.split_method,
        criterion = ?config.criterion,
        bootstrap = config.bootstrap,
        n_jobs = ?config.n_jobs,
        "training tree ensemble"
    );

    // Per-tree seeds come from the master RNG so results do not depend on scheduling.
    let mut master_rng = ChaCha8Rng::seed_from_u64(master_seed);
    let tree_seeds: Vec<u64> = (0..config.n_trees).map(|_| master_rng.r#gen()).collect();

    let columns = to_columns(features, n_features);
    let labels = encoded.indices.as_slice();
    let bootstrap = config.bootstrap;

    let grow_all = || -> Vec<DecisionTree> {
        tree_seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let rows = tree_rows(n_samples, bootstrap, &mut rng);
                tree_template
                    .clone()
                    .with_seed(rng.r#gen())
                    .fit_columns(&columns, labels, &rows, n_classes)
            })
            .collect()
    };
    let trees = match &pool {
        Some(pool) => pool.install(grow_all),
        None => grow_all(),
    };

    let per_tree_importances: Vec<Vec<f64>> =
        trees.iter().map(DecisionTree::feature_importances).collect();
    let importances = aggregate_importances(&per_tree_importances, feature_names);

    debug!(
        n_trees_trained = trees.len(),
        total_nodes = trees.iter().map(DecisionTree::n_nodes).sum::<usize>(),
        max_depth_reached = trees.iter().map(DecisionTree::depth).max().unwrap_or(0),
        "tree growth complete"
    );

    let forest = Forest {
        trees,
        n_features,
        classes: encoded.classes,
        feature_names: feature_names.to_vec(),
    };

    let metadata = TrainingMetadata {
        n_trees: config.n_trees,
        n_features,
        n_classes,
        n_samples,
        max_features_resolved,
        seed: master_seed,
    };

    info!("tree ensemble training complete");

    Ok(ForestResult::new(forest, importances, metadata))
}

#[cfg(test)]
mod tests {
    use crate::config::{ForestConfig, MaxFeatures};
    use crate::split::{SplitCriterion, SplitMethod};
    use crate::ForestError;

    /// Three well-separated classes along `x`, with a constant `y`.
    fn make_separable_data() -> (Vec<Vec<f64>>, Vec<String>, Vec<String>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (class, offset) in [("low", 0.0), ("mid", 10.0), ("high", 20.0)] {
            for i in 0..20 {
                features.push(vec![offset + f64::from(i) * 0.15, 0.5]);
                labels.push(class.to_string());
            }
        }
        let names = vec!["x".to_string(), "y".to_string()];
        (features, labels, names)
    }

    fn accuracy(config: &ForestConfig) -> f64 {
        let (features, labels, names) = make_separable_data();
        let result = config.fit(&features, &labels, &names).unwrap();
        let predictions = result.forest().predict_batch(&features).unwrap();
        let correct = predictions.iter().zip(&labels).filter(|(p, l)| p == l).count();
        correct as f64 / labels.len() as f64
    }

    #[test]
    fn extra_trees_fit_separable_classes() {
        let config = ForestConfig::new(30)
            .unwrap()
            .with_criterion(SplitCriterion::Entropy)
            .with_max_features(MaxFeatures::All)
            .with_seed(42);
        let acc = accuracy(&config);
        assert!(acc > 0.95, "extra-trees accuracy = {acc}");
    }

    #[test]
    fn bootstrapped_best_split_forest_fits_separable_classes() {
        let config = ForestConfig::new(30)
            .unwrap()
            .with_split_method(SplitMethod::Best)
            .with_bootstrap(true)
            .with_seed(42);
        let acc = accuracy(&config);
        assert!(acc > 0.9, "random-forest accuracy = {acc}");
    }

    #[test]
    fn classes_keep_original_labels() {
        let (features, labels, names) = make_separable_data();
        let result = ForestConfig::new(5).unwrap().with_seed(1).fit(&features, &labels, &names).unwrap();
        assert_eq!(result.forest().classes(), &["high", "low", "mid"]);
        assert_eq!(result.metadata().n_classes, 3);
    }

    #[test]
    fn same_seed_same_forest() {
        let (features, labels, names) = make_separable_data();
        let config = ForestConfig::new(10).unwrap().with_seed(99);
        let a = config.fit(&features, &labels, &names).unwrap();
        let b = config.fit(&features, &labels, &names).unwrap();
        assert_eq!(
            bincode::serialize(a.forest()).unwrap(),
            bincode::serialize(b.forest()).unwrap()
        );
    }

    #[test]
    fn dedicated_pool_matches_global_pool() {
        let (features, labels, names) = make_separable_data();
        let config = ForestConfig::new(12).unwrap().with_seed(3);
        let global = config.fit(&features, &labels, &names).unwrap();
        let pooled = config.clone().with_n_jobs(2).fit(&features, &labels, &names).unwrap();
        assert_eq!(
            bincode::serialize(global.forest()).unwrap(),
            bincode::serialize(pooled.forest()).unwrap()
        );
    }

    #[test]
    fn unseeded_fit_records_drawn_seed() {
        let (features, labels, names) = make_separable_data();
        let result = ForestConfig::new(3).unwrap().fit(&features, &labels, &names).unwrap();
        let replay = ForestConfig::new(3)
            .unwrap()
            .with_seed(result.metadata().seed)
            .fit(&features, &labels, &names)
            .unwrap();
        assert_eq!(
            bincode::serialize(result.forest()).unwrap(),
            bincode::serialize(replay.forest()).unwrap()
        );
    }

    #[test]
    fn single_class_rejected() {
        let features = vec![vec![1.0], vec![2.0], vec![3.0]];
        let err = ForestConfig::new(3)
            .unwrap()
            .fit(&features, &["a", "a", "a"], &["x".to_string()])
            .unwrap_err();
        assert!(matches!(err, ForestError::SingleClass { class } if class == "a"));
    }

    #[test]
    fn too_few_rows_for_min_split_rejected() {
        let features = vec![vec![1.0], vec![2.0], vec![3.0]];
        let err = ForestConfig::new(3)
            .unwrap()
            .with_min_samples_split(5)
            .fit(&features, &["a", "b", "a"], &["x".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            ForestError::InsufficientSamples { n_samples: 3, min_samples_split: 5 }
        ));
    }

    #[test]
    fn row_count_mismatch_rejected() {
        let features = vec![vec![1.0], vec![2.0]];
        let err = ForestConfig::new(3)
            .unwrap()
            .fit(&features, &["a"], &["x".to_string()])
            .unwrap_err();
        assert!(matches!(err, ForestError::LabelCountMismatch { n_rows: 2, n_labels: 1 }));
    }

    #[test]
    fn zero_jobs_rejected() {
        let (features, labels, names) = make_separable_data();
        let err = ForestConfig::new(3)
            .unwrap()
            .with_n_jobs(0)
            .fit(&features, &labels, &names)
            .unwrap_err();
        assert!(matches!(err, ForestError::InvalidJobCount { n_jobs: 0 }));
    }

    #[test]
    fn empty_dataset_rejected() {
        let empty: [&str; 0] = [];
        let err = ForestConfig::new(3).unwrap().fit(&[], &empty, &[]).unwrap_err();
        assert!(matches!(err, ForestError::EmptyDataset));
    }
}
