//! Accuracy regression tests for xtrees-forest.
//!
//! Guard against algorithmic changes that degrade classification quality on
//! a deterministic synthetic dataset.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use xtrees_forest::{ForestConfig, MaxFeatures, ModelArtifact, SplitCriterion, SplitMethod};

// ---------------------------------------------------------------------------
// Helper: deterministic synthetic classification dataset
// ---------------------------------------------------------------------------

/// 300 rows, 10 features, 3 classes.
///
/// Features 0-2 are informative (class * 3.0 + noise in [0, 0.5]);
/// features 3-9 are pure noise in [0, 0.5].
fn make_classification(seed: u64) -> (Vec<Vec<f64>>, Vec<String>, Vec<String>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n_samples = 300;
    let n_features = 10;
    let n_classes = 3;

    let mut features = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = i % n_classes;
        labels.push(class.to_string());
        let row: Vec<f64> = (0..n_features)
            .map(|f| {
                let base = if f < 3 { class as f64 * 3.0 } else { 0.0 };
                base + rng.r#gen::<f64>() * 0.5
            })
            .collect();
        features.push(row);
    }
    let names: Vec<String> = (0..n_features).map(|f| format!("f{f}")).collect();
    (features, labels, names)
}

fn accuracy(predicted: &[&str], expected: &[String]) -> f64 {
    let correct = predicted.iter().zip(expected).filter(|(p, e)| **p == e.as_str()).count();
    correct as f64 / expected.len() as f64
}

fn extra_trees(n_trees: usize) -> ForestConfig {
    ForestConfig::new(n_trees)
        .unwrap()
        .with_criterion(SplitCriterion::Entropy)
        .with_max_features(MaxFeatures::Fixed(50))
        .with_min_samples_split(5)
        .with_min_samples_leaf(5)
        .with_max_depth(Some(50))
        .with_seed(42)
}

/// Held-out accuracy of the job-shaped extra-trees config.
#[test]
fn held_out_accuracy_above_threshold() {
    let (train_x, train_y, names) = make_classification(42);
    let (test_x, test_y, _) = make_classification(7);

    let forest = extra_trees(100).fit(&train_x, &train_y, &names).unwrap().into_forest();
    let predicted = forest.predict_batch(&test_x).unwrap();
    let acc = accuracy(&predicted, &test_y);
    assert!(acc > 0.95, "held-out accuracy {acc} <= 0.95");
}

/// Best-split bootstrapped forests must stay competitive on the same data.
#[test]
fn best_split_held_out_accuracy_above_threshold() {
    let (train_x, train_y, names) = make_classification(42);
    let (test_x, test_y, _) = make_classification(7);

    let forest = ForestConfig::new(100)
        .unwrap()
        .with_split_method(SplitMethod::Best)
        .with_bootstrap(true)
        .with_seed(42)
        .fit(&train_x, &train_y, &names)
        .unwrap()
        .into_forest();
    let acc = accuracy(&forest.predict_batch(&test_x).unwrap(), &test_y);
    assert!(acc > 0.95, "held-out accuracy {acc} <= 0.95");
}

/// Informative features must outrank every noise feature.
#[test]
fn informative_features_rank_first() {
    let (features, labels, names) = make_classification(42);
    let result = extra_trees(100).fit(&features, &labels, &names).unwrap();

    let top3: Vec<&str> = result.importances()[..3].iter().map(|f| f.name.as_str()).collect();
    for name in ["f0", "f1", "f2"] {
        assert!(top3.contains(&name), "{name} missing from top-3 {top3:?}");
    }
}

/// The serialized artifact is byte-identical across runs with a fixed seed.
#[test]
fn artifact_bytes_reproducible_with_seed() {
    let (features, labels, names) = make_classification(42);
    let first = extra_trees(25).fit(&features, &labels, &names).unwrap().into_forest();
    let second = extra_trees(25).fit(&features, &labels, &names).unwrap().into_forest();

    assert_eq!(
        ModelArtifact::new(first).to_bytes().unwrap(),
        ModelArtifact::new(second).to_bytes().unwrap()
    );
}
