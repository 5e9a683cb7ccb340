//! Criterion benchmarks for xtrees-forest: ensemble fitting and prediction.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use xtrees_forest::{ForestConfig, MaxFeatures, SplitCriterion, SplitMethod};

fn make_classification(
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    seed: u64,
) -> (Vec<Vec<f64>>, Vec<String>, Vec<String>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
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

fn job_like(n_trees: usize) -> ForestConfig {
    ForestConfig::new(n_trees)
        .unwrap()
        .with_max_features(MaxFeatures::Fixed(50))
        .with_criterion(SplitCriterion::Entropy)
        .with_min_samples_split(5)
        .with_max_depth(Some(50))
        .with_min_samples_leaf(5)
        .with_seed(42)
}

fn bench_extra_trees_fit(c: &mut Criterion) {
    let (features, labels, names) = make_classification(1000, 60, 2, 42);
    let cfg = job_like(50);

    c.bench_function("extra_trees_fit_1000x60_2class_50trees", |b| {
        b.iter(|| cfg.fit(&features, &labels, &names).unwrap());
    });
}

fn bench_best_split_fit(c: &mut Criterion) {
    let (features, labels, names) = make_classification(1000, 60, 2, 42);
    let cfg = job_like(50).with_split_method(SplitMethod::Best).with_bootstrap(true);

    c.bench_function("best_split_fit_1000x60_2class_50trees", |b| {
        b.iter(|| cfg.fit(&features, &labels, &names).unwrap());
    });
}

fn bench_predict_batch(c: &mut Criterion) {
    let (features, labels, names) = make_classification(1000, 60, 2, 42);
    let forest = job_like(100).fit(&features, &labels, &names).unwrap().into_forest();

    c.bench_function("predict_batch_1000x60_100trees", |b| {
        b.iter(|| forest.predict_batch(&features).unwrap());
    });
}

criterion_group!(benches, bench_extra_trees_fit, bench_best_split_fit, bench_predict_batch);
criterion_main!(benches);
