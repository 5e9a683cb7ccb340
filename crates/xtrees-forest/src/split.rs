use rand::Rng;

use crate::node::{FeatureIndex, Impurity};

/// Criterion for measuring the quality of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SplitCriterion {
    /// Gini impurity: 1 - Σ(p_i²)
    Gini,
    /// Information entropy: -Σ(p_i · ln(p_i))
    Entropy,
}

impl SplitCriterion {
    /// Compute the impurity of a node from its class counts.
    ///
    /// An empty node is pure.
    #[must_use]
    pub fn impurity(&self, class_counts: &[usize], n_samples: usize) -> Impurity {
        if n_samples == 0 {
            return Impurity::new(0.0);
        }
        let n = n_samples as f64;
        let proportions = class_counts.iter().filter(|&&c| c > 0).map(|&c| c as f64 / n);
        let value = match self {
            SplitCriterion::Gini => 1.0 - proportions.map(|p| p * p).sum::<f64>(),
            SplitCriterion::Entropy => -proportions.map(|p| p * p.ln()).sum::<f64>(),
        };
        Impurity::new(value.max(0.0))
    }
}

/// How a threshold is chosen for each candidate feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SplitMethod {
    /// Exhaustive scan of every boundary between sorted values (CART).
    Best,
    /// One threshold drawn uniformly between the node's min and max value
    /// (extremely randomized trees).
    Random,
}

/// Result of finding a split for a node.
#[derive(Debug, Clone)]
pub(crate) struct SplitResult {
    pub(crate) feature: FeatureIndex,
    pub(crate) threshold: f64,
    /// `n · I(parent) - n_l · I(left) - n_r · I(right)`
    pub(crate) impurity_decrease: f64,
    pub(crate) left_indices: Vec<usize>,
    pub(crate) right_indices: Vec<usize>,
}

/// Read-only view of the node being split.
pub(crate) struct NodeSamples<'a> {
    /// Column-major: `columns[feature_idx][sample_idx]`.
    pub(crate) columns: &'a [Vec<f64>],
    pub(crate) labels: &'a [usize],
    pub(crate) indices: &'a [usize],
    pub(crate) class_counts: &'a [usize],
    pub(crate) impurity: Impurity,
}

/// Split-search knobs that stay fixed for a whole tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitSearch {
    pub(crate) criterion: SplitCriterion,
    pub(crate) method: SplitMethod,
    pub(crate) max_features: usize,
    pub(crate) min_samples_leaf: usize,
}

impl SplitSearch {
    /// Find the best split among randomly drawn features.
    ///
    /// Features are visited in a random order; constant features are skipped
    /// without counting against `max_features`, so up to `max_features`
    /// non-constant features are evaluated. Returns `None` when no candidate
    /// satisfies `min_samples_leaf` or every feature is constant.
    pub(crate) fn find(&self, node: &NodeSamples<'_>, rng: &mut impl Rng) -> Option<SplitResult> {
        let n_features = node.columns.len();
        let n_samples = node.indices.len();
        if n_samples < 2 || n_features == 0 {
            return None;
        }

        let mut order: Vec<usize> = (0..n_features).collect();
        let mut evaluated = 0usize;
        let mut best: Option<(FeatureIndex, f64, f64)> = None;

        for i in 0..n_features {
            if evaluated >= self.max_features {
                break;
            }
            let j = rng.gen_range(i..n_features);
            order.swap(i, j);
            let feat_idx = order[i];

            let candidate = match self.method {
                SplitMethod::Best => self.scan_best(node, feat_idx),
                SplitMethod::Random => self.draw_random(node, feat_idx, rng),
            };
            let Some(candidate) = candidate else {
                continue;
            };
            evaluated += 1;

            if let Some((threshold, decrease)) = candidate.threshold
                && best.is_none_or(|(_, _, best_decrease)| decrease > best_decrease)
            {
                best = Some((FeatureIndex::new(feat_idx), threshold, decrease));
            }
        }

        let (feature, threshold, impurity_decrease) = best?;
        let column = &node.columns[feature.index()];
        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = node
            .indices
            .iter()
            .copied()
            .partition(|&si| column[si] <= threshold);

        Some(SplitResult {
            feature,
            threshold,
            impurity_decrease,
            left_indices,
            right_indices,
        })
    }

    /// Sort the node's values and score every boundary between distinct values.
    fn scan_best(&self, node: &NodeSamples<'_>, feat_idx: usize) -> Option<Candidate> {
        let column = &node.columns[feat_idx];
        let mut sorted: Vec<(f64, usize)> = node
            .indices
            .iter()
            .map(|&si| (column[si], node.labels[si]))
            .collect();
        sorted.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let n_samples = sorted.len();
        if sorted[0].0 == sorted[n_samples - 1].0 {
            return None;
        }

        let mut left_counts = vec![0usize; node.class_counts.len()];
        let mut right_counts = node.class_counts.to_vec();
        let mut best: Option<(f64, f64)> = None;

        for i in 0..(n_samples - 1) {
            let (value, class) = sorted[i];
            left_counts[class] += 1;
            right_counts[class] -= 1;

            let next = sorted[i + 1].0;
            if value == next {
                continue;
            }
            let n_left = i + 1;
            let n_right = n_samples - n_left;
            if n_left < self.min_samples_leaf || n_right < self.min_samples_leaf {
                continue;
            }

            let decrease = self.decrease(node, &left_counts, n_left, &right_counts, n_right);
            if best.is_none_or(|(_, d)| decrease > d) {
                best = Some((midpoint(value, next), decrease));
            }
        }

        Some(Candidate { threshold: best })
    }

    /// Draw a single threshold uniformly in `[min, max)` of the node's values.
    fn draw_random(
        &self,
        node: &NodeSamples<'_>,
        feat_idx: usize,
        rng: &mut impl Rng,
    ) -> Option<Candidate> {
        let column = &node.columns[feat_idx];
        let (min, max) = node
            .indices
            .iter()
            .map(|&si| column[si])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min >= max {
            return None;
        }

        let threshold = uniform_between(min, max, rng.r#gen());
        let mut left_counts = vec![0usize; node.class_counts.len()];
        let mut n_left = 0usize;
        for &si in node.indices {
            if column[si] <= threshold {
                left_counts[node.labels[si]] += 1;
                n_left += 1;
            }
        }
        let n_right = node.indices.len() - n_left;
        if n_left < self.min_samples_leaf || n_right < self.min_samples_leaf {
            return Some(Candidate { threshold: None });
        }

        let right_counts: Vec<usize> = node
            .class_counts
            .iter()
            .zip(&left_counts)
            .map(|(&total, &left)| total - left)
            .collect();
        let decrease = self.decrease(node, &left_counts, n_left, &right_counts, n_right);
        Some(Candidate {
            threshold: Some((threshold, decrease)),
        })
    }

    fn decrease(
        &self,
        node: &NodeSamples<'_>,
        left_counts: &[usize],
        n_left: usize,
        right_counts: &[usize],
        n_right: usize,
    ) -> f64 {
        let left = self.criterion.impurity(left_counts, n_left);
        let right = self.criterion.impurity(right_counts, n_right);
        (node.indices.len() as f64) * node.impurity.value()
            - (n_left as f64) * left.value()
            - (n_right as f64) * right.value()
    }
}

/// Midpoint of `lo < hi` that stays finite for any finite inputs and is
/// strictly below `hi`.
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo / 2.0 + hi / 2.0;
    if mid < hi { mid } else { lo }
}

/// Map `u` in `[0, 1)` onto `[lo, hi)` without computing `hi - lo`, which
/// overflows for finite bounds of opposite sign near `f64::MAX`.
fn uniform_between(lo: f64, hi: f64, u: f64) -> f64 {
    let t = lo * (1.0 - u) + hi * u;
    if t >= hi { lo } else { t.max(lo) }
}

/// Outcome of evaluating one non-constant feature.
///
/// `threshold` is `None` when no admissible boundary exists for the feature.
struct Candidate {
    threshold: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{NodeSamples, SplitCriterion, SplitMethod, SplitSearch, midpoint, uniform_between};

    fn search(method: SplitMethod, max_features: usize, min_samples_leaf: usize) -> SplitSearch {
        SplitSearch {
            criterion: SplitCriterion::Entropy,
            method,
            max_features,
            min_samples_leaf,
        }
    }

    fn node<'a>(
        columns: &'a [Vec<f64>],
        labels: &'a [usize],
        indices: &'a [usize],
        class_counts: &'a [usize],
    ) -> NodeSamples<'a> {
        NodeSamples {
            columns,
            labels,
            indices,
            class_counts,
            impurity: SplitCriterion::Entropy.impurity(class_counts, indices.len()),
        }
    }

    #[test]
    fn entropy_balanced_binary_is_ln_two() {
        let imp = SplitCriterion::Entropy.impurity(&[5, 5], 10);
        assert!((imp.value() - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn gini_and_entropy_agree_on_pure_nodes() {
        assert!(SplitCriterion::Gini.impurity(&[0, 7], 7).is_pure());
        assert!(SplitCriterion::Entropy.impurity(&[7, 0, 0], 7).is_pure());
    }

    #[test]
    fn best_split_separates_two_clusters() {
        let columns = vec![vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0]];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..6).collect();
        let counts = [3, 3];
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let split = search(SplitMethod::Best, 1, 1)
            .find(&node(&columns, &labels, &indices, &counts), &mut rng)
            .expect("separable column must split");
        assert!(split.threshold > 3.0 && split.threshold < 10.0);
        assert_eq!(split.left_indices, vec![0, 1, 2]);
        assert_eq!(split.right_indices, vec![3, 4, 5]);
    }

    #[test]
    fn random_split_threshold_within_node_range() {
        let columns = vec![vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0]];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..6).collect();
        let counts = [3, 3];

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let Some(split) = search(SplitMethod::Random, 1, 1)
                .find(&node(&columns, &labels, &indices, &counts), &mut rng)
            {
                assert!(split.threshold >= 1.0 && split.threshold < 12.0);
                assert!(!split.left_indices.is_empty());
                assert!(!split.right_indices.is_empty());
            }
        }
    }

    #[test]
    fn constant_features_yield_no_split() {
        let columns = vec![vec![4.0; 4], vec![9.0; 4]];
        let labels = vec![0, 1, 0, 1];
        let indices: Vec<usize> = (0..4).collect();
        let counts = [2, 2];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for method in [SplitMethod::Best, SplitMethod::Random] {
            let found = search(method, 2, 1).find(&node(&columns, &labels, &indices, &counts), &mut rng);
            assert!(found.is_none());
        }
    }

    #[test]
    fn constant_feature_does_not_consume_budget() {
        // Only column 1 is informative; with max_features = 1 it must still be found.
        let columns = vec![vec![5.0; 6], vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0]];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..6).collect();
        let counts = [3, 3];

        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let split = search(SplitMethod::Best, 1, 1)
                .find(&node(&columns, &labels, &indices, &counts), &mut rng)
                .expect("informative column must be reached");
            assert_eq!(split.feature.index(), 1);
        }
    }

    #[test]
    fn extreme_finite_range_splits_without_overflow() {
        let columns = vec![vec![-1e308, 1e308, -1e308, 1e308, -1e308, 1e308]];
        let labels = vec![0, 1, 0, 1, 0, 1];
        let indices: Vec<usize> = (0..6).collect();
        let counts = [3, 3];

        for method in [SplitMethod::Best, SplitMethod::Random] {
            for seed in 0..20 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let split = search(method, 1, 1)
                    .find(&node(&columns, &labels, &indices, &counts), &mut rng)
                    .expect("two distinct values must split");
                assert!(split.threshold.is_finite());
                assert_eq!(split.left_indices, vec![0, 2, 4]);
                assert_eq!(split.right_indices, vec![1, 3, 5]);
            }
        }
    }

    #[test]
    fn uniform_between_stays_in_half_open_range() {
        assert_eq!(uniform_between(-f64::MAX, f64::MAX, 0.0), -f64::MAX);
        assert!(uniform_between(-f64::MAX, f64::MAX, 0.999_999).is_finite());
        assert!(uniform_between(1.0, 1.0 + f64::EPSILON, 1.0 - f64::EPSILON) < 1.0 + f64::EPSILON);
        let t = uniform_between(2.0, 4.0, 0.5);
        assert!((t - 3.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_stays_below_upper_bound() {
        assert_eq!(midpoint(-f64::MAX, f64::MAX), 0.0);
        assert_eq!(midpoint(1.0, 3.0), 2.0);
        let hi = 1.0 + f64::EPSILON;
        assert!(midpoint(1.0, hi) < hi);
    }

    #[test]
    fn min_samples_leaf_blocks_small_children() {
        let columns = vec![vec![1.0, 10.0]];
        let labels = vec![0, 1];
        let indices = vec![0, 1];
        let counts = [1, 1];
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let found = search(SplitMethod::Best, 1, 2).find(&node(&columns, &labels, &indices, &counts), &mut rng);
        assert!(found.is_none());
    }
}
