use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{instrument, trace};

use crate::{
    ForestError,
    node::{Node, NodeIndex},
    split::{NodeSamples, SplitCriterion, SplitMethod, SplitSearch},
};

/// Configuration for a single decision tree.
///
/// # Defaults
///
/// | Parameter           | Default               |
/// |---------------------|-----------------------|
/// | `criterion`         | `Gini`                |
/// | `split_method`      | `Best`                |
/// | `max_depth`         | `None` (unlimited)    |
/// | `min_samples_split` | 2                     |
/// | `min_samples_leaf`  | 1                     |
/// | `max_features`      | `None` (all features) |
/// | `seed`              | 42                    |
#[derive(Debug, Clone)]
pub struct DecisionTreeConfig {
    pub(crate) criterion: SplitCriterion,
    pub(crate) split_method: SplitMethod,
    pub(crate) max_depth: Option<usize>,
    pub(crate) min_samples_split: usize,
    pub(crate) min_samples_leaf: usize,
    pub(crate) max_features: Option<usize>,
    pub(crate) seed: u64,
}

impl DecisionTreeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            criterion: SplitCriterion::Gini,
            split_method: SplitMethod::Best,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
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

    /// Limit depth to `d` levels below the root (root is depth 0).
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

    /// Number of non-constant features evaluated per split. `None` means all.
    #[must_use]
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit a tree on a row-major dataset with zero-based class labels.
    ///
    /// # Errors
    ///
    /// | Variant                                  | When                                            |
    /// |------------------------------------------|-------------------------------------------------|
    /// | [`ForestError::EmptyDataset`]            | `features` is empty                             |
    /// | [`ForestError::ZeroFeatures`]            | rows have zero columns                          |
    /// | [`ForestError::LabelCountMismatch`]      | `labels.len() != features.len()`                |
    /// | [`ForestError::FeatureCountMismatch`]    | rows have inconsistent lengths                  |
    /// | [`ForestError::NonFiniteValue`]          | any value is NaN or infinite                    |
    /// | [`ForestError::InvalidMaxFeatures`]      | `max_features` outside `[1, n_features]`        |
    /// | [`ForestError::InvalidMaxDepth`]         | `max_depth` is `Some(0)`                        |
    /// | [`ForestError::InvalidMinSamplesSplit`]  | `min_samples_split < 2`                         |
    /// | [`ForestError::InvalidMinSamplesLeaf`]   | `min_samples_leaf < 1`                          |
    pub fn fit(&self, features: &[Vec<f64>], labels: &[usize]) -> Result<DecisionTree, ForestError> {
        let n_features = crate::forest::validate_matrix(features, labels.len())?;
        self.validate(n_features)?;

        let n_classes = labels.iter().max().copied().unwrap_or(0) + 1;
        let columns = crate::forest::to_columns(features, n_features);
        let indices: Vec<usize> = (0..features.len()).collect();
        Ok(self.fit_columns(&columns, labels, &indices, n_classes))
    }

    pub(crate) fn validate(&self, n_features: usize) -> Result<(), ForestError> {
        if let Some(d) = self.max_depth
            && d == 0
        {
            return Err(ForestError::InvalidMaxDepth { max_depth: 0 });
        }
        if self.min_samples_split < 2 {
            return Err(ForestError::InvalidMinSamplesSplit {
                min_samples_split: self.min_samples_split,
            });
        }
        if self.min_samples_leaf < 1 {
            return Err(ForestError::InvalidMinSamplesLeaf {
                min_samples_leaf: self.min_samples_leaf,
            });
        }
        let max_features = self.max_features.unwrap_or(n_features);
        if max_features == 0 || max_features > n_features {
            return Err(ForestError::InvalidMaxFeatures {
                max_features,
                n_features,
            });
        }
        Ok(())
    }

    /// Grow a tree over `indices` of a pre-validated column-major dataset.
    ///
    /// `indices` may contain repeats (bootstrap draws).
    #[instrument(level = "trace", skip_all, fields(n_samples = indices.len()))]
    pub(crate) fn fit_columns(
        &self,
        columns: &[Vec<f64>],
        labels: &[usize],
        indices: &[usize],
        n_classes: usize,
    ) -> DecisionTree {
        let n_features = columns.len();
        let mut grower = Grower {
            columns,
            labels,
            n_classes,
            config: self,
            search: SplitSearch {
                criterion: self.criterion,
                method: self.split_method,
                max_features: self.max_features.unwrap_or(n_features),
                min_samples_leaf: self.min_samples_leaf,
            },
            rng: ChaCha8Rng::seed_from_u64(self.seed),
            arena: Vec::new(),
        };
        grower.grow(indices, 0);

        trace!(n_nodes = grower.arena.len(), "decision tree grown");
        DecisionTree {
            nodes: grower.arena,
            n_features,
            n_classes,
        }
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state for growing one tree depth-first into an arena.
struct Grower<'a> {
    columns: &'a [Vec<f64>],
    labels: &'a [usize],
    n_classes: usize,
    config: &'a DecisionTreeConfig,
    search: SplitSearch,
    rng: ChaCha8Rng,
    arena: Vec<Node>,
}

impl Grower<'_> {
    fn grow(&mut self, indices: &[usize], depth: usize) -> NodeIndex {
        let n_samples = indices.len();
        let mut class_counts = vec![0usize; self.n_classes];
        for &si in indices {
            class_counts[self.labels[si]] += 1;
        }
        let impurity = self.config.criterion.impurity(&class_counts, n_samples);

        let at_max_depth = self.config.max_depth.is_some_and(|max_d| depth >= max_d);
        // A node that cannot give both children min_samples_leaf is never split.
        let too_small = n_samples < self.config.min_samples_split
            || n_samples < 2 * self.config.min_samples_leaf;

        let split = if at_max_depth || too_small || impurity.is_pure() {
            None
        } else {
            let node = NodeSamples {
                columns: self.columns,
                labels: self.labels,
                indices,
                class_counts: &class_counts,
                impurity,
            };
            self.search.find(&node, &mut self.rng)
        };

        let Some(split) = split else {
            return self.push(Node::leaf(&class_counts, impurity));
        };

        // Reserve the parent slot so children get higher indices.
        let slot = self.push(Node::leaf(&class_counts, impurity));
        let left = self.grow(&split.left_indices, depth + 1);
        let right = self.grow(&split.right_indices, depth + 1);
        self.arena[slot.index()] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
            impurity,
            n_samples,
            impurity_decrease: split.impurity_decrease,
        };
        slot
    }

    fn push(&mut self, node: Node) -> NodeIndex {
        self.arena.push(node);
        NodeIndex::new(self.arena.len() - 1)
    }
}

/// A fitted decision tree stored as a flat node arena rooted at index 0.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) n_features: usize,
    pub(crate) n_classes: usize,
}

impl DecisionTree {
    /// Predict the class index for a single sample.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn predict(&self, sample: &[f64]) -> Result<usize, ForestError> {
        match self.leaf_for(sample)? {
            Node::Leaf { prediction, .. } => Ok(*prediction),
            Node::Split { .. } => unreachable!("leaf_for always ends at a leaf"),
        }
    }

    /// Return the class distribution of the leaf reached by `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn predict_proba(&self, sample: &[f64]) -> Result<&[f64], ForestError> {
        match self.leaf_for(sample)? {
            Node::Leaf { distribution, .. } => Ok(distribution),
            Node::Split { .. } => unreachable!("leaf_for always ends at a leaf"),
        }
    }

    /// Mean decrease in impurity per feature, normalized to sum to 1.0.
    ///
    /// All zeros when the tree is a single leaf.
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.n_features];
        for node in &self.nodes {
            if let Node::Split {
                feature,
                impurity_decrease,
                ..
            } = node
            {
                totals[feature.index()] += impurity_decrease;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }

    /// The node arena; index 0 is the root.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Depth of the deepest leaf; a lone root leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0usize;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((idx, d)) = stack.pop() {
            match self.nodes.get(idx) {
                Some(Node::Split { left, right, .. }) => {
                    stack.push((left.index(), d + 1));
                    stack.push((right.index(), d + 1));
                }
                Some(Node::Leaf { .. }) => max_depth = max_depth.max(d),
                None => {}
            }
        }
        max_depth
    }

    fn leaf_for(&self, sample: &[f64]) -> Result<&Node, ForestError> {
        if sample.len() != self.n_features {
            return Err(ForestError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: sample.len(),
            });
        }
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                leaf @ Node::Leaf { .. } => return Ok(leaf),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if sample[feature.index()] <= *threshold {
                        left.index()
                    } else {
                        right.index()
                    };
                }
            }
        }
    }
}
