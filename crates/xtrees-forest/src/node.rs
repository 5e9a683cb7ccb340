use std::fmt;

/// Zero-based predictor column index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Position of a node inside a tree's arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node impurity under the configured criterion.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Impurity(f64);

impl Impurity {
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw impurity value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `true` when the node holds a single class.
    #[must_use]
    pub fn is_pure(self) -> bool {
        self.0 <= f64::EPSILON
    }
}

impl fmt::Display for Impurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// A node in a decision tree arena.
///
/// Children are referenced by [`NodeIndex`], so a tree is a flat `Vec<Node>`
/// that serializes without any pointer fix-up.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Node {
    /// An interior split: `row[feature] <= threshold` goes left.
    Split {
        feature: FeatureIndex,
        threshold: f64,
        left: NodeIndex,
        right: NodeIndex,
        impurity: Impurity,
        n_samples: usize,
        /// Weighted impurity decrease (MDI numerator) produced by this split.
        impurity_decrease: f64,
    },
    /// A terminal node holding the class distribution of its training samples.
    Leaf {
        prediction: usize,
        distribution: Vec<f64>,
        impurity: Impurity,
        n_samples: usize,
    },
}

impl Node {
    /// Build a leaf from raw class counts.
    pub(crate) fn leaf(class_counts: &[usize], impurity: Impurity) -> Self {
        let n_samples: usize = class_counts.iter().sum();
        let total = n_samples.max(1) as f64;
        let distribution = class_counts.iter().map(|&c| c as f64 / total).collect();
        // Ties resolve to the lowest class index.
        let prediction = class_counts
            .iter()
            .enumerate()
            .fold((0, 0), |best, (idx, &c)| if c > best.1 { (idx, c) } else { best })
            .0;
        Node::Leaf {
            prediction,
            distribution,
            impurity,
            n_samples,
        }
    }

    #[must_use]
    pub fn impurity(&self) -> Impurity {
        match self {
            Node::Split { impurity, .. } | Node::Leaf { impurity, .. } => *impurity,
        }
    }

    #[must_use]
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Split { n_samples, .. } | Node::Leaf { n_samples, .. } => *n_samples,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureIndex, Impurity, Node};

    #[test]
    fn feature_index_display_is_prefixed() {
        assert_eq!(FeatureIndex::new(3).to_string(), "f3");
    }

    #[test]
    fn impurity_purity_threshold() {
        assert!(Impurity::new(0.0).is_pure());
        assert!(!Impurity::new(0.25).is_pure());
    }

    #[test]
    fn leaf_from_counts_normalizes_distribution() {
        let leaf = Node::leaf(&[1, 3], Impurity::new(0.56));
        match leaf {
            Node::Leaf {
                prediction,
                distribution,
                n_samples,
                ..
            } => {
                assert_eq!(prediction, 1);
                assert_eq!(n_samples, 4);
                assert!((distribution[0] - 0.25).abs() < f64::EPSILON);
                assert!((distribution[1] - 0.75).abs() < f64::EPSILON);
            }
            Node::Split { .. } => panic!("expected a leaf"),
        }
    }

    #[test]
    fn leaf_tie_prefers_lowest_class() {
        let leaf = Node::leaf(&[2, 2, 1], Impurity::new(1.0));
        assert!(leaf.is_leaf());
        assert!(matches!(leaf, Node::Leaf { prediction: 0, .. }));
    }
}
