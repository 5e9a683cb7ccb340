//! Tree ensemble classification: fit, predict, persist.
//!
//! Provides hand-rolled extremely randomized trees (and bootstrapped
//! best-split random forests) over arena-based decision trees, with
//! Gini/Entropy criteria, parallel fitting via rayon, mean-decrease-in-impurity
//! feature importance, and a versioned bincode model artifact.

mod artifact;
mod config;
mod error;
mod fit;
mod forest;
mod importance;
mod labels;
mod node;
mod predict;
mod result;
mod split;
mod tree;

pub use artifact::{MODEL_KEY, ModelArtifact};
pub use config::{ForestConfig, MaxFeatures};
pub use error::ForestError;
pub use fit::{EnsembleFitter, FittedModel, TreeEnsembleFitter};
pub use forest::Forest;
pub use importance::RankedFeature;
pub use node::{FeatureIndex, Impurity, Node, NodeIndex};
pub use predict::ClassDistribution;
pub use result::{ForestResult, TrainingMetadata};
pub use split::{SplitCriterion, SplitMethod};
pub use tree::{DecisionTree, DecisionTreeConfig};
