use std::path::PathBuf;

/// Errors from ensemble configuration, fitting, prediction and persistence.
#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    /// Returned when n_trees is zero.
    #[error("n_trees must be at least 1, got {n_trees}")]
    InvalidTreeCount {
        /// The invalid n_trees value provided.
        n_trees: usize,
    },

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid max_depth value provided.
        max_depth: usize,
    },

    /// Returned when min_samples_split is less than 2.
    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit {
        /// The invalid min_samples_split value provided.
        min_samples_split: usize,
    },

    /// Returned when min_samples_leaf is zero.
    #[error("min_samples_leaf must be at least 1, got {min_samples_leaf}")]
    InvalidMinSamplesLeaf {
        /// The invalid min_samples_leaf value provided.
        min_samples_leaf: usize,
    },

    /// Returned when max_features resolves to 0 or exceeds n_features.
    #[error("max_features resolved to {max_features}, but must be in [1, {n_features}]")]
    InvalidMaxFeatures {
        /// The resolved max_features value.
        max_features: usize,
        /// The number of features in the dataset.
        n_features: usize,
    },

    /// Returned when the requested parallelism degree is zero.
    #[error("n_jobs must be at least 1, got {n_jobs}")]
    InvalidJobCount {
        /// The invalid n_jobs value provided.
        n_jobs: usize,
    },

    /// Returned when the training dataset has zero samples.
    #[error("training dataset has zero samples")]
    EmptyDataset,

    /// Returned when the training dataset has zero feature columns.
    #[error("training dataset has zero feature columns")]
    ZeroFeatures,

    /// Returned when the number of feature names does not match the column count.
    #[error("got {got} feature names for {expected} feature columns")]
    FeatureNameMismatch {
        /// The number of feature columns.
        expected: usize,
        /// The number of names supplied.
        got: usize,
    },

    /// Returned when predictor rows and response values disagree in length.
    #[error("predictor matrix has {n_rows} rows but response has {n_labels} values")]
    LabelCountMismatch {
        /// Number of predictor rows.
        n_rows: usize,
        /// Number of response values.
        n_labels: usize,
    },

    /// Returned when a sample has a different number of features than expected.
    #[error("sample {sample_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the sample.
        got: usize,
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when a sample has a different number of features at prediction time.
    #[error("prediction input has {got} features, expected {expected}")]
    PredictionFeatureMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the prediction input.
        got: usize,
    },

    /// Returned when a training value is NaN or infinite.
    #[error("non-finite value at sample {sample_index}, feature {feature_index}")]
    NonFiniteValue {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The zero-based index of the offending feature column.
        feature_index: usize,
    },

    /// Returned when the response contains a single distinct class.
    #[error("response has a single class \"{class}\", need at least 2 to fit a classifier")]
    SingleClass {
        /// The only class present.
        class: String,
    },

    /// Returned when the dataset is smaller than `min_samples_split`.
    #[error("{n_samples} samples cannot satisfy min_samples_split = {min_samples_split}")]
    InsufficientSamples {
        /// Number of training samples.
        n_samples: usize,
        /// The configured minimum split size.
        min_samples_split: usize,
    },

    /// Returned when the dedicated rayon pool cannot be built.
    #[error("failed to build a thread pool with {n_jobs} threads")]
    ThreadPool {
        /// Requested thread count.
        n_jobs: usize,
        /// The underlying rayon error.
        source: rayon::ThreadPoolBuildError,
    },

    /// Returned when artifact serialization fails.
    #[error("failed to serialize model artifact")]
    SerializeArtifact {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when artifact deserialization fails.
    #[error("failed to deserialize model artifact from {path}")]
    DeserializeArtifact {
        /// Path to the artifact that could not be decoded.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when reading an artifact file fails.
    #[error("failed to read model artifact from {path}")]
    ReadArtifact {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading an artifact with an incompatible format version.
    #[error("incompatible artifact version in {path}: expected {expected}, found {found}")]
    IncompatibleArtifactVersion {
        /// The format version this build expects.
        expected: u32,
        /// The format version found in the file.
        found: u32,
        /// Path to the artifact.
        path: PathBuf,
    },

    /// Returned when an artifact lacks the requested entry.
    #[error("artifact has no entry named \"{key}\"")]
    MissingArtifactEntry {
        /// The entry name that was looked up.
        key: String,
    },
}
