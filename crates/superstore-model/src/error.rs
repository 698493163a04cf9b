//! Error types for model loading and inference.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while loading or evaluating a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input has the wrong number of features
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch {
        /// Features the model was fit on
        expected: usize,
        /// Features supplied
        actual: usize,
    },

    /// Input contains NaN or infinity
    #[error("Feature {index} is not finite: {value}")]
    NonFiniteInput {
        /// Position in the feature vector
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Model produced NaN or infinity
    #[error("Model produced a non-finite prediction: {0}")]
    NonFiniteOutput(f64),

    /// A tree failed validation
    #[error("Invalid tree {tree}: {source}")]
    InvalidTree {
        /// Index of the tree in the ensemble
        tree: usize,
        /// What is wrong with it
        #[source]
        source: TreeError,
    },

    /// Ensemble has no trees
    #[error("Ensemble has no trees")]
    EmptyEnsemble,

    /// Artifact format version is not supported
    #[error("Unsupported model format version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version in the artifact
        found: u32,
        /// Version this build reads
        supported: u32,
    },

    /// Metric inputs are unusable
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems in a single decision tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// Tree has no nodes
    #[error("tree has no nodes")]
    Empty,

    /// Node arrays differ in length
    #[error("node arrays differ in length ({0})")]
    LengthMismatch(String),

    /// Node has exactly one child
    #[error("node {node} has only one child")]
    HalfLeaf {
        /// Node index
        node: usize,
    },

    /// Child index does not point after its parent inside the tree
    #[error("node {node} links to invalid child {child}")]
    InvalidChild {
        /// Node index
        node: usize,
        /// Child index as stored
        child: i64,
    },

    /// Split feature index out of range
    #[error("node {node} splits on feature {feature}, model has {n_features}")]
    FeatureOutOfRange {
        /// Node index
        node: usize,
        /// Feature index as stored
        feature: i64,
        /// Number of model features
        n_features: usize,
    },

    /// Threshold or leaf value is NaN or infinite
    #[error("node {node} holds a non-finite value")]
    NonFinite {
        /// Node index
        node: usize,
    },
}
