//! Error types for prediction requests and artifact loading.

use std::path::PathBuf;
use superstore_encoding::{EncodingError, Field};
use superstore_model::ModelError;
use thiserror::Error;

/// Result type for prediction requests.
pub type Result<T> = std::result::Result<T, PredictError>;

/// A numeric order field outside its allowed range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} must be between {min} and {max}, got {value}")]
pub struct DomainValidationError {
    /// Field name
    pub field: &'static str,
    /// Rejected value
    pub value: f64,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

/// Errors that fail a single prediction request.
#[derive(Debug, Error)]
pub enum PredictError {
    /// A categorical value is not in the vocabulary of its encoder
    #[error("Unknown {field} value: {value:?}")]
    UnknownCategory {
        /// Field the value was supplied for
        field: Field,
        /// The rejected value
        value: String,
    },

    /// A numeric value is out of range
    #[error(transparent)]
    DomainValidation(#[from] DomainValidationError),

    /// Encoder failure other than an unknown value
    #[error("Encoding error: {0}")]
    Encoding(EncodingError),

    /// Model failed to produce a prediction
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl From<EncodingError> for PredictError {
    fn from(err: EncodingError) -> Self {
        match err {
            EncodingError::UnknownCategory { field, value } => {
                Self::UnknownCategory { field, value }
            }
            other => Self::Encoding(other),
        }
    }
}

impl PredictError {
    /// Short machine-readable error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => "unknown_category",
            Self::DomainValidation(_) => "domain_validation",
            Self::Encoding(_) => "encoding",
            Self::Model(_) => "model",
        }
    }
}

/// Failure of a batch of prediction requests.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A single row was rejected
    #[error("Row {row}: {source}")]
    Row {
        /// 1-based row number
        row: usize,
        /// Why the row was rejected
        #[source]
        source: PredictError,
    },

    /// Batch inference failed
    #[error("Batch inference failed: {0}")]
    Model(#[from] ModelError),
}

/// Errors that prevent the predictor from starting.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    /// Artifact file does not exist
    #[error("Artifact not found: {}", .0.display())]
    Missing(PathBuf),

    /// Encoder artifact is unreadable or invalid
    #[error("Failed to load encoder {}: {source}", path.display())]
    Encoder {
        /// Artifact path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: EncodingError,
    },

    /// Model artifact is unreadable or invalid
    #[error("Failed to load model {}: {source}", path.display())]
    Model {
        /// Artifact path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: ModelError,
    },

    /// Model was fit on a different feature layout
    #[error("Model feature order mismatch: expected {expected:?}, found {found:?}")]
    FeatureOrder {
        /// Layout the request builder produces
        expected: Vec<String>,
        /// Layout recorded in the model
        found: Vec<String>,
    },

    /// Model expects a different number of features
    #[error("Model expects {found} features, request builder produces {expected}")]
    FeatureCount {
        /// Features the request builder produces
        expected: usize,
        /// Features the model expects
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_conversion() {
        let err: PredictError = EncodingError::unknown(Field::Category, "Gadgets").into();
        assert_eq!(err.kind(), "unknown_category");
        assert_eq!(err.to_string(), "Unknown Category value: \"Gadgets\"");
    }

    #[test]
    fn test_domain_validation_message() {
        let err = DomainValidationError {
            field: "quantity",
            value: 150.0,
            min: 1.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 100, got 150");
        assert_eq!(PredictError::from(err).kind(), "domain_validation");
    }
}
