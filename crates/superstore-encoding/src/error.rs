//! Error types for categorical encoding.

use crate::field::Field;
use thiserror::Error;

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

/// Errors that can occur while building or using label encoders.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// A value is outside the vocabulary of its field or encoder.
    #[error("Unknown {field} value: {value:?}")]
    UnknownCategory {
        /// Field the value was supplied for
        field: Field,
        /// The rejected value
        value: String,
    },

    /// An encoder artifact lists a class the vocabulary does not contain.
    #[error("Encoder for {field} lists unrecognized class {class:?}")]
    UnrecognizedClass {
        /// Field of the encoder
        field: Field,
        /// Offending class string
        class: String,
    },

    /// An encoder artifact lists the same class twice.
    #[error("Encoder for {field} lists class {class:?} more than once")]
    DuplicateClass {
        /// Field of the encoder
        field: Field,
        /// Duplicated class string
        class: String,
    },

    /// An encoder artifact has no classes.
    #[error("Encoder for {0} has no classes")]
    EmptyVocabulary(Field),

    /// An encoder artifact was written for a different field.
    #[error("Encoder field mismatch: expected {expected}, found {actual}")]
    FieldMismatch {
        /// Field the caller asked for
        expected: Field,
        /// Field recorded in the artifact
        actual: Field,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodingError {
    /// Build an [`EncodingError::UnknownCategory`] for `field`.
    pub fn unknown(field: Field, value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            field,
            value: value.into(),
        }
    }

    /// Returns true if this error rejects a single request value rather than
    /// a malformed artifact.
    pub const fn is_unknown_category(&self) -> bool {
        matches!(self, Self::UnknownCategory { .. })
    }
}
