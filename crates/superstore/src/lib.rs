#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/superstore-analytics/superstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifacts;
pub mod error;
pub mod features;
pub mod order;
pub mod predictor;

pub use artifacts::{ArtifactPaths, Artifacts, MODEL_FILE_NAME};
pub use error::{ArtifactLoadError, BatchError, DomainValidationError, PredictError, Result};
pub use features::{EncodedFeatureVector, FEATURE_NAMES, N_FEATURES, quarter};
pub use order::{OrderInputRecord, WEEKDAY_NAMES, parse_weekday, weekday_index, weekday_name};
pub use predictor::{FieldOption, FieldOptions, Prediction, PredictionResult, Predictor};

pub use superstore_encoding as encoding;
pub use superstore_model as model;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
