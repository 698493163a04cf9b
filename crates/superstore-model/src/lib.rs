#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/superstore-analytics/superstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod error;
pub mod forest;
pub mod metrics;
pub mod regressor;
pub mod tree;

pub use artifact::{FORMAT_VERSION, ModelArtifact, ModelKind};
pub use error::{ModelError, Result, TreeError};
pub use forest::RandomForestRegressor;
pub use metrics::ModelMetrics;
pub use regressor::RegressionModel;
pub use tree::{DecisionTree, TreeArtifact};
