#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/superstore-analytics/superstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod encoder;
pub mod error;
pub mod field;
pub mod set;
pub mod vocabulary;

pub use encoder::{EncoderArtifact, LabelEncoder};
pub use error::{EncodingError, Result};
pub use field::Field;
pub use set::{EncoderSet, VocabularyDrift};
pub use vocabulary::{Category, Region, Segment, ShipMode, Vocabulary};
