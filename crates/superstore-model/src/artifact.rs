//! Model artifact format.

use crate::error::Result;
use crate::metrics::ModelMetrics;
use crate::tree::TreeArtifact;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Artifact format version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// Model family stored in an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Mean of regression trees
    RandomForest,
}

/// Serialized trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Format version
    pub format_version: u32,

    /// Model family
    pub kind: ModelKind,

    /// Names of the input features, in the order the model was fit on
    pub feature_names: Vec<String>,

    /// Hold-out metrics recorded at training time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ModelMetrics>,

    /// Trees of the ensemble
    pub trees: Vec<TreeArtifact>,
}

impl ModelArtifact {
    /// Read an artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the artifact as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}
