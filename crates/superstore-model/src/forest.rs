//! Random forest regressor.
//!
//! The prediction is the unweighted mean of the tree predictions, matching
//! scikit-learn's `RandomForestRegressor.predict`.

use crate::artifact::{FORMAT_VERSION, ModelArtifact, ModelKind};
use crate::error::{ModelError, Result};
use crate::metrics::ModelMetrics;
use crate::regressor::{RegressionModel, check_finite};
use crate::tree::DecisionTree;
use std::path::Path;

/// An ensemble of regression trees.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    metrics: ModelMetrics,
}

impl RandomForestRegressor {
    /// Create a forest from validated trees.
    ///
    /// # Errors
    /// Fails if there are no trees or a tree expects a different number of
    /// features than `feature_names` lists.
    pub fn new(trees: Vec<DecisionTree>, feature_names: Vec<String>) -> Result<Self> {
        if trees.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }
        if let Some(tree) = trees
            .iter()
            .find(|t| t.n_features() != feature_names.len())
        {
            return Err(ModelError::DimensionMismatch {
                expected: feature_names.len(),
                actual: tree.n_features(),
            });
        }

        Ok(Self {
            trees,
            feature_names,
            metrics: ModelMetrics::default(),
        })
    }

    /// Attach recorded quality metrics.
    pub const fn with_metrics(mut self, metrics: ModelMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Decode a model artifact.
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: artifact.format_version,
                supported: FORMAT_VERSION,
            });
        }

        let n_features = artifact.feature_names.len();
        let trees = artifact
            .trees
            .iter()
            .enumerate()
            .map(|(tree, t)| {
                DecisionTree::from_artifact(t, n_features)
                    .map_err(|source| ModelError::InvalidTree { tree, source })
            })
            .collect::<Result<Vec<_>>>()?;

        let forest = Self::new(trees, artifact.feature_names.clone())?;
        Ok(match artifact.metrics {
            Some(metrics) => forest.with_metrics(metrics),
            None => forest,
        })
    }

    /// Load a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = ModelArtifact::load(path)?;
        let forest = Self::from_artifact(&artifact)?;

        tracing::debug!(
            trees = forest.n_trees(),
            features = forest.n_features(),
            path = %path.display(),
            "loaded random forest"
        );

        Ok(forest)
    }

    /// Serialized form of this forest.
    pub fn to_artifact(&self) -> ModelArtifact {
        ModelArtifact {
            format_version: FORMAT_VERSION,
            kind: ModelKind::RandomForest,
            feature_names: self.feature_names.clone(),
            metrics: Some(self.metrics),
            trees: self.trees.iter().map(DecisionTree::to_artifact).collect(),
        }
    }

    /// Feature names in input order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Recorded quality metrics.
    pub const fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    /// Number of trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Trees of the ensemble.
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl RegressionModel for RandomForestRegressor {
    fn name(&self) -> &str {
        "Random Forest"
    }

    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        check_finite(features)?;

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }
        let prediction = sum / self.trees.len() as f64;

        if !prediction.is_finite() {
            return Err(ModelError::NonFiniteOutput(prediction));
        }
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeArtifact;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("x{i}")).collect()
    }

    fn split_on(feature: i64, threshold: f64, low: f64, high: f64) -> DecisionTree {
        let artifact = TreeArtifact {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![0.0, low, high],
        };
        DecisionTree::from_artifact(&artifact, 2).unwrap()
    }

    #[test]
    fn test_prediction_is_mean_of_trees() {
        let forest = RandomForestRegressor::new(
            vec![
                split_on(0, 5.0, 10.0, 20.0),
                split_on(1, 1.0, 100.0, 300.0),
                DecisionTree::constant(60.0, 2),
            ],
            names(2),
        )
        .unwrap();

        // 10 + 300 + 60
        assert_relative_eq!(forest.predict(&[1.0, 2.0]).unwrap(), 370.0 / 3.0);
        // 20 + 100 + 60
        assert_relative_eq!(forest.predict(&[6.0, 0.5]).unwrap(), 60.0);
    }

    #[test]
    fn test_batch_matches_single() {
        let forest = RandomForestRegressor::new(
            vec![split_on(0, 5.0, 10.0, 20.0), split_on(1, 1.0, 0.0, 2.0)],
            names(2),
        )
        .unwrap();

        let x = array![[1.0, 0.0], [9.0, 4.0], [5.0, 1.0]];
        let batch = forest.predict_batch(&x).unwrap();
        for (i, row) in x.rows().into_iter().enumerate() {
            assert_relative_eq!(batch[i], forest.predict(&row.to_vec()).unwrap());
        }

        let wrong = array![[1.0, 2.0, 3.0]];
        assert!(forest.predict_batch(&wrong).is_err());
    }

    #[test]
    fn test_rejects_bad_input() {
        let forest = RandomForestRegressor::new(vec![DecisionTree::constant(1.0, 2)], names(2))
            .unwrap();
        assert!(matches!(
            forest.predict(&[1.0]),
            Err(ModelError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            forest.predict(&[1.0, f64::NAN]),
            Err(ModelError::NonFiniteInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_new_validates_ensemble() {
        assert!(matches!(
            RandomForestRegressor::new(vec![], names(2)),
            Err(ModelError::EmptyEnsemble)
        ));
        assert!(matches!(
            RandomForestRegressor::new(vec![DecisionTree::constant(1.0, 3)], names(2)),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_artifact_round_trip() {
        let forest = RandomForestRegressor::new(
            vec![split_on(0, 5.0, 10.0, 20.0), DecisionTree::constant(7.0, 2)],
            names(2),
        )
        .unwrap()
        .with_metrics(ModelMetrics::new(0.5, 1.0, 2.0));

        let decoded = RandomForestRegressor::from_artifact(&forest.to_artifact()).unwrap();
        assert_eq!(decoded, forest);
    }

    #[test]
    fn test_invalid_tree_reports_index() {
        let mut artifact = RandomForestRegressor::new(
            vec![DecisionTree::constant(1.0, 2), split_on(0, 1.0, 0.0, 1.0)],
            names(2),
        )
        .unwrap()
        .to_artifact();
        artifact.trees[1].feature[0] = 9;

        match RandomForestRegressor::from_artifact(&artifact) {
            Err(ModelError::InvalidTree { tree, .. }) => assert_eq!(tree, 1),
            other => panic!("expected invalid tree, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_version() {
        let mut artifact =
            RandomForestRegressor::new(vec![DecisionTree::constant(1.0, 2)], names(2))
                .unwrap()
                .to_artifact();
        artifact.format_version = 99;
        assert!(matches!(
            RandomForestRegressor::from_artifact(&artifact),
            Err(ModelError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
