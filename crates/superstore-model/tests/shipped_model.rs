//! The model artifact shipped in the repository.

use approx::assert_relative_eq;
use ndarray::Array2;
use std::path::PathBuf;
use superstore_model::{ModelArtifact, RandomForestRegressor, RegressionModel};

fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts/sales_model.json")
}

#[test]
fn test_shipped_model_loads() {
    let forest = RandomForestRegressor::load(&model_path()).unwrap();
    assert_eq!(forest.n_features(), 11);
    assert_eq!(forest.feature_names()[0], "Quantity");
    assert_eq!(forest.feature_names()[10], "DayOfWeek");
    assert!(forest.n_trees() > 1);
    assert_relative_eq!(forest.metrics().r2, 0.83);
}

#[test]
fn test_prediction_is_mean_of_trees() {
    let forest = RandomForestRegressor::load(&model_path()).unwrap();
    let x = [5.0, 0.15, 100.0, 2.0, 0.0, 3.0, 3.0, 2024.0, 11.0, 4.0, 4.0];

    let mean = forest
        .trees()
        .iter()
        .map(|t| t.predict(&x).unwrap())
        .sum::<f64>()
        / forest.n_trees() as f64;
    assert_relative_eq!(forest.predict(&x).unwrap(), mean, epsilon = 1e-9);
}

#[test]
fn test_larger_orders_predict_more() {
    let forest = RandomForestRegressor::load(&model_path()).unwrap();
    let small = [1.0, 0.0, 20.0, 1.0, 0.0, 0.0, 3.0, 2024.0, 6.0, 2.0, 2.0];
    let large = [12.0, 0.0, 2000.0, 1.0, 0.0, 0.0, 3.0, 2024.0, 6.0, 2.0, 2.0];
    assert!(forest.predict(&large).unwrap() > forest.predict(&small).unwrap());
}

#[test]
fn test_batch_over_shipped_model() {
    let forest = RandomForestRegressor::load(&model_path()).unwrap();
    let mut x = Array2::<f64>::zeros((3, 11));
    for (i, mut row) in x.rows_mut().into_iter().enumerate() {
        row[0] = (i + 1) as f64;
        row[2] = 50.0;
        row[7] = 2023.0;
        row[8] = 1.0;
        row[9] = 1.0;
    }
    let batch = forest.predict_batch(&x).unwrap();
    assert_eq!(batch.len(), 3);
    for (i, row) in x.rows().into_iter().enumerate() {
        assert_relative_eq!(batch[i], forest.predict(&row.to_vec()).unwrap());
    }
}

#[test]
fn test_artifact_survives_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let forest = RandomForestRegressor::load(&model_path()).unwrap();
    let path = dir.path().join("copy.json");
    forest.to_artifact().save(&path).unwrap();

    let reloaded = RandomForestRegressor::from_artifact(&ModelArtifact::load(&path).unwrap()).unwrap();
    assert_eq!(reloaded, forest);
}
