//! Prediction against the artifacts shipped in the repository.

use approx::assert_relative_eq;
use std::path::PathBuf;
use superstore::{ArtifactPaths, OrderInputRecord, PredictError, Predictor};

fn shipped() -> ArtifactPaths {
    ArtifactPaths::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts"))
}

fn technology_order() -> OrderInputRecord {
    OrderInputRecord {
        category: "Technology".to_string(),
        segment: "Consumer".to_string(),
        region: "West".to_string(),
        ship_mode: "Standard Class".to_string(),
        ..OrderInputRecord::default()
    }
}

#[test]
fn test_shipped_artifacts_load() {
    let predictor = Predictor::load(&shipped()).unwrap();
    assert_eq!(predictor.model_name(), "Random Forest");
    assert_relative_eq!(predictor.metrics().r2, 0.83);
    assert_relative_eq!(predictor.metrics().mae, 30.0);
    assert_relative_eq!(predictor.metrics().rmse, 316.0);
    assert!(predictor.encoders().drift().is_empty());
}

#[test]
fn test_reference_order() {
    let predictor = Predictor::load(&shipped()).unwrap();
    let prediction = predictor.predict_with_features(&technology_order()).unwrap();

    assert_eq!(
        prediction.features.to_array(),
        [5.0, 0.15, 100.0, 2.0, 0.0, 3.0, 3.0, 2024.0, 11.0, 4.0, 4.0]
    );
    assert_eq!(prediction.features.quarter, 4);
    assert_eq!(prediction.features.day_of_week, 4);

    let result = prediction.result;
    assert_relative_eq!(result.expected_by_formula, 425.0, epsilon = 1e-9);
    assert!(result.predicted_sales.is_finite());
    assert!(result.absolute_difference >= 0.0);
    assert_relative_eq!(
        result.absolute_difference,
        (result.predicted_sales - result.expected_by_formula).abs()
    );
}

#[test]
fn test_every_option_combination_predicts() {
    let predictor = Predictor::load(&shipped()).unwrap();
    let options = predictor.options();

    for category in &options[0].options {
        for region in &options[2].options {
            let order = OrderInputRecord {
                category: category.name.to_string(),
                region: region.name.to_string(),
                ..OrderInputRecord::default()
            };
            let result = predictor.predict(&order).unwrap();
            assert!(result.predicted_sales.is_finite());
        }
    }
}

#[test]
fn test_gadgets_rejected() {
    let predictor = Predictor::load(&shipped()).unwrap();
    let order = OrderInputRecord {
        category: "Gadgets".to_string(),
        ..technology_order()
    };
    let err = predictor.predict(&order).unwrap_err();
    assert!(matches!(err, PredictError::UnknownCategory { .. }));
    assert_eq!(err.kind(), "unknown_category");
}

#[test]
fn test_batch_matches_single() {
    let predictor = Predictor::load(&shipped()).unwrap();
    let orders: Vec<OrderInputRecord> = (1..=12)
        .map(|month| OrderInputRecord {
            month,
            quantity: month * 3,
            ..technology_order()
        })
        .collect();

    let batch = predictor.predict_many(&orders).unwrap();
    for (order, result) in orders.iter().zip(&batch) {
        assert_eq!(*result, predictor.predict(order).unwrap());
    }
}
