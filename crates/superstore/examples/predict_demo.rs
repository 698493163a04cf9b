//! Demonstration of order prediction over the shipped artifacts.

use chrono::NaiveDate;
use std::path::PathBuf;
use superstore::{ArtifactPaths, OrderInputRecord, Predictor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Superstore Prediction Demo ===\n");

    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
    let predictor = Predictor::load(&ArtifactPaths::new(dir))?;
    let metrics = predictor.metrics();
    println!(
        "Model: {} (R2 {:.2}, MAE {:.0}, RMSE {:.0})\n",
        predictor.model_name(),
        metrics.r2,
        metrics.mae,
        metrics.rmse
    );

    // 1. Single order, with the features handed to the model
    println!("1. Single Order\n");

    let order = OrderInputRecord {
        category: "Technology".to_string(),
        region: "West".to_string(),
        ship_mode: "Standard Class".to_string(),
        ..OrderInputRecord::default()
    };
    let prediction = predictor.predict_with_features(&order)?;
    for (name, value) in prediction.features.named() {
        println!("  {:<14}{:>10}", name, value);
    }
    println!("\n  Predicted Sales:    {:>10.2}", prediction.result.predicted_sales);
    println!("  Expected (Formula): {:>10.2}", prediction.result.expected_by_formula);
    println!("  Difference:         {:>10.2}\n", prediction.result.absolute_difference);

    // 2. A batch of orders placed on real dates
    println!("2. Batch\n");

    let orders: Vec<OrderInputRecord> = [
        (1, 20.0, "2023-01-09"),
        (5, 100.0, "2024-11-15"),
        (12, 2000.0, "2025-06-30"),
    ]
    .into_iter()
    .filter_map(|(quantity, unit_price, date)| {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        Some(
            OrderInputRecord {
                quantity,
                unit_price,
                ..OrderInputRecord::default()
            }
            .with_date(date),
        )
    })
    .collect();

    let results = predictor.predict_many(&orders)?;
    println!("{:>4}{:>10}  {:<10}{:>12}{:>12}", "Qty", "Price", "Day", "Predicted", "Formula");
    for (order, result) in orders.iter().zip(&results) {
        println!(
            "{:>4}{:>10.2}  {:<10}{:>12.2}{:>12.2}",
            order.quantity,
            order.unit_price,
            order.day_of_week,
            result.predicted_sales,
            result.expected_by_formula
        );
    }

    // 3. Rejected orders
    println!("\n3. Rejected Orders\n");

    let unknown = OrderInputRecord {
        category: "Gadgets".to_string(),
        ..OrderInputRecord::default()
    };
    let too_many = OrderInputRecord {
        quantity: 500,
        ..OrderInputRecord::default()
    };
    for order in [unknown, too_many] {
        match predictor.predict(&order) {
            Ok(result) => println!("  unexpected prediction {:.2}", result.predicted_sales),
            Err(e) => println!("  {} ({})", e, e.kind()),
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
