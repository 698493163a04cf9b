//! Regression quality metrics.
//!
//! - R² = 1 − SS_res / SS_tot
//! - MAE = mean |y − ŷ|
//! - RMSE = sqrt(mean (y − ŷ)²)

use crate::error::{ModelError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// R², MAE and RMSE of a regression model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Coefficient of determination
    pub r2: f64,

    /// Mean absolute error, in target units
    pub mae: f64,

    /// Root mean squared error, in target units
    pub rmse: f64,
}

impl Default for ModelMetrics {
    /// Hold-out scores recorded when the shipped sales model was trained.
    fn default() -> Self {
        Self {
            r2: 0.83,
            mae: 30.0,
            rmse: 316.0,
        }
    }
}

impl ModelMetrics {
    /// Create metrics from known values.
    pub const fn new(r2: f64, mae: f64, rmse: f64) -> Self {
        Self { r2, mae, rmse }
    }

    /// Compute metrics for predictions against observed values.
    ///
    /// R² follows scikit-learn when the targets are constant: 1.0 for a
    /// perfect fit, 0.0 otherwise.
    ///
    /// # Errors
    /// Fails if the arrays differ in length or are empty.
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(ModelError::DimensionMismatch {
                expected: y_true.len(),
                actual: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Err(ModelError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let n = y_true.len() as f64;
        let residuals = y_true - y_pred;

        let mae = residuals.mapv(f64::abs).sum() / n;
        let ss_res = residuals.mapv(|r| r * r).sum();
        let rmse = (ss_res / n).sqrt();

        let mean = y_true.sum() / n;
        let ss_tot = y_true.mapv(|y| (y - mean).powi(2)).sum();
        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Ok(Self { r2, mae, rmse })
    }

    /// R² as a whole percentage, the "accuracy" shown to users.
    pub fn accuracy_pct(&self) -> f64 {
        (self.r2 * 100.0).round()
    }
}

impl fmt::Display for ModelMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R2 {:.2}, MAE {:.2}, RMSE {:.2}",
            self.r2, self.mae, self.rmse
        )
    }
}
