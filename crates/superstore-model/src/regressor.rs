//! The regression model seam.

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2};
use std::fmt;

/// A fitted model mapping a fixed-length feature vector to one real value.
///
/// Implementations are read-only after construction and may be shared across
/// threads.
pub trait RegressionModel: fmt::Debug + Send + Sync {
    /// Human-readable model family, e.g. "Random Forest".
    fn name(&self) -> &str;

    /// Number of input features.
    fn n_features(&self) -> usize;

    /// Predict the target for one sample.
    ///
    /// # Errors
    /// Fails if `features` has the wrong length or holds non-finite values.
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Predict the target for every row of `features`.
    ///
    /// Default implementation predicts row by row.
    fn predict_batch(&self, features: &Array2<f64>) -> Result<Array1<f64>> {
        if features.ncols() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.ncols(),
            });
        }

        let mut predictions = Array1::<f64>::zeros(features.nrows());
        for (i, row) in features.rows().into_iter().enumerate() {
            predictions[i] = self.predict(&row.to_vec())?;
        }
        Ok(predictions)
    }
}

/// Reject NaN and infinite inputs.
pub(crate) fn check_finite(features: &[f64]) -> Result<()> {
    match features.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ModelError::NonFiniteInput {
            index,
            value: features[index],
        }),
        None => Ok(()),
    }
}
