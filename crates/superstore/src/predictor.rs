//! The request builder and inference entry point.
//!
//! A [`Predictor`] is built once from loaded artifacts and never mutated, so
//! it can be shared freely between threads.

use crate::artifacts::{ArtifactPaths, Artifacts};
use crate::error::{ArtifactLoadError, BatchError, Result};
use crate::features::{EncodedFeatureVector, FEATURE_NAMES, N_FEATURES, quarter};
use crate::order::{OrderInputRecord, WEEKDAY_NAMES, parse_weekday, weekday_index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use superstore_encoding::{EncoderSet, EncodingError, Field, LabelEncoder, Vocabulary};
use superstore_model::{ModelMetrics, RegressionModel};

/// Model output for one order, next to the naive estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Model prediction, in dollars
    pub predicted_sales: f64,

    /// `quantity × unit_price × (1 − discount)`
    pub expected_by_formula: f64,

    /// `|predicted_sales − expected_by_formula|`
    pub absolute_difference: f64,
}

impl PredictionResult {
    /// Combine a model prediction with the formula estimate.
    pub fn new(predicted_sales: f64, expected_by_formula: f64) -> Self {
        Self {
            predicted_sales,
            expected_by_formula,
            absolute_difference: (predicted_sales - expected_by_formula).abs(),
        }
    }
}

/// A prediction together with the features the model saw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Model input
    pub features: EncodedFeatureVector,

    /// Model output
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// One selectable value of a categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    /// Option string
    pub name: &'static str,

    /// Code the loaded encoder assigns, if it knows the option
    pub code: Option<u32>,
}

/// Selectable values of one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOptions {
    /// The field
    pub field: Field,

    /// Options in form order
    pub options: Vec<FieldOption>,
}

/// Loaded model and encoders.
#[derive(Debug)]
pub struct Predictor {
    model: Box<dyn RegressionModel>,
    encoders: EncoderSet,
    metrics: ModelMetrics,
}

impl Predictor {
    /// Wrap a model and its encoders.
    ///
    /// Options the encoders were not fit on are logged; requests using them
    /// fail with [`crate::PredictError::UnknownCategory`].
    ///
    /// # Errors
    /// Fails if the model does not take the eleven order features.
    pub fn new<M>(
        model: M,
        encoders: EncoderSet,
        metrics: ModelMetrics,
    ) -> std::result::Result<Self, ArtifactLoadError>
    where
        M: RegressionModel + 'static,
    {
        if model.n_features() != N_FEATURES {
            return Err(ArtifactLoadError::FeatureCount {
                expected: N_FEATURES,
                found: model.n_features(),
            });
        }

        for drift in encoders.drift() {
            tracing::warn!(
                field = drift.field.key(),
                option = drift.option,
                "form option missing from encoder; requests using it will be rejected"
            );
        }

        Ok(Self {
            model: Box::new(model),
            encoders,
            metrics,
        })
    }

    /// Build from loaded artifacts, using the metrics recorded in the model.
    pub fn from_artifacts(artifacts: Artifacts) -> std::result::Result<Self, ArtifactLoadError> {
        let metrics = *artifacts.model.metrics();
        Self::new(artifacts.model, artifacts.encoders, metrics)
    }

    /// Load artifacts from disk and build a predictor.
    pub fn load(paths: &ArtifactPaths) -> std::result::Result<Self, ArtifactLoadError> {
        Self::from_artifacts(Artifacts::load(paths)?)
    }

    /// Validate and encode an order into model features.
    pub fn encode(&self, order: &OrderInputRecord) -> Result<EncodedFeatureVector> {
        order.validate()?;

        let category = self.encoders.category.encode_str(&order.category)?;
        let segment = self.encoders.segment.encode_str(&order.segment)?;
        let region = self.encoders.region.encode_str(&order.region)?;
        let ship_mode = self.encoders.ship_mode.encode_str(&order.ship_mode)?;

        let day = parse_weekday(&order.day_of_week)
            .ok_or_else(|| EncodingError::unknown(Field::DayOfWeek, &order.day_of_week))?;
        // validate() guarantees a valid month
        let quarter = quarter(order.month).unwrap_or_default();

        Ok(EncodedFeatureVector {
            quantity: order.quantity,
            discount: order.discount,
            unit_price: order.unit_price,
            category,
            segment,
            region,
            ship_mode,
            year: order.year,
            month: order.month,
            quarter,
            day_of_week: weekday_index(day),
        })
    }

    /// Predict sales for one order.
    pub fn predict(&self, order: &OrderInputRecord) -> Result<PredictionResult> {
        Ok(self.predict_with_features(order)?.result)
    }

    /// Predict sales for one order, keeping the encoded features.
    pub fn predict_with_features(&self, order: &OrderInputRecord) -> Result<Prediction> {
        let features = self.encode(order)?;
        let predicted = self.model.predict(&features.to_array())?;
        let result = PredictionResult::new(predicted, order.expected_by_formula());

        tracing::debug!(
            predicted = result.predicted_sales,
            expected = result.expected_by_formula,
            "prediction"
        );

        Ok(Prediction { features, result })
    }

    /// Predict a batch of orders.
    ///
    /// # Errors
    /// The whole batch fails on the first invalid order, reported with its
    /// 1-based row number.
    pub fn predict_many(
        &self,
        orders: &[OrderInputRecord],
    ) -> std::result::Result<Vec<PredictionResult>, BatchError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let mut x = Array2::<f64>::zeros((orders.len(), N_FEATURES));
        for (i, order) in orders.iter().enumerate() {
            let features = self
                .encode(order)
                .map_err(|source| BatchError::Row { row: i + 1, source })?;
            for (j, value) in features.to_array().into_iter().enumerate() {
                x[[i, j]] = value;
            }
        }

        let predicted = self.model.predict_batch(&x)?;
        Ok(orders
            .iter()
            .zip(predicted.iter())
            .map(|(order, p)| PredictionResult::new(*p, order.expected_by_formula()))
            .collect())
    }

    /// Selectable values of every categorical field with their codes.
    pub fn options(&self) -> Vec<FieldOptions> {
        fn field_options<T: Vocabulary>(encoder: &LabelEncoder<T>) -> FieldOptions {
            FieldOptions {
                field: T::FIELD,
                options: T::all()
                    .iter()
                    .map(|v| FieldOption {
                        name: v.name(),
                        code: encoder.encode(*v).ok(),
                    })
                    .collect(),
            }
        }

        vec![
            field_options(&self.encoders.category),
            field_options(&self.encoders.segment),
            field_options(&self.encoders.region),
            field_options(&self.encoders.ship_mode),
            FieldOptions {
                field: Field::DayOfWeek,
                options: WEEKDAY_NAMES
                    .into_iter()
                    .zip(0..)
                    .map(|(name, code)| FieldOption {
                        name,
                        code: Some(code),
                    })
                    .collect(),
            },
        ]
    }

    /// Display name of the model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Static quality metrics of the model.
    pub const fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    /// Loaded encoders.
    pub const fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    /// Feature names in model order.
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}
