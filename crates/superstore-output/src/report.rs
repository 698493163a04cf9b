//! Rendering of a single prediction.

use crate::currency::{format_currency, format_whole_dollars};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use superstore::model::ModelMetrics;
use superstore::{EncodedFeatureVector, OrderInputRecord, PredictionResult};

/// Output format of a [`PredictionReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain text for terminals
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,

    /// Markdown
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// A prediction with the order it was made for and the model's scores.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    /// The order as entered
    pub order: OrderInputRecord,

    /// Model and formula outputs
    pub result: PredictionResult,

    /// Features the model saw, if kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<EncodedFeatureVector>,

    /// Static model scores
    pub metrics: ModelMetrics,

    /// Display name of the model
    pub model_name: String,
}

impl PredictionReport {
    /// Create a report.
    pub fn new(
        order: OrderInputRecord,
        result: PredictionResult,
        metrics: ModelMetrics,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            order,
            result,
            features: None,
            metrics,
            model_name: model_name.into(),
        }
    }

    /// Include the encoded features.
    pub const fn with_features(mut self, features: EncodedFeatureVector) -> Self {
        self.features = Some(features);
        self
    }

    /// Three headline figures: label and formatted value.
    pub fn headline(&self) -> [(&'static str, String); 3] {
        [
            ("Predicted Sales", format_currency(self.result.predicted_sales)),
            (
                "Expected (Formula)",
                format_currency(self.result.expected_by_formula),
            ),
            ("Difference", format_currency(self.result.absolute_difference)),
        ]
    }

    /// Order details shown under the headline figures.
    pub fn details(&self) -> [(&'static str, String); 6] {
        details(&self.order)
    }

    /// Model performance figures.
    pub fn performance(&self) -> [(&'static str, String); 3] {
        performance(&self.metrics)
    }

    /// Footer line naming the model and its accuracy.
    pub fn caption(&self) -> String {
        caption(&self.model_name, &self.metrics)
    }

    /// Render in the given format.
    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Markdown => Ok(self.to_markdown()),
        }
    }

    /// Plain-text rendering.
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("\nSales Prediction\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        for (label, value) in self.headline() {
            output.push_str(&format!("{:<22}{:>18}\n", label, value));
        }

        output.push_str("\nDetails\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for (label, value) in self.details() {
            output.push_str(&format!("{:<22}{:>18}\n", label, value));
        }

        output.push_str("\nModel Performance\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        for (label, value) in self.performance() {
            output.push_str(&format!("{:<22}{:>18}\n", label, value));
        }

        output.push('\n');
        output.push_str(&self.caption());
        output.push('\n');
        output
    }

    /// Markdown rendering.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Sales Prediction\n\n");
        output.push_str("| Predicted Sales | Expected (Formula) | Difference |\n");
        output.push_str("|-----------------|--------------------|------------|\n");
        let [predicted, expected, difference] = self.headline();
        output.push_str(&format!(
            "| {} | {} | {} |\n\n",
            predicted.1, expected.1, difference.1
        ));

        output.push_str("## Details\n\n");
        for (label, value) in self.details() {
            output.push_str(&format!("- **{}:** {}\n", label, value));
        }

        output.push_str("\n## Model Performance\n\n");
        for (label, value) in self.performance() {
            output.push_str(&format!("- **{}:** {}\n", label, value));
        }

        output.push_str(&format!("\n_{}_\n", self.caption()));
        output
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Order details as label and formatted value.
pub fn details(order: &OrderInputRecord) -> [(&'static str, String); 6] {
    [
        ("Quantity", order.quantity.to_string()),
        ("Unit Price", format_currency(order.unit_price)),
        ("Discount", format!("{:.0}%", order.discount_pct())),
        ("Category", order.category.clone()),
        ("Region", order.region.clone()),
        ("Segment", order.segment.clone()),
    ]
}

/// Model scores as label and formatted value.
pub fn performance(metrics: &ModelMetrics) -> [(&'static str, String); 3] {
    [
        ("R2 Score", format!("{:.2}", metrics.r2)),
        ("MAE", format_whole_dollars(metrics.mae)),
        ("RMSE", format_whole_dollars(metrics.rmse)),
    ]
}

/// `Built with <model> | Accuracy: <pct>%`.
pub fn caption(model_name: &str, metrics: &ModelMetrics) -> String {
    format!(
        "Built with {} | Accuracy: {:.0}%",
        model_name,
        metrics.accuracy_pct()
    )
}
