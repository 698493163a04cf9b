//! Template context for the form page.

use crate::form::OrderForm;
use serde::Serialize;
use superstore::order::{DISCOUNT_RANGE, QUANTITY_RANGE, UNIT_PRICE_RANGE, YEAR_RANGE};
use superstore::{PredictionResult, Predictor};
use superstore_output::report;
use superstore_output::PredictionReport;

/// A label and its formatted value.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    label: &'static str,
    value: String,
}

impl Figure {
    fn list<const N: usize>(pairs: [(&'static str, String); N]) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(label, value)| Self { label, value })
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct Select {
    key: &'static str,
    label: &'static str,
    options: Vec<&'static str>,
    selected: String,
}

#[derive(Debug, Serialize)]
struct Bounds {
    quantity: (u32, u32),
    unit_price: (f64, f64),
    discount_pct: (f64, f64),
    year: (i32, i32),
}

/// Everything the form page shows.
#[derive(Debug, Serialize)]
pub struct PageView {
    form: OrderForm,
    selects: Vec<Select>,
    months: Vec<u32>,
    bounds: Bounds,
    performance: Vec<Figure>,
    caption: String,
    result: Option<Vec<Figure>>,
    details: Option<Vec<Figure>>,
    error: Option<String>,
}

impl PageView {
    /// The form with the given values and no result.
    pub fn new(predictor: &Predictor, form: OrderForm) -> Self {
        let selects = predictor
            .options()
            .into_iter()
            .map(|field| Select {
                key: field.field.key(),
                label: field.field.label(),
                options: field.options.iter().map(|o| o.name).collect(),
                selected: selected_value(&form, field.field.key()),
            })
            .collect();

        Self {
            selects,
            months: (1..=12).collect(),
            bounds: Bounds {
                quantity: QUANTITY_RANGE,
                unit_price: UNIT_PRICE_RANGE,
                discount_pct: (DISCOUNT_RANGE.0 * 100.0, DISCOUNT_RANGE.1 * 100.0),
                year: YEAR_RANGE,
            },
            performance: Figure::list(report::performance(predictor.metrics())),
            caption: report::caption(predictor.model_name(), predictor.metrics()),
            result: None,
            details: None,
            error: None,
            form,
        }
    }

    /// Show a prediction.
    pub fn with_result(mut self, predictor: &Predictor, result: PredictionResult) -> Self {
        let report = PredictionReport::new(
            self.form.clone().into(),
            result,
            *predictor.metrics(),
            predictor.model_name(),
        );
        self.result = Some(Figure::list(report.headline()));
        self.details = Some(Figure::list(report.details()));
        self
    }

    /// Show a rejected order.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Formatted predicted sales, if any.
    pub fn predicted(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|figures| figures.first())
            .map(|f| f.value.as_str())
    }
}

fn selected_value(form: &OrderForm, key: &str) -> String {
    match key {
        "category" => form.category.clone(),
        "segment" => form.segment.clone(),
        "region" => form.region.clone(),
        "ship_mode" => form.ship_mode.clone(),
        "day_of_week" => form.day_of_week.clone(),
        _ => String::new(),
    }
}
