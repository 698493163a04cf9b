//! Order form fields.

use serde::{Deserialize, Serialize};
use superstore::OrderInputRecord;

/// An order as submitted by the form or the JSON API.
///
/// The discount is the user-facing percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Number of units
    pub quantity: u32,
    /// Price per unit
    pub unit_price: f64,
    /// Discount percentage, 0 to 80
    pub discount_pct: f64,
    /// Product category
    pub category: String,
    /// Customer segment
    pub segment: String,
    /// Sales region
    pub region: String,
    /// Shipping mode
    pub ship_mode: String,
    /// Order year
    pub year: i32,
    /// Order month
    pub month: u32,
    /// Weekday name
    pub day_of_week: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::from(&OrderInputRecord::default())
    }
}

impl From<&OrderInputRecord> for OrderForm {
    fn from(order: &OrderInputRecord) -> Self {
        Self {
            quantity: order.quantity,
            unit_price: order.unit_price,
            discount_pct: (order.discount_pct() * 1e6).round() / 1e6,
            category: order.category.clone(),
            segment: order.segment.clone(),
            region: order.region.clone(),
            ship_mode: order.ship_mode.clone(),
            year: order.year,
            month: order.month,
            day_of_week: order.day_of_week.clone(),
        }
    }
}

impl From<OrderForm> for OrderInputRecord {
    fn from(form: OrderForm) -> Self {
        Self {
            quantity: form.quantity,
            unit_price: form.unit_price,
            discount: Self::discount_from_pct(form.discount_pct),
            category: form.category,
            segment: form.segment,
            region: form.region,
            ship_mode: form.ship_mode,
            year: form.year,
            month: form.month,
            day_of_week: form.day_of_week,
        }
    }
}
