//! Model feature layout.

use serde::{Deserialize, Serialize};

/// Number of model features.
pub const N_FEATURES: usize = 11;

/// Feature names in the order the sales model was fit on.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Quantity",
    "Discount",
    "Unit_Price",
    "Category_encoded",
    "Segment_encoded",
    "Region_encoded",
    "Ship_Mode_encoded",
    "Year",
    "Month",
    "Quarter",
    "DayOfWeek",
];

/// Calendar quarter of a month, or `None` outside 1..=12.
pub fn quarter(month: u32) -> Option<u32> {
    (1..=12).contains(&month).then(|| (month - 1) / 3 + 1)
}

/// The model input for one order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    /// Number of units
    pub quantity: u32,
    /// Discount fraction
    pub discount: f64,
    /// Price per unit
    pub unit_price: f64,
    /// Category code
    pub category: u32,
    /// Segment code
    pub segment: u32,
    /// Region code
    pub region: u32,
    /// Ship mode code
    pub ship_mode: u32,
    /// Order year
    pub year: i32,
    /// Order month
    pub month: u32,
    /// Quarter derived from the month
    pub quarter: u32,
    /// Monday-first weekday index
    pub day_of_week: u32,
}

impl EncodedFeatureVector {
    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            f64::from(self.quantity),
            self.discount,
            self.unit_price,
            f64::from(self.category),
            f64::from(self.segment),
            f64::from(self.region),
            f64::from(self.ship_mode),
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.quarter),
            f64::from(self.day_of_week),
        ]
    }

    /// Values paired with their feature names.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array()).collect()
    }
}
