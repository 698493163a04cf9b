//! Order input records.

use crate::error::DomainValidationError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Inclusive quantity bounds.
pub const QUANTITY_RANGE: (u32, u32) = (1, 100);
/// Inclusive unit price bounds.
pub const UNIT_PRICE_RANGE: (f64, f64) = (0.0, 10_000.0);
/// Inclusive discount fraction bounds.
pub const DISCOUNT_RANGE: (f64, f64) = (0.0, 0.8);
/// Inclusive order year bounds.
pub const YEAR_RANGE: (i32, i32) = (2020, 2030);
/// Inclusive month bounds.
pub const MONTH_RANGE: (u32, u32) = (1, 12);

/// Weekday names in Monday-first order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse a weekday name, ignoring case and surrounding whitespace.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    WEEKDAY_NAMES
        .iter()
        .position(|w| w.eq_ignore_ascii_case(name))
        .map(|i| WEEKDAYS[i])
}

/// Zero-based position of a weekday, Monday = 0.
pub fn weekday_index(day: Weekday) -> u32 {
    day.num_days_from_monday()
}

/// English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// One order as entered on the form.
///
/// Categorical fields hold the raw strings the user picked; they are checked
/// against the encoder vocabularies when the record is encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInputRecord {
    /// Number of units
    pub quantity: u32,

    /// Price per unit, in dollars
    pub unit_price: f64,

    /// Discount as a fraction in [0, 0.8]
    pub discount: f64,

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

    /// Order month, 1 to 12
    pub month: u32,

    /// Weekday name
    pub day_of_week: String,
}

impl Default for OrderInputRecord {
    /// Initial values of the order form.
    fn default() -> Self {
        Self {
            quantity: 5,
            unit_price: 100.0,
            discount: 0.15,
            category: "Furniture".to_string(),
            segment: "Consumer".to_string(),
            region: "Central".to_string(),
            ship_mode: "First Class".to_string(),
            year: 2024,
            month: 11,
            day_of_week: "Friday".to_string(),
        }
    }
}

impl OrderInputRecord {
    /// Convert a user-facing discount percentage to a fraction.
    pub fn discount_from_pct(pct: f64) -> f64 {
        pct / 100.0
    }

    /// Discount as a percentage.
    pub fn discount_pct(&self) -> f64 {
        self.discount * 100.0
    }

    /// Set year, month and weekday from a calendar date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.year = date.year();
        self.month = date.month();
        self.day_of_week = weekday_name(date.weekday()).to_string();
        self
    }

    /// `quantity × unit_price × (1 − discount)`.
    pub fn expected_by_formula(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price * (1.0 - self.discount)
    }

    /// Check the numeric fields against their bounds.
    ///
    /// # Errors
    /// Returns the first field that is out of range or not finite.
    pub fn validate(&self) -> Result<(), DomainValidationError> {
        check_range(
            "quantity",
            f64::from(self.quantity),
            (f64::from(QUANTITY_RANGE.0), f64::from(QUANTITY_RANGE.1)),
        )?;
        check_range("unit_price", self.unit_price, UNIT_PRICE_RANGE)?;
        check_range("discount", self.discount, DISCOUNT_RANGE)?;
        check_range(
            "year",
            f64::from(self.year),
            (f64::from(YEAR_RANGE.0), f64::from(YEAR_RANGE.1)),
        )?;
        check_range(
            "month",
            f64::from(self.month),
            (f64::from(MONTH_RANGE.0), f64::from(MONTH_RANGE.1)),
        )?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), DomainValidationError> {
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(DomainValidationError {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_weekday_index_is_bijection() {
        let mut seen = [false; 7];
        for (i, name) in WEEKDAY_NAMES.iter().enumerate() {
            let day = parse_weekday(name).unwrap();
            let idx = weekday_index(day) as usize;
            assert_eq!(idx, i);
            assert!(!seen[idx]);
            seen[idx] = true;
            assert_eq!(weekday_name(day), *name);
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(weekday_index(Weekday::Mon), 0);
        assert_eq!(weekday_index(Weekday::Sun), 6);
    }

    #[rstest]
    #[case("friday", Some(Weekday::Fri))]
    #[case("  Sunday ", Some(Weekday::Sun))]
    #[case("Funday", None)]
    #[case("", None)]
    fn test_parse_weekday(#[case] name: &str, #[case] expected: Option<Weekday>) {
        assert_eq!(parse_weekday(name), expected);
    }

    #[test]
    fn test_formula() {
        let order = OrderInputRecord::default();
        assert_relative_eq!(order.expected_by_formula(), 425.0, epsilon = 1e-9);

        let free = OrderInputRecord {
            discount: 0.0,
            quantity: 3,
            unit_price: 19.99,
            ..OrderInputRecord::default()
        };
        assert_relative_eq!(free.expected_by_formula(), 59.97, epsilon = 1e-9);
    }

    #[test]
    fn test_default_is_valid() {
        assert!(OrderInputRecord::default().validate().is_ok());
    }

    #[rstest]
    #[case::zero_quantity(OrderInputRecord { quantity: 0, ..Default::default() }, "quantity")]
    #[case::large_quantity(OrderInputRecord { quantity: 101, ..Default::default() }, "quantity")]
    #[case::negative_price(OrderInputRecord { unit_price: -1.0, ..Default::default() }, "unit_price")]
    #[case::nan_price(OrderInputRecord { unit_price: f64::NAN, ..Default::default() }, "unit_price")]
    #[case::large_discount(OrderInputRecord { discount: 0.85, ..Default::default() }, "discount")]
    #[case::early_year(OrderInputRecord { year: 2019, ..Default::default() }, "year")]
    #[case::month_13(OrderInputRecord { month: 13, ..Default::default() }, "month")]
    fn test_validate_rejects(#[case] order: OrderInputRecord, #[case] field: &str) {
        assert_eq!(order.validate().unwrap_err().field, field);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let order = OrderInputRecord {
            quantity: 100,
            unit_price: 10_000.0,
            discount: 0.8,
            year: 2030,
            month: 12,
            ..Default::default()
        };
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_with_date() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        let order = OrderInputRecord::default().with_date(date);
        assert_eq!(order.year, 2024);
        assert_eq!(order.month, 11);
        assert_eq!(order.day_of_week, "Friday");
    }

    #[test]
    fn test_discount_pct() {
        assert_relative_eq!(OrderInputRecord::discount_from_pct(15.0), 0.15);
        assert_relative_eq!(OrderInputRecord::default().discount_pct(), 15.0, epsilon = 1e-9);
    }
}
