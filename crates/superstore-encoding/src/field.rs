//! Categorical order fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A categorical attribute of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Product category
    Category,

    /// Customer segment
    Segment,

    /// Sales region
    Region,

    /// Shipping mode
    ShipMode,

    /// Day of the week the order was placed
    DayOfWeek,
}

impl Field {
    /// Fields backed by a label encoder artifact.
    pub const ENCODED: [Self; 4] = [Self::Category, Self::Segment, Self::Region, Self::ShipMode];

    /// Snake-case identifier used in artifacts and form keys.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Segment => "segment",
            Self::Region => "region",
            Self::ShipMode => "ship_mode",
            Self::DayOfWeek => "day_of_week",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Segment => "Customer Segment",
            Self::Region => "Region",
            Self::ShipMode => "Ship Mode",
            Self::DayOfWeek => "Day of Week",
        }
    }

    /// File name of the encoder artifact for this field, if it has one.
    pub const fn artifact_file_name(&self) -> Option<&'static str> {
        match self {
            Self::Category => Some("le_category.json"),
            Self::Segment => Some("le_segment.json"),
            Self::Region => Some("le_region.json"),
            Self::ShipMode => Some("le_ship_mode.json"),
            Self::DayOfWeek => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
