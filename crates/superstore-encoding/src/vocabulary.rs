//! Closed vocabularies of the categorical order fields.
//!
//! Each vocabulary is a plain enum whose variants are the exact option strings
//! offered by the order form. Parsing accepts surrounding whitespace and any
//! ASCII case; anything else is an [`EncodingError::UnknownCategory`].

use crate::error::EncodingError;
use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// A closed set of option strings for one categorical field.
pub trait Vocabulary: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// Field this vocabulary belongs to.
    const FIELD: Field;

    /// File name of the encoder artifact for this vocabulary.
    const FILE_NAME: &'static str;

    /// All variants in form order.
    fn all() -> &'static [Self];

    /// Canonical option string.
    fn name(&self) -> &'static str;

    /// Look up a variant by option string.
    fn lookup(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(value))
    }
}

macro_rules! impl_vocabulary {
    ($ty:ty, $field:expr, [$($variant:ident => $name:literal),+ $(,)?]) => {
        impl Vocabulary for $ty {
            const FIELD: Field = $field;

            const FILE_NAME: &'static str = match $field.artifact_file_name() {
                Some(name) => name,
                None => panic!("field has no encoder artifact"),
            };

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = EncodingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::lookup(s).ok_or_else(|| EncodingError::unknown(Self::FIELD, s))
            }
        }
    };
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Furniture
    Furniture,

    /// Office Supplies
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,

    /// Technology
    Technology,
}

impl_vocabulary!(Category, Field::Category, [
    Furniture => "Furniture",
    OfficeSupplies => "Office Supplies",
    Technology => "Technology",
]);

/// Customer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Consumer
    Consumer,

    /// Corporate
    Corporate,

    /// Home Office
    #[serde(rename = "Home Office")]
    HomeOffice,
}

impl_vocabulary!(Segment, Field::Segment, [
    Consumer => "Consumer",
    Corporate => "Corporate",
    HomeOffice => "Home Office",
]);

/// Sales region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Central
    Central,

    /// East
    East,

    /// South
    South,

    /// West
    West,
}

impl_vocabulary!(Region, Field::Region, [
    Central => "Central",
    East => "East",
    South => "South",
    West => "West",
]);

/// Shipping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipMode {
    /// First Class
    #[serde(rename = "First Class")]
    FirstClass,

    /// Same Day
    #[serde(rename = "Same Day")]
    SameDay,

    /// Second Class
    #[serde(rename = "Second Class")]
    SecondClass,

    /// Standard Class
    #[serde(rename = "Standard Class")]
    StandardClass,
}

impl_vocabulary!(ShipMode, Field::ShipMode, [
    FirstClass => "First Class",
    SameDay => "Same Day",
    SecondClass => "Second Class",
    StandardClass => "Standard Class",
]);
