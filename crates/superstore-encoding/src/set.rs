//! The four label encoders an order needs.

use crate::encoder::LabelEncoder;
use crate::error::Result;
use crate::field::Field;
use crate::vocabulary::{Category, Region, Segment, ShipMode, Vocabulary};
use std::path::Path;

/// Label encoders for every encoded categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncoderSet {
    /// Product category encoder
    pub category: LabelEncoder<Category>,

    /// Customer segment encoder
    pub segment: LabelEncoder<Segment>,

    /// Region encoder
    pub region: LabelEncoder<Region>,

    /// Ship mode encoder
    pub ship_mode: LabelEncoder<ShipMode>,
}

/// A form option the matching encoder was not fit on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyDrift {
    /// Field of the encoder
    pub field: Field,

    /// Option string the encoder cannot encode
    pub option: &'static str,
}

impl EncoderSet {
    /// Create a set from individual encoders.
    pub const fn new(
        category: LabelEncoder<Category>,
        segment: LabelEncoder<Segment>,
        region: LabelEncoder<Region>,
        ship_mode: LabelEncoder<ShipMode>,
    ) -> Self {
        Self {
            category,
            segment,
            region,
            ship_mode,
        }
    }

    /// Set of encoders fit on the full vocabularies.
    pub fn fitted() -> Self {
        Self::default()
    }

    /// Load the four `le_*.json` artifacts from a directory.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            category: LabelEncoder::load_from(dir)?,
            segment: LabelEncoder::load_from(dir)?,
            region: LabelEncoder::load_from(dir)?,
            ship_mode: LabelEncoder::load_from(dir)?,
        })
    }

    /// Write the four encoder artifacts into a directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        self.category.save_into(dir)?;
        self.segment.save_into(dir)?;
        self.region.save_into(dir)?;
        self.ship_mode.save_into(dir)?;
        Ok(())
    }

    /// Form options that some encoder cannot encode.
    ///
    /// An empty result means the form and the encoders agree.
    pub fn drift(&self) -> Vec<VocabularyDrift> {
        fn missing<T: Vocabulary>(encoder: &LabelEncoder<T>) -> impl Iterator<Item = VocabularyDrift> {
            encoder.missing_variants().into_iter().map(|v| VocabularyDrift {
                field: T::FIELD,
                option: v.name(),
            })
        }

        missing(&self.category)
            .chain(missing(&self.segment))
            .chain(missing(&self.region))
            .chain(missing(&self.ship_mode))
            .collect()
    }

    /// Number of classes per field.
    pub fn class_counts(&self) -> [(Field, usize); 4] {
        [
            (Field::Category, self.category.len()),
            (Field::Segment, self.segment.len()),
            (Field::Region, self.region.len()),
            (Field::ShipMode, self.ship_mode.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitted_set_has_no_drift() {
        let set = EncoderSet::fitted();
        assert!(set.drift().is_empty());
        assert_eq!(
            set.class_counts(),
            [
                (Field::Category, 3),
                (Field::Segment, 3),
                (Field::Region, 4),
                (Field::ShipMode, 4)
            ]
        );
    }

    #[test]
    fn test_save_and_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let region = LabelEncoder::<Region>::from_classes(&["West", "East", "South", "Central"]).unwrap();
        let set = EncoderSet::new(
            LabelEncoder::fitted(),
            LabelEncoder::fitted(),
            region,
            LabelEncoder::fitted(),
        );
        set.save(dir.path()).unwrap();

        for field in Field::ENCODED {
            let name = field.artifact_file_name().unwrap();
            assert!(dir.path().join(name).exists());
        }
        let loaded = EncoderSet::load(dir.path()).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.region.encode(Region::West).unwrap(), 0);
    }

    #[test]
    fn test_drift_reports_missing_options() {
        let region = LabelEncoder::<Region>::from_classes(&["Central", "East", "West"]).unwrap();
        let set = EncoderSet::new(
            LabelEncoder::fitted(),
            LabelEncoder::fitted(),
            region,
            LabelEncoder::fitted(),
        );

        assert_eq!(
            set.drift(),
            vec![VocabularyDrift {
                field: Field::Region,
                option: "South",
            }]
        );
    }
}
