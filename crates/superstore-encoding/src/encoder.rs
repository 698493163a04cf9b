//! Label encoders.
//!
//! A [`LabelEncoder`] is the typed counterpart of a fitted scikit-learn
//! `LabelEncoder`: an ordered list of classes where each class is encoded as
//! its position in the list. The classes are variants of a closed
//! [`Vocabulary`], so a loaded encoder can never hold a string the form does
//! not know about.

use crate::error::{EncodingError, Result};
use crate::field::Field;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Serialized form of a label encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderArtifact {
    /// Field the encoder was fit on.
    pub field: Field,

    /// Classes in code order.
    pub classes: Vec<String>,
}

/// Mapping from the variants of a vocabulary to integer codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder<T: Vocabulary> {
    classes: Vec<T>,
    codes: HashMap<T, u32>,
}

impl<T: Vocabulary> LabelEncoder<T> {
    /// Encoder over the full vocabulary in alphabetical order.
    ///
    /// This is what fitting on a dataset that contains every option yields.
    pub fn fitted() -> Self {
        let mut classes = T::all().to_vec();
        classes.sort_by_key(|c| c.name());
        Self::from_variants(classes)
    }

    fn from_variants(classes: Vec<T>) -> Self {
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (*class, code as u32))
            .collect();
        Self { classes, codes }
    }

    /// Build an encoder from class strings in code order.
    ///
    /// # Errors
    /// Fails if the list is empty, repeats a class, or names a class outside
    /// the vocabulary.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Result<Self> {
        if classes.is_empty() {
            return Err(EncodingError::EmptyVocabulary(T::FIELD));
        }

        let mut seen = HashSet::with_capacity(classes.len());
        let mut variants = Vec::with_capacity(classes.len());
        for class in classes {
            let class = class.as_ref();
            // Artifact classes must match the option string exactly.
            let variant = T::all()
                .iter()
                .copied()
                .find(|v| v.name() == class)
                .ok_or_else(|| EncodingError::UnrecognizedClass {
                    field: T::FIELD,
                    class: class.to_string(),
                })?;
            if !seen.insert(variant) {
                return Err(EncodingError::DuplicateClass {
                    field: T::FIELD,
                    class: class.to_string(),
                });
            }
            variants.push(variant);
        }

        Ok(Self::from_variants(variants))
    }

    /// Build an encoder from its serialized form.
    ///
    /// # Errors
    /// Fails if the artifact belongs to another field or its classes are invalid.
    pub fn from_artifact(artifact: &EncoderArtifact) -> Result<Self> {
        if artifact.field != T::FIELD {
            return Err(EncodingError::FieldMismatch {
                expected: T::FIELD,
                actual: artifact.field,
            });
        }
        Self::from_classes(&artifact.classes)
    }

    /// Load an encoder from a JSON artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let artifact: EncoderArtifact = serde_json::from_reader(reader)?;
        let encoder = Self::from_artifact(&artifact)?;

        let field = T::FIELD;
        tracing::debug!(
            %field,
            classes = encoder.len(),
            path = %path.display(),
            "loaded label encoder"
        );

        Ok(encoder)
    }

    /// Write the encoder as a JSON artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.to_artifact())?;
        Ok(())
    }

    /// Path of this encoder's artifact under `dir`.
    pub fn artifact_path(dir: &Path) -> PathBuf {
        dir.join(T::FILE_NAME)
    }

    /// Load the encoder from its standard file under `dir`.
    pub fn load_from(dir: &Path) -> Result<Self> {
        Self::load(&Self::artifact_path(dir))
    }

    /// Write the encoder to its standard file under `dir`.
    pub fn save_into(&self, dir: &Path) -> Result<()> {
        self.save(&Self::artifact_path(dir))
    }

    /// Serialized form of this encoder.
    pub fn to_artifact(&self) -> EncoderArtifact {
        EncoderArtifact {
            field: T::FIELD,
            classes: self.classes.iter().map(|c| c.name().to_string()).collect(),
        }
    }

    /// Code of `value`.
    ///
    /// # Errors
    /// Returns [`EncodingError::UnknownCategory`] if the encoder was not fit on
    /// `value`.
    pub fn encode(&self, value: T) -> Result<u32> {
        self.codes
            .get(&value)
            .copied()
            .ok_or_else(|| EncodingError::unknown(T::FIELD, value.name()))
    }

    /// Parse `value` as an option string and return its code.
    pub fn encode_str(&self, value: &str) -> Result<u32> {
        let variant = T::lookup(value).ok_or_else(|| EncodingError::unknown(T::FIELD, value))?;
        self.encode(variant)
    }

    /// Class with the given code.
    pub fn decode(&self, code: u32) -> Option<T> {
        self.classes.get(code as usize).copied()
    }

    /// Classes in code order.
    pub fn classes(&self) -> &[T] {
        &self.classes
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if the encoder has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Vocabulary variants this encoder cannot encode.
    pub fn missing_variants(&self) -> Vec<T> {
        T::all()
            .iter()
            .copied()
            .filter(|v| !self.codes.contains_key(v))
            .collect()
    }
}

impl<T: Vocabulary> Default for LabelEncoder<T> {
    fn default() -> Self {
        Self::fitted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{Category, Region, Segment, ShipMode};

    #[test]
    fn test_fitted_codes_are_alphabetical() {
        let ship = LabelEncoder::<ShipMode>::fitted();
        assert_eq!(ship.encode(ShipMode::FirstClass).unwrap(), 0);
        assert_eq!(ship.encode(ShipMode::SameDay).unwrap(), 1);
        assert_eq!(ship.encode(ShipMode::SecondClass).unwrap(), 2);
        assert_eq!(ship.encode(ShipMode::StandardClass).unwrap(), 3);

        let segment = LabelEncoder::<Segment>::fitted();
        assert_eq!(segment.encode(Segment::HomeOffice).unwrap(), 2);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let region = LabelEncoder::<Region>::fitted();
        for variant in Region::all() {
            let code = region.encode(*variant).unwrap();
            assert_eq!(region.decode(code), Some(*variant));
        }
        assert_eq!(region.decode(4), None);
    }

    #[test]
    fn test_from_classes_keeps_given_order() {
        let encoder =
            LabelEncoder::<Category>::from_classes(&["Technology", "Furniture", "Office Supplies"])
                .unwrap();
        assert_eq!(encoder.encode(Category::Technology).unwrap(), 0);
        assert_eq!(encoder.encode(Category::OfficeSupplies).unwrap(), 2);
    }

    #[test]
    fn test_from_classes_rejects_bad_lists() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            LabelEncoder::<Category>::from_classes(&empty),
            Err(EncodingError::EmptyVocabulary(Field::Category))
        ));
        assert!(matches!(
            LabelEncoder::<Category>::from_classes(&["Furniture", "Furniture"]),
            Err(EncodingError::DuplicateClass { .. })
        ));
        assert!(matches!(
            LabelEncoder::<Category>::from_classes(&["Furniture", "Gadgets"]),
            Err(EncodingError::UnrecognizedClass { .. })
        ));
        // Artifacts are exact; only request values are matched loosely.
        assert!(matches!(
            LabelEncoder::<Category>::from_classes(&["furniture"]),
            Err(EncodingError::UnrecognizedClass { .. })
        ));
    }

    #[test]
    fn test_missing_variant_fails_lookup() {
        let encoder = LabelEncoder::<ShipMode>::from_classes(&[
            "First Class",
            "Second Class",
            "Standard Class",
        ])
        .unwrap();

        assert_eq!(encoder.missing_variants(), vec![ShipMode::SameDay]);
        let err = encoder.encode(ShipMode::SameDay).unwrap_err();
        assert!(err.is_unknown_category());
        assert_eq!(encoder.encode(ShipMode::StandardClass).unwrap(), 2);
    }

    #[test]
    fn test_encode_str() {
        let encoder = LabelEncoder::<Category>::fitted();
        assert_eq!(encoder.encode_str("Technology").unwrap(), 2);
        assert_eq!(encoder.encode_str("office supplies").unwrap(), 1);
        assert!(encoder.encode_str("Gadgets").unwrap_err().is_unknown_category());
    }

    #[test]
    fn test_artifact_field_mismatch() {
        let artifact = LabelEncoder::<Region>::fitted().to_artifact();
        assert!(matches!(
            LabelEncoder::<Segment>::from_artifact(&artifact),
            Err(EncodingError::FieldMismatch {
                expected: Field::Segment,
                actual: Field::Region
            })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("le_region.json");

        let encoder = LabelEncoder::<Region>::fitted();
        encoder.save(&path).unwrap();

        let loaded = LabelEncoder::<Region>::load(&path).unwrap();
        assert_eq!(loaded, encoder);
    }
}
