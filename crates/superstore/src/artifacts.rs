//! Loading the trained model and encoders.

use crate::error::ArtifactLoadError;
use crate::features::FEATURE_NAMES;
use std::path::{Path, PathBuf};
use superstore_encoding::{
    Category, EncoderSet, Field, LabelEncoder, Region, Segment, ShipMode, Vocabulary,
};
use superstore_model::{RandomForestRegressor, RegressionModel};

/// File name of the model artifact.
pub const MODEL_FILE_NAME: &str = "sales_model.json";

/// Locations of the five artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Artifact directory
    pub dir: PathBuf,
    /// Model artifact
    pub model: PathBuf,
    /// Category encoder
    pub category: PathBuf,
    /// Segment encoder
    pub segment: PathBuf,
    /// Region encoder
    pub region: PathBuf,
    /// Ship mode encoder
    pub ship_mode: PathBuf,
}

impl ArtifactPaths {
    /// Artifacts stored under `dir` with their standard names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            model: dir.join(MODEL_FILE_NAME),
            category: LabelEncoder::<Category>::artifact_path(&dir),
            segment: LabelEncoder::<Segment>::artifact_path(&dir),
            region: LabelEncoder::<Region>::artifact_path(&dir),
            ship_mode: LabelEncoder::<ShipMode>::artifact_path(&dir),
            dir,
        }
    }

    /// Encoder artifact path for an encoded field.
    pub fn encoder(&self, field: Field) -> Option<&Path> {
        match field {
            Field::Category => Some(&self.category),
            Field::Segment => Some(&self.segment),
            Field::Region => Some(&self.region),
            Field::ShipMode => Some(&self.ship_mode),
            Field::DayOfWeek => None,
        }
    }

    /// All five paths, model first.
    pub fn all(&self) -> [&Path; 5] {
        [
            &self.model,
            &self.category,
            &self.segment,
            &self.region,
            &self.ship_mode,
        ]
    }
}

/// The trained model and its label encoders.
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// Sales regression model
    pub model: RandomForestRegressor,

    /// Encoders for the categorical fields
    pub encoders: EncoderSet,
}

impl Artifacts {
    /// Load and check every artifact.
    ///
    /// # Errors
    /// Fails if any file is missing or invalid, or the model was fit on a
    /// different feature layout.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        for path in paths.all() {
            if !path.is_file() {
                return Err(ArtifactLoadError::Missing(path.to_path_buf()));
            }
        }

        let model =
            RandomForestRegressor::load(&paths.model).map_err(|source| ArtifactLoadError::Model {
                path: paths.model.clone(),
                source,
            })?;
        check_feature_layout(&model)?;

        let encoders = EncoderSet::new(
            load_encoder(&paths.category)?,
            load_encoder(&paths.segment)?,
            load_encoder(&paths.region)?,
            load_encoder(&paths.ship_mode)?,
        );

        for (field, classes) in encoders.class_counts() {
            tracing::debug!(%field, classes, "encoder classes");
        }
        tracing::info!(
            dir = %paths.dir.display(),
            trees = model.n_trees(),
            "loaded model artifacts"
        );

        Ok(Self { model, encoders })
    }

    /// Write every artifact into `paths`.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<(), ArtifactLoadError> {
        self.model
            .to_artifact()
            .save(&paths.model)
            .map_err(|source| ArtifactLoadError::Model {
                path: paths.model.clone(),
                source,
            })?;
        save_encoder(&self.encoders.category, &paths.category)?;
        save_encoder(&self.encoders.segment, &paths.segment)?;
        save_encoder(&self.encoders.region, &paths.region)?;
        save_encoder(&self.encoders.ship_mode, &paths.ship_mode)
    }
}

fn load_encoder<T: Vocabulary>(path: &Path) -> Result<LabelEncoder<T>, ArtifactLoadError> {
    LabelEncoder::load(path).map_err(|source| ArtifactLoadError::Encoder {
        path: path.to_path_buf(),
        source,
    })
}

fn save_encoder<T: Vocabulary>(
    encoder: &LabelEncoder<T>,
    path: &Path,
) -> Result<(), ArtifactLoadError> {
    encoder.save(path).map_err(|source| ArtifactLoadError::Encoder {
        path: path.to_path_buf(),
        source,
    })
}

fn check_feature_layout(model: &RandomForestRegressor) -> Result<(), ArtifactLoadError> {
    if model.n_features() != FEATURE_NAMES.len() {
        return Err(ArtifactLoadError::FeatureCount {
            expected: FEATURE_NAMES.len(),
            found: model.n_features(),
        });
    }
    if model.feature_names().iter().ne(FEATURE_NAMES.iter()) {
        return Err(ArtifactLoadError::FeatureOrder {
            expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            found: model.feature_names().to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_model::DecisionTree;

    fn forest(names: &[&str]) -> RandomForestRegressor {
        RandomForestRegressor::new(
            vec![DecisionTree::constant(1.0, names.len())],
            names.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_paths() {
        let paths = ArtifactPaths::new("/srv/models");
        assert_eq!(paths.model, PathBuf::from("/srv/models/sales_model.json"));
        assert_eq!(
            paths.encoder(Field::ShipMode),
            Some(Path::new("/srv/models/le_ship_mode.json"))
        );
        assert_eq!(paths.encoder(Field::DayOfWeek), None);
        for field in Field::ENCODED {
            let name = field.artifact_file_name().unwrap();
            assert_eq!(paths.encoder(field), Some(paths.dir.join(name).as_path()));
        }
        assert_eq!(paths.all().len(), 5);
    }

    #[test]
    fn test_feature_layout_check() {
        assert!(check_feature_layout(&forest(&FEATURE_NAMES)).is_ok());

        let mut swapped = FEATURE_NAMES;
        swapped.swap(0, 1);
        assert!(matches!(
            check_feature_layout(&forest(&swapped)),
            Err(ArtifactLoadError::FeatureOrder { .. })
        ));

        assert!(matches!(
            check_feature_layout(&forest(&FEATURE_NAMES[..10])),
            Err(ArtifactLoadError::FeatureCount {
                expected: 11,
                found: 10
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        match Artifacts::load(&ArtifactPaths::new(dir.path())) {
            Err(ArtifactLoadError::Missing(path)) => {
                assert!(path.ends_with(MODEL_FILE_NAME));
            }
            other => panic!("expected missing artifact, got {other:?}"),
        }
    }
}
