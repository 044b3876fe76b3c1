use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use feature_processing::FEATURE_NAMES;
use log::info;
use market_input::config::ArtifactPaths;
use serde::de::DeserializeOwned;

use crate::error::ArtifactLoadError;
use crate::model::{GradientBoostingRegressor, RawGradientBoostingRegressor, Regressor};
use crate::scaler::{RawStandardScaler, StandardScaler, Transformer};

enum Format {
    Json,
    Bincode,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ArtifactLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("bin") => Ok(Format::Bincode),
            _ => Err(ArtifactLoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads one serialized artifact, picking the codec from the file extension.
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactLoadError> {
    let format = Format::of(path)?;
    let file = File::open(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    match format {
        Format::Json => serde_json::from_reader(reader).map_err(|source| ArtifactLoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Bincode => bincode::deserialize_from(reader).map_err(|source| ArtifactLoadError::Bincode {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Fails unless `names` is exactly `FEATURE_NAMES`, in order.
pub fn check_feature_order(names: &[String]) -> Result<(), ArtifactLoadError> {
    if names.iter().map(String::as_str).eq(FEATURE_NAMES) {
        return Ok(());
    }
    Err(ArtifactLoadError::FeatureOrderMismatch {
        expected: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
        found: names.to_vec(),
    })
}

/// The three startup artifacts, validated against each other.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub scaler: StandardScaler,
    pub model: GradientBoostingRegressor,
    pub feature_names: Vec<String>,
}

impl ArtifactStore {
    pub fn new(
        scaler: StandardScaler,
        model: GradientBoostingRegressor,
        feature_names: Vec<String>,
    ) -> Result<Self, ArtifactLoadError> {
        check_feature_order(&feature_names)?;

        let features = feature_names.len();
        if scaler.n_features() != features || model.n_features() != features {
            return Err(ArtifactLoadError::DimensionMismatch {
                scaler: scaler.n_features(),
                model: model.n_features(),
                features,
            });
        }

        Ok(Self {
            scaler,
            model,
            feature_names,
        })
    }

    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        info!("Loading scaler from {}", paths.scaler_path.display());
        let raw_scaler: RawStandardScaler = read_artifact(&paths.scaler_path)?;
        let scaler = StandardScaler::try_from(raw_scaler)?;

        info!("Loading model from {}", paths.model_path.display());
        let raw_model: RawGradientBoostingRegressor = read_artifact(&paths.model_path)?;
        let model = GradientBoostingRegressor::try_from(raw_model)?;

        info!("Loading feature list from {}", paths.features_path.display());
        let feature_names: Vec<String> = read_artifact(&paths.features_path)?;

        let store = Self::new(scaler, model, feature_names)?;
        info!(
            "Artifacts ready: {} features, {} trees",
            store.feature_names.len(),
            store.model.n_trees()
        );
        Ok(store)
    }
}
