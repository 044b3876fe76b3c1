use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Source};
use log::debug;
use serde::Deserialize;

use crate::RawInputs;
use crate::error::InputError;

pub const DEFAULT_CONFIG_FILE: &str = "liquidity.toml";
const ENV_PREFIX: &str = "LIQUIDITY";

/// Locations of the three startup artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
    pub features_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("artifacts/scaler.json"),
            model_path: PathBuf::from("artifacts/gradient_boost_model.json"),
            features_path: PathBuf::from("artifacts/features.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub artifacts: ArtifactPaths,
    /// Values pre-filled in the form and used by one-shot predictions.
    pub form: RawInputs,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            artifacts: ArtifactPaths::default(),
            form: RawInputs::default(),
        }
    }
}

impl AppConfig {
    /// Reads `.env`, then the TOML file, then `LIQUIDITY__*` variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, InputError> {
        match dotenvy::dotenv() {
            Ok(env_file) => debug!("Loaded environment from {}", env_file.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        Self::layered(file, env_overrides())
    }

    fn layered<S>(file: S, env: Environment) -> Result<Self, InputError>
    where
        S: Source + Send + Sync + 'static,
    {
        let cfg = Config::builder().add_source(file).add_source(env).build()?;

        Ok(cfg.try_deserialize()?)
    }

    pub fn from_toml(contents: &str) -> Result<Self, InputError> {
        let cfg = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

fn env_overrides() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
