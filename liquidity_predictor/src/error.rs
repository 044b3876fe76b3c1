use std::path::PathBuf;

use thiserror::Error;

/// Startup failures. The process cannot serve submissions after one of these.
#[derive(Error, Debug)]
pub enum ArtifactLoadError {
    #[error("Cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot decode JSON artifact {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot decode bincode artifact {path}: {source}")]
    Bincode {
        path: PathBuf,
        source: bincode::Error,
    },

    #[error("Unsupported artifact format for {0}, expected .json or .bin")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid scaler: {0}")]
    InvalidScaler(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Feature list {found:?} does not match expected order {expected:?}")]
    FeatureOrderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Artifacts disagree on feature count: scaler {scaler}, model {model}, feature list {features}")]
    DimensionMismatch {
        scaler: usize,
        model: usize,
        features: usize,
    },
}

/// Per-submission failures. Reported to the user, never fatal.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Expected {expected} features, got {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Invalid input shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Model returned no prediction")]
    EmptyPrediction,

    #[error("Model returned a non-finite prediction: {0}")]
    NonFinitePrediction(f64),
}
