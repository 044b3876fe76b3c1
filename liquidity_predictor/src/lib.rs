pub mod artifacts;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod misc;
pub mod model;
pub mod scaler;
pub mod shell;

pub use crate::artifacts::ArtifactStore;
pub use crate::classifier::{LiquidityClass, classify};
pub use crate::engine::PredictionPipeline;
pub use crate::error::{ArtifactLoadError, PipelineError};
pub use crate::misc::PredictionOutput;
