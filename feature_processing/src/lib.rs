pub mod misc;
pub mod processor;

pub use crate::misc::{FEATURE_NAMES, FeatureVector, NUM_FEATURES};
pub use crate::processor::{build_features, volume_to_market_cap};
