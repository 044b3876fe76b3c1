use serde::{Deserialize, Serialize};

pub const NUM_FEATURES: usize = 4;

/// Column order the scaler and model were fitted with.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = ["volume_to_market_cap", "1h", "24h", "7d"];

/// Model input, laid out as `[volume_to_market_cap, 1h, 24h, 7d]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    pub fn new(
        volume_to_market_cap: f64,
        one_h_change: f64,
        twenty_four_h_change: f64,
        seven_d_change: f64,
    ) -> Self {
        Self([volume_to_market_cap, one_h_change, twenty_four_h_change, seven_d_change])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn volume_to_market_cap(&self) -> f64 {
        self.0[0]
    }

    pub fn one_h_change(&self) -> f64 {
        self.0[1]
    }

    pub fn twenty_four_h_change(&self) -> f64 {
        self.0[2]
    }

    pub fn seven_d_change(&self) -> f64 {
        self.0[3]
    }
}
