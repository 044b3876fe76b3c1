pub mod config;
pub mod error;
pub mod form;
pub mod logger;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use crate::error::InputError;

/// One form submission. Any combination of values is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    pub one_h_change: f64,
    pub twenty_four_h_change: f64,
    pub seven_d_change: f64,
    pub volume_usd: f64,
    pub market_cap_usd: f64,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            one_h_change: 0.01,
            twenty_four_h_change: 0.02,
            seven_d_change: 0.05,
            volume_usd: 1e7,
            market_cap_usd: 5e8,
        }
    }
}

/// Warns about inputs that are legal but probably a typo. Never rejects.
pub fn validate_inputs(data: &RawInputs) -> bool {
    let mut is_plausible = true;
    let values = [
        data.one_h_change,
        data.twenty_four_h_change,
        data.seven_d_change,
        data.volume_usd,
        data.market_cap_usd,
    ];

    if values.iter().any(|v| !v.is_finite()) {
        warn!("Non-finite value in submission: {:?}", data);
        is_plausible = false;
    }

    if data.volume_usd < 0.0 {
        warn!("Volume cannot be negative");
        is_plausible = false;
    }

    if data.market_cap_usd < 0.0 {
        warn!("Market cap cannot be negative");
        is_plausible = false;
    } else if data.market_cap_usd == 0.0 {
        debug!("Market cap is zero, volume ratio falls back to 0");
    }

    is_plausible
}
