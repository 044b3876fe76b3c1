use log::debug;
use market_input::RawInputs;

use crate::misc::FeatureVector;

/// Ratio of 24h volume to market cap. A zero market cap yields exactly 0.
pub fn volume_to_market_cap(volume_usd: f64, market_cap_usd: f64) -> f64 {
    if market_cap_usd == 0.0 {
        return 0.0;
    }
    volume_usd / market_cap_usd
}

/// Assembles the model input in the fixed column order.
///
/// The order is not checked against the loaded feature list here; the
/// artifact loader refuses a list that does not match `FEATURE_NAMES`.
pub fn build_features(inputs: &RawInputs) -> FeatureVector {
    let ratio = volume_to_market_cap(inputs.volume_usd, inputs.market_cap_usd);
    let features = FeatureVector::new(
        ratio,
        inputs.one_h_change,
        inputs.twenty_four_h_change,
        inputs.seven_d_change,
    );
    debug!("Built features {:?}", features.as_slice());
    features
}
