use std::fmt;

use serde::{Deserialize, Serialize};

pub const LOW_THRESHOLD: f64 = 0.05;
pub const HIGH_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiquidityClass {
    Low,
    Medium,
    High,
}

impl fmt::Display for LiquidityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LiquidityClass::Low => "Low",
            LiquidityClass::Medium => "Medium",
            LiquidityClass::High => "High",
        };
        f.write_str(label)
    }
}

/// Buckets a liquidity ratio. Lower bounds are inclusive; NaN is `Low`.
pub fn classify(ratio: f64) -> LiquidityClass {
    if ratio.is_nan() || ratio < LOW_THRESHOLD {
        LiquidityClass::Low
    } else if ratio < HIGH_THRESHOLD {
        LiquidityClass::Medium
    } else {
        LiquidityClass::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify(0.049999), LiquidityClass::Low);
        assert_eq!(classify(0.05), LiquidityClass::Medium);
        assert_eq!(classify(0.149999), LiquidityClass::Medium);
        assert_eq!(classify(0.15), LiquidityClass::High);
    }

    #[test]
    fn negative_and_infinite_ratios() {
        assert_eq!(classify(-0.2), LiquidityClass::Low);
        assert_eq!(classify(f64::NEG_INFINITY), LiquidityClass::Low);
        assert_eq!(classify(f64::INFINITY), LiquidityClass::High);
        assert_eq!(classify(f64::NAN), LiquidityClass::Low);
    }

    #[test]
    fn classification_is_deterministic() {
        for ratio in [0.0, 0.03, 0.1, 0.2, 7.5] {
            assert_eq!(classify(ratio), classify(ratio));
        }
    }

    #[test]
    fn classes_are_ordered() {
        assert!(LiquidityClass::Low < LiquidityClass::Medium);
        assert!(LiquidityClass::Medium < LiquidityClass::High);
        assert_eq!(LiquidityClass::Medium.to_string(), "Medium");
    }
}
