use std::fmt;

use serde::Serialize;

use crate::classifier::LiquidityClass;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionOutput {
    pub ratio: f64,
    pub class: LiquidityClass,
}

impl fmt::Display for PredictionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted Liquidity Ratio: {:.5}", self.ratio)?;
        write!(f, "Liquidity Classification: {}", self.class)
    }
}
