use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactLoadError, PipelineError};

/// Fitted feature transform applied before the model.
pub trait Transformer {
    fn n_features(&self) -> usize;
    fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, PipelineError>;
}

/// Standardisation with per-column `mean` and `scale`: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStandardScaler")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Unchecked wire form of [`StandardScaler`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawStandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<RawStandardScaler> for StandardScaler {
    type Error = ArtifactLoadError;

    fn try_from(raw: RawStandardScaler) -> Result<Self, Self::Error> {
        Self::new(raw.mean, raw.scale)
    }
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactLoadError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Identity transform over `n` columns.
    pub fn identity(n: usize) -> Self {
        Self {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        }
    }

    fn validate(&self) -> Result<(), ArtifactLoadError> {
        if self.mean.is_empty() {
            return Err(ArtifactLoadError::InvalidScaler("no fitted columns".to_string()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(ArtifactLoadError::InvalidScaler(format!(
                "{} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(ArtifactLoadError::InvalidScaler(format!("mean of column {i} is not finite")));
        }
        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(ArtifactLoadError::InvalidScaler(format!(
                "scale of column {i} must be finite and non-zero"
            )));
        }
        Ok(())
    }
}

impl Transformer for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, PipelineError> {
        if x.ncols() != self.n_features() {
            return Err(PipelineError::ShapeMismatch {
                expected: self.n_features(),
                found: x.ncols(),
            });
        }

        let mean = ArrayView1::from(&self.mean[..]);
        let scale = ArrayView1::from(&self.scale[..]);
        Ok((&x - &mean) / &scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardises_each_column() {
        let scaler = StandardScaler::new(vec![1.0, -2.0], vec![2.0, 0.5]).unwrap();
        let x = array![[3.0, -2.0], [1.0, 0.0]];
        let scaled = scaler.transform(x.view()).unwrap();
        assert_eq!(scaled, array![[1.0, 0.0], [0.0, 4.0]]);
    }

    #[test]
    fn identity_leaves_values_alone() {
        let x = array![[0.02, 0.01, 0.02, 0.05]];
        let scaled = StandardScaler::identity(4).transform(x.view()).unwrap();
        assert_eq!(scaled, x);
    }

    #[test]
    fn wrong_width_is_rejected() {
        let scaler = StandardScaler::identity(4);
        let x = array![[1.0, 2.0, 3.0]];
        let err = scaler.transform(x.view()).unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { expected: 4, found: 3 }));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![0.0, 0.0], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![0.0]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn deserialising_validates_parameters() {
        let zero_scale = r#"{ "mean": [0.0, 0.0], "scale": [1.0, 0.0] }"#;
        assert!(serde_json::from_str::<StandardScaler>(zero_scale).is_err());

        let scaler: StandardScaler = serde_json::from_str(r#"{ "mean": [1.0], "scale": [2.0] }"#).unwrap();
        assert_eq!(scaler, StandardScaler::new(vec![1.0], vec![2.0]).unwrap());
    }
}
