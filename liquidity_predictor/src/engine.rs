use feature_processing::build_features;
use log::debug;
use market_input::RawInputs;
use ndarray::Array2;

use crate::artifacts::ArtifactStore;
use crate::classifier::classify;
use crate::error::PipelineError;
use crate::misc::PredictionOutput;
use crate::model::Regressor;
use crate::scaler::Transformer;

/// Scaler transform followed by model predict, over read-only artifacts.
pub struct PredictionPipeline {
    scaler: Box<dyn Transformer>,
    model: Box<dyn Regressor>,
}

impl PredictionPipeline {
    pub fn new(scaler: impl Transformer + 'static, model: impl Regressor + 'static) -> Self {
        Self {
            scaler: Box::new(scaler),
            model: Box::new(model),
        }
    }

    pub fn from_store(store: ArtifactStore) -> Self {
        Self::new(store.scaler, store.model)
    }

    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    /// Runs one feature row through the scaler and the model.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PipelineError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(PipelineError::ShapeMismatch {
                expected,
                found: features.len(),
            });
        }

        let input = Array2::from_shape_vec((1, features.len()), features.to_vec())?;
        let scaled = self.scaler.transform(input.view())?;
        debug!("Scaled features {:?}", scaled.row(0).to_vec());

        let predictions = self.model.predict(scaled.view())?;
        let ratio = predictions.get(0).copied().ok_or(PipelineError::EmptyPrediction)?;
        if !ratio.is_finite() {
            return Err(PipelineError::NonFinitePrediction(ratio));
        }
        Ok(ratio)
    }

    /// Builds features from a submission, predicts and classifies.
    pub fn evaluate(&self, inputs: &RawInputs) -> Result<PredictionOutput, PipelineError> {
        let features = build_features(inputs);
        let ratio = self.predict(features.as_slice())?;
        let class = classify(ratio);
        debug!("Predicted ratio {} ({})", ratio, class);
        Ok(PredictionOutput { ratio, class })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LiquidityClass;
    use crate::scaler::StandardScaler;
    use ndarray::{Array1, ArrayView2};
    use std::cell::RefCell;

    /// Returns a fixed value and remembers the rows it was asked about.
    struct StubModel {
        value: f64,
        seen: RefCell<Vec<Vec<f64>>>,
    }

    impl StubModel {
        fn returning(value: f64) -> Self {
            Self { value, seen: RefCell::new(Vec::new()) }
        }
    }

    impl Regressor for StubModel {
        fn n_features(&self) -> usize {
            4
        }

        fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, PipelineError> {
            self.seen.borrow_mut().extend(x.rows().into_iter().map(|row| row.to_vec()));
            Ok(Array1::from_elem(x.nrows(), self.value))
        }
    }

    impl Regressor for std::rc::Rc<StubModel> {
        fn n_features(&self) -> usize {
            self.as_ref().n_features()
        }

        fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, PipelineError> {
            self.as_ref().predict(x)
        }
    }

    struct EmptyModel;

    impl Regressor for EmptyModel {
        fn n_features(&self) -> usize {
            4
        }

        fn predict(&self, _x: ArrayView2<f64>) -> Result<Array1<f64>, PipelineError> {
            Ok(Array1::zeros(0))
        }
    }

    fn pipeline_returning(value: f64) -> PredictionPipeline {
        PredictionPipeline::new(StandardScaler::identity(4), StubModel::returning(value))
    }

    #[test]
    fn stub_predictions_are_classified() {
        let inputs = RawInputs::default();
        assert_eq!(pipeline_returning(0.03).evaluate(&inputs).unwrap().class, LiquidityClass::Low);
        assert_eq!(pipeline_returning(0.10).evaluate(&inputs).unwrap().class, LiquidityClass::Medium);
        assert_eq!(pipeline_returning(0.20).evaluate(&inputs).unwrap().class, LiquidityClass::High);
    }

    #[test]
    fn model_sees_example_feature_row() {
        let model = std::rc::Rc::new(StubModel::returning(0.03));
        let pipeline = PredictionPipeline::new(StandardScaler::identity(4), model.clone());

        let output = pipeline.evaluate(&RawInputs::default()).unwrap();
        assert_eq!(output.ratio, 0.03);
        assert_eq!(*model.seen.borrow(), vec![vec![0.02, 0.01, 0.02, 0.05]]);
    }

    #[test]
    fn zero_market_cap_proceeds_normally() {
        let model = std::rc::Rc::new(StubModel::returning(0.10));
        let pipeline = PredictionPipeline::new(StandardScaler::identity(4), model.clone());
        let inputs = RawInputs { market_cap_usd: 0.0, volume_usd: 9e9, ..RawInputs::default() };

        let output = pipeline.evaluate(&inputs).unwrap();
        assert_eq!(output.class, LiquidityClass::Medium);
        assert_eq!(model.seen.borrow()[0][0], 0.0);
    }

    #[test]
    fn wrong_length_fails_then_recovers() {
        let pipeline = pipeline_returning(0.2);

        let err = pipeline.predict(&[0.02, 0.01, 0.02]).unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { expected: 4, found: 3 }));
        assert!(err.to_string().contains("Expected 4 features, got 3"));

        assert_eq!(pipeline.predict(&[0.02, 0.01, 0.02, 0.05]).unwrap(), 0.2);
    }

    #[test]
    fn non_finite_prediction_is_an_error() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = pipeline_returning(value).evaluate(&RawInputs::default()).unwrap_err();
            assert!(matches!(err, PipelineError::NonFinitePrediction(_)));
        }
    }

    #[test]
    fn empty_prediction_is_an_error() {
        let pipeline = PredictionPipeline::new(StandardScaler::identity(4), EmptyModel);
        let err = pipeline.predict(&[0.0; 4]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyPrediction));
    }
}
