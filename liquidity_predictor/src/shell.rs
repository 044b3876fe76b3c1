use std::io::{BufRead, Write};

use log::{error, info};
use market_input::form::InputForm;
use market_input::{InputError, validate_inputs};

use crate::engine::PredictionPipeline;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub submissions: usize,
    pub failed: usize,
}

/// Runs the form until the user quits, one prediction per submission.
///
/// Pipeline errors are printed and the loop goes on; only terminal I/O
/// failures end the session early.
pub fn run_session<R: BufRead, W: Write>(
    pipeline: &PredictionPipeline,
    form: &mut InputForm<R, W>,
) -> Result<SessionSummary, InputError> {
    let mut summary = SessionSummary::default();

    while let Some(inputs) = form.read_submission()? {
        summary.submissions += 1;
        validate_inputs(&inputs);

        match pipeline.evaluate(&inputs) {
            Ok(output) => {
                info!("Submission {}: ratio {:.5} ({})", summary.submissions, output.ratio, output.class);
                writeln!(form.writer(), "{output}")?;
            }
            Err(e) => {
                error!("Submission {} failed: {}", summary.submissions, e);
                summary.failed += 1;
                writeln!(form.writer(), "Error during prediction: {e}")?;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GradientBoostingRegressor, Tree};
    use crate::scaler::StandardScaler;
    use market_input::RawInputs;
    use std::io::Cursor;

    // x0 <= 0.1 ? low : high
    fn split_on_ratio(low: f64, high: f64, init: f64, learning_rate: f64) -> PredictionPipeline {
        let tree = Tree::new(
            vec![1, -1, -1],
            vec![2, -1, -1],
            vec![0, -2, -2],
            vec![0.1, -2.0, -2.0],
            vec![0.0, low, high],
        );
        let model = GradientBoostingRegressor::new(init, learning_rate, 4, vec![tree]).unwrap();
        PredictionPipeline::new(StandardScaler::identity(4), model)
    }

    fn run(pipeline: &PredictionPipeline, input: &str) -> (SessionSummary, String) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut form = InputForm::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), RawInputs::default());
        let summary = run_session(pipeline, &mut form).unwrap();
        let shown = String::from_utf8(form.writer().clone()).unwrap();
        (summary, shown)
    }

    #[test]
    fn each_submission_is_answered() {
        let pipeline = split_on_ratio(0.03, 0.2, 0.0, 1.0);
        // defaults (ratio 0.02), then volume 1e8 (ratio 0.2)
        let (summary, shown) = run(&pipeline, "\n\n\n\n\n\n\n\n1e8\n\nq\n");
        assert_eq!(summary, SessionSummary { submissions: 2, failed: 0 });
        assert!(shown.contains("Predicted Liquidity Ratio: 0.03000"));
        assert!(shown.contains("Liquidity Classification: Low"));
        assert!(shown.contains("Predicted Liquidity Ratio: 0.20000"));
        assert!(shown.contains("Liquidity Classification: High"));
    }

    #[test]
    fn failure_does_not_end_the_session() {
        // the high branch overflows to infinity
        let pipeline = split_on_ratio(0.0, 1e300, 0.04, 1e10);
        let (summary, shown) = run(&pipeline, "\n\n\n1e8\n\n\n\n\n1e7\n\n");
        assert_eq!(summary, SessionSummary { submissions: 2, failed: 1 });
        assert!(shown.contains("Error during prediction: Model returned a non-finite prediction: inf"));
        assert!(shown.contains("Predicted Liquidity Ratio: 0.04000"));
        assert!(shown.contains("Liquidity Classification: Low"));
    }

    #[test]
    fn eof_without_submission() {
        let pipeline = split_on_ratio(0.03, 0.2, 0.0, 1.0);
        let (summary, shown) = run(&pipeline, "");
        assert_eq!(summary, SessionSummary::default());
        assert!(shown.contains("1h % change"));
    }
}
