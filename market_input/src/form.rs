use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::RawInputs;
use crate::error::InputError;

/// Labels in prompt order.
pub const FIELD_LABELS: [&str; 5] = [
    "1h % change",
    "24h % change",
    "7d % change",
    "24h Volume USD",
    "Market Cap USD",
];

const QUIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

/// Line-oriented form over any reader/writer pair.
///
/// Each field shows its current value; an empty line keeps it. After a
/// submission the submitted values become the new pre-filled values.
pub struct InputForm<R, W> {
    reader: R,
    writer: W,
    current: RawInputs,
}

impl<R: BufRead, W: Write> InputForm<R, W> {
    pub fn new(reader: R, writer: W, defaults: RawInputs) -> Self {
        Self {
            reader,
            writer,
            current: defaults,
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Collects one submission. `Ok(None)` means the user quit or input ended.
    pub fn read_submission(&mut self) -> Result<Option<RawInputs>, InputError> {
        let defaults = [
            self.current.one_h_change,
            self.current.twenty_four_h_change,
            self.current.seven_d_change,
            self.current.volume_usd,
            self.current.market_cap_usd,
        ];
        let mut values = defaults;

        for (slot, (label, default)) in values.iter_mut().zip(FIELD_LABELS.iter().zip(defaults)) {
            match self.read_field(label, default)? {
                Some(value) => *slot = value,
                None => return Ok(None),
            }
        }

        let [one_h_change, twenty_four_h_change, seven_d_change, volume_usd, market_cap_usd] = values;
        let submission = RawInputs {
            one_h_change,
            twenty_four_h_change,
            seven_d_change,
            volume_usd,
            market_cap_usd,
        };
        debug!("Form submitted: {:?}", submission);
        self.current = submission;

        Ok(Some(submission))
    }

    fn read_field(&mut self, label: &str, default: f64) -> Result<Option<f64>, InputError> {
        loop {
            write!(self.writer, "{label} [{default}]: ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(Some(default));
            }
            if QUIT_COMMANDS.contains(&answer.to_ascii_lowercase().as_str()) {
                return Ok(None);
            }

            match answer.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    warn!("Rejected input {:?} for {}: {}", answer, label, e);
                    writeln!(self.writer, "'{answer}' is not a number, try again")?;
                }
            }
        }
    }
}
