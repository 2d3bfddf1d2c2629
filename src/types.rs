use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PredictError;

/// Rendered in place of a date when no trend can be extracted from the history.
pub const INDETERMINATE_MESSAGE: &str =
    "No se puede hacer una predicción: los datos son constantes o insuficientes.";

/// Layout of `Sample::date`, e.g. `2024-01-01T00:00:00.000Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

pub(crate) const MICROS_PER_DAY: f64 = 86_400_000_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sample {
    pub date: String,   // UTC instant, TIMESTAMP_FORMAT
    pub remaining: f64, // gas left at `date`
    // any other fields in the record (siphonId, shots, ...) are ignored
}

impl Sample {
    pub fn new(date: impl Into<String>, remaining: f64) -> Self {
        Self {
            date: date.into(),
            remaining,
        }
    }

    /// Parsed `date`; `index` is only used to locate the sample in the error.
    pub fn instant(&self, index: usize) -> Result<NaiveDateTime, PredictError> {
        parse_timestamp(&self.date).ok_or_else(|| PredictError::InvalidDate {
            index,
            value: self.date.clone(),
        })
    }
}

/// Outcome of a prediction. `Display` gives the one-line form printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Depletion(NaiveDate),
    Indeterminate,
}

impl Prediction {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Prediction::Depletion(d) => Some(*d),
            Prediction::Indeterminate => None,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Depletion(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Prediction::Indeterminate => f.write_str(INDETERMINATE_MESSAGE),
        }
    }
}

/// Strict timestamp parsing: an unsigned four-digit year, seconds 00-59, a
/// fraction of 1 to 6 digits and a literal trailing `Z`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let body = raw.strip_suffix('Z')?;
    let year = body.as_bytes().get(..5)?;
    if !year[..4].iter().all(u8::is_ascii_digit) || year[4] != b'-' {
        return None;
    }
    let (_, fraction) = body.rsplit_once('.')?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let t = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?;
    // chrono keeps a leap second as nanosecond >= 1e9
    (t.nanosecond() < 1_000_000_000).then_some(t)
}

/// Elapsed days from `base` to `t`, fractional, microsecond resolution.
pub fn days_between(base: NaiveDateTime, t: NaiveDateTime) -> f64 {
    let delta = t.signed_duration_since(base);
    match delta.num_microseconds() {
        Some(us) => us as f64 / MICROS_PER_DAY,
        // only spans of ~290k years overflow microseconds
        None => delta.num_milliseconds() as f64 / MILLIS_PER_DAY,
    }
}

/// Day-offset of every sample relative to the first one.
pub fn day_offsets(samples: &[Sample]) -> Result<Vec<f64>, PredictError> {
    let base = samples.first().ok_or(PredictError::EmptyInput)?.instant(0)?;
    samples
        .iter()
        .enumerate()
        .map(|(i, s)| Ok(days_between(base, s.instant(i)?)))
        .collect()
}

/// Decode the stdin payload: a JSON array of sample records.
pub fn parse_samples(json: &str) -> Result<Vec<Sample>, PredictError> {
    Ok(serde_json::from_str(json)?)
}
