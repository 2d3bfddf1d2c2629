use thiserror::Error;

/// Fatal input errors. None of these are recovered from: they propagate up to
/// `main` and end the process with a non-zero status.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("no samples provided")]
    EmptyInput,

    #[error("sample {index}: invalid date {value:?} (expected %Y-%m-%dT%H:%M:%S.%fZ)")]
    InvalidDate { index: usize, value: String },

    #[error("invalid input JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("length mismatch: {xs} x values, {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("linear fit produced a non-finite coefficient")]
    NonFiniteFit,

    #[error("depletion day {days} is outside the representable date range")]
    DateOutOfRange { days: f64 },
}
