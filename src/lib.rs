pub mod config;
pub mod error;
pub mod model;
pub mod types;

pub use config::PredictorConfig;
pub use error::PredictError;
pub use model::{DepletionPredictor, LinearFit, DEGENERATE_SLOPE};
pub use types::{Prediction, Sample, INDETERMINATE_MESSAGE};

/// Decode a JSON array of samples and predict its depletion date.
pub fn predict_json(predictor: &DepletionPredictor, json: &str) -> Result<Prediction, PredictError> {
    let samples = types::parse_samples(json)?;
    tracing::debug!("decoded {} samples", samples.len());
    predictor.predict(&samples)
}
