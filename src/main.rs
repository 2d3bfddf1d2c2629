use anyhow::{Context, Result};
use depletion_predictor::{predict_json, DepletionPredictor, PredictorConfig};
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries exactly one line; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cfg = PredictorConfig::from_env()?;
    let predictor = DepletionPredictor::new(cfg);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read samples from stdin")?;

    let prediction = predict_json(&predictor, &input).context("prediction failed")?;
    tracing::info!("prediction: {:?}", prediction);
    println!("{}", prediction);
    Ok(())
}
