use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::{
    config::PredictorConfig,
    error::PredictError,
    types::{day_offsets, Prediction, Sample, MICROS_PER_DAY},
};

/// Slopes below this magnitude (units of `remaining` per day) carry no trend.
pub const DEGENERATE_SLOPE: f64 = 1e-6;

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fits on centered data. When every x coincides (a single sample, or all
    /// readings at the same instant) the minimum-norm solution is returned:
    /// a flat line through the mean of `ys`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, PredictError> {
        if xs.len() != ys.len() {
            return Err(PredictError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(PredictError::EmptyInput);
        }

        let n = xs.len() as f64;
        let mx = xs.iter().sum::<f64>() / n;
        let my = ys.iter().sum::<f64>() / n;
        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mx;
            sxy += dx * (y - my);
            sxx += dx * dx;
        }

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        let intercept = my - slope * mx;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(PredictError::NonFiniteFit);
        }
        Ok(Self { slope, intercept })
    }

    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn is_degenerate(&self) -> bool {
        self.slope.abs() < DEGENERATE_SLOPE
    }

    /// x at which the line reaches zero; `None` for a degenerate slope.
    pub fn zero_crossing(&self) -> Option<f64> {
        (!self.is_degenerate()).then(|| -self.intercept / self.slope)
    }
}

/// Extrapolates the day a tank's remaining level reaches zero.
pub struct DepletionPredictor {
    config: PredictorConfig,
}

impl DepletionPredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    /// Fits `remaining` against elapsed days since `samples[0]` and returns
    /// the calendar date of the zero crossing.
    ///
    /// Every date is validated before any gate is applied, so malformed input
    /// is always an error. A slope under [`DEGENERATE_SLOPE`], or fewer
    /// samples than `min_samples`, yields [`Prediction::Indeterminate`].
    pub fn predict(&self, samples: &[Sample]) -> Result<Prediction, PredictError> {
        let offsets = day_offsets(samples)?;

        if samples.len() < self.config.min_samples {
            tracing::debug!(
                "only {} samples, {} required; skipping fit",
                samples.len(),
                self.config.min_samples
            );
            return Ok(Prediction::Indeterminate);
        }

        let levels: Vec<f64> = samples.iter().map(|s| s.remaining).collect();
        let fit = LinearFit::fit(&offsets, &levels)?;

        let Some(depletion_day) = fit.zero_crossing() else {
            self.log_fit(samples.len(), &fit, None);
            return Ok(Prediction::Indeterminate);
        };
        self.log_fit(samples.len(), &fit, Some(depletion_day));

        let base = samples[0].instant(0)?;
        Ok(Prediction::Depletion(date_after(base, depletion_day)?))
    }

    fn log_fit(&self, n: usize, fit: &LinearFit, depletion_day: Option<f64>) {
        let summary = format!(
            "fit n={} slope={:.6} intercept={:.3} depletion_day={:?}",
            n, fit.slope, fit.intercept, depletion_day
        );
        if self.config.log_fit {
            tracing::info!("{}", summary);
        } else {
            tracing::debug!("{}", summary);
        }
    }
}

impl Default for DepletionPredictor {
    fn default() -> Self {
        Self::new(PredictorConfig::default())
    }
}

/// Calendar date reached by adding `days` (rounded to the microsecond) to `base`.
/// Only years 1 through 9999 fit the `YYYY-MM-DD` output.
pub fn date_after(base: NaiveDateTime, days: f64) -> Result<NaiveDate, PredictError> {
    let out_of_range = || PredictError::DateOutOfRange { days };

    let micros = (days * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    let date = base
        .checked_add_signed(Duration::microseconds(micros as i64))
        .ok_or_else(out_of_range)?
        .date();
    if !(1..=9999).contains(&date.year()) {
        return Err(out_of_range());
    }
    Ok(date)
}
