//! Confidence bounds around point forecasts
//!
//! The half-width is `z · se` for every horizon: `z` is the two-tailed
//! standard normal critical value and `se` the sample standard deviation of
//! the in-sample one-step residuals. Bounds do not widen with the horizon.

use statrs::distribution::{ContinuousCDF, Normal};

use pa_core::linalg::std_dev;

use crate::base::{ModelError, Result};

/// Two-tailed standard normal critical value for a confidence level in `(0, 1)`
pub fn z_critical(confidence: f64) -> Result<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ModelError::config(
            "confidence_interval",
            format!("must be in (0, 1), got {}", confidence),
        ));
    }
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| ModelError::numerical(e.to_string(), "z_critical"))?;
    Ok(standard.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// Sample standard deviation of residuals; 0 with fewer than two
pub fn standard_error(residuals: &[f64]) -> f64 {
    std_dev(residuals, 1).unwrap_or(0.0)
}

/// `(lower, upper)` around `value`
pub fn bounds(value: f64, half_width: f64) -> (f64, f64) {
    (value - half_width, value + half_width)
}
