//! Ordinary least squares (OLS) line
//!
//! Closed-form estimator for `y = slope * x + intercept`:
//!
//! ```text
//! slope     = (n Σxy - Σx Σy) / (n Σx² - (Σx)²)
//! intercept = (Σy - slope Σx) / n
//! ```
//!
//! The sums are accumulated around the means, which is algebraically the
//! same estimator with less cancellation for large `x`.

use pa_core::data::validate_regression;
use pa_core::RegressionDataPoint;

use crate::base::{FitStatistics, ModelError, Result};
use crate::regression::result::polynomial_expression;
use crate::regression::{RegressionKind, RegressionResult};

/// Simple linear regression model
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression;

impl LinearRegression {
    /// Minimum number of points for a line
    pub const MIN_POINTS: usize = 2;

    /// Create a new linear regression model
    pub fn new() -> Self {
        Self
    }

    /// Fit the OLS line
    pub fn fit(&self, data: &[RegressionDataPoint]) -> Result<RegressionResult> {
        validate_regression(data, Self::MIN_POINTS, "linear regression")?;

        let (slope, intercept) = Self::estimate(data)?;

        let fitted: Vec<f64> = data.iter().map(|p| slope * p.x + intercept).collect();
        let observed: Vec<f64> = data.iter().map(|p| p.y).collect();
        let residuals: Vec<f64> = observed.iter().zip(&fitted).map(|(y, f)| y - f).collect();

        let (statistics, r_squared) = FitStatistics::from_fit(&observed, &fitted, 1);

        Ok(RegressionResult {
            kind: RegressionKind::Linear,
            coefficients: vec![slope],
            intercept: Some(intercept),
            r_squared,
            equation: format!("y = {}", polynomial_expression(intercept, &[slope])),
            predictions: fitted,
            residuals,
            statistics,
        })
    }

    /// Slope and intercept of the least squares line
    fn estimate(data: &[RegressionDataPoint]) -> Result<(f64, f64)> {
        let first_x = data[0].x;
        if data.iter().all(|p| p.x == first_x) {
            return Err(ModelError::numerical(
                "all x values are identical, slope denominator is zero",
                "linear_regression",
            ));
        }

        let n = data.len() as f64;
        let mean_x = data.iter().map(|p| p.x).sum::<f64>() / n;
        let mean_y = data.iter().map(|p| p.y).sum::<f64>() / n;

        let (sxy, sxx) = data.iter().fold((0.0, 0.0), |(sxy, sxx), p| {
            let dx = p.x - mean_x;
            (sxy + dx * (p.y - mean_y), sxx + dx * dx)
        });

        if sxx == 0.0 || !sxx.is_finite() {
            return Err(ModelError::numerical(
                format!("degenerate x variance ({})", sxx),
                "linear_regression",
            ));
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        Ok((slope, intercept))
    }
}
