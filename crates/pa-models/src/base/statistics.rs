//! Goodness-of-fit statistics for regression results

use serde::{Deserialize, Serialize};

/// Residual sums below this (relative to the response scale) count as zero
/// when the response is constant
const ZERO_SUM_TOLERANCE: f64 = 1e-12;

/// Fit statistics attached to every regression result
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitStatistics {
    /// Number of observations
    pub n_obs: usize,
    /// Residual sum of squares
    pub rss: f64,
    /// Total sum of squares around the mean response
    pub tss: f64,
    /// Adjusted R-squared, undefined without residual degrees of freedom
    pub adj_r_squared: Option<f64>,
    /// Residual standard error
    pub residual_std_error: Option<f64>,
    /// Gradient descent iterations run (logistic only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    /// Mean log-loss at the final weights (logistic only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_loss: Option<f64>,
}

impl FitStatistics {
    /// Compute statistics from observed and fitted values
    ///
    /// `n_predictors` excludes the intercept.
    pub fn from_fit(observed: &[f64], fitted: &[f64], n_predictors: usize) -> (Self, f64) {
        let n = observed.len();
        let rss: f64 = observed
            .iter()
            .zip(fitted)
            .map(|(y, f)| (y - f).powi(2))
            .sum();
        let tss = pa_core::linalg::sum_squared_deviations(observed);
        let constant = tss == 0.0 || observed.windows(2).all(|w| w[0] == w[1]);
        let scale = observed.iter().map(|y| y * y).sum::<f64>().max(1.0);

        let r_squared = if constant {
            // no variation to explain: perfect or nothing
            if rss <= ZERO_SUM_TOLERANCE * scale {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - rss / tss
        };

        let df_residual = n.checked_sub(n_predictors + 1).filter(|&df| df > 0);
        let adj_r_squared = df_residual
            .map(|df| 1.0 - (1.0 - r_squared) * ((n as f64 - 1.0) / df as f64));
        let residual_std_error = df_residual.map(|df| (rss / df as f64).sqrt());

        let stats = Self {
            n_obs: n,
            rss,
            tss,
            adj_r_squared,
            residual_std_error,
            iterations: None,
            log_loss: None,
        };
        (stats, r_squared)
    }
}
