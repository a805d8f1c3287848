//! Logistic regression
//!
//! Models `P(y = 1 | x) = σ(w x + b)` and minimizes the mean log-loss by
//! batch gradient descent from zero weights. `x` is standardized before the
//! descent and the weights are mapped back to the raw scale afterwards, so
//! the fixed learning rate behaves the same regardless of the units of `x`.
//! No randomness is involved.

use pa_core::data::{check_range, validate_regression};
use pa_core::{linalg, RegressionDataPoint};

use crate::base::{FitStatistics, Result};
use crate::regression::result::{polynomial_expression, sigmoid};
use crate::regression::{LogisticConfig, RegressionKind, RegressionResult};

/// Probabilities are clamped this far from 0 and 1 inside the log-loss
const PROBABILITY_CLAMP: f64 = 1e-15;

/// Logistic regression model
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticRegression {
    config: LogisticConfig,
}

impl LogisticRegression {
    /// Minimum number of points
    pub const MIN_POINTS: usize = 2;

    /// Create a model with the default learning rate and iteration cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model from a configuration
    pub fn with_config(config: LogisticConfig) -> Self {
        Self { config }
    }

    /// Set the learning rate
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Fit the model by gradient descent
    pub fn fit(&self, data: &[RegressionDataPoint]) -> Result<RegressionResult> {
        self.config.validate()?;
        validate_regression(data, Self::MIN_POINTS, "logistic regression")?;
        for (index, point) in data.iter().enumerate() {
            check_range("y", index, point.y, 0.0, 1.0)?;
        }

        let xs: Vec<f64> = data.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = data.iter().map(|p| p.y).collect();

        let mean_x = linalg::mean(&xs).unwrap_or(0.0);
        let std_x = linalg::std_dev(&xs, 0).unwrap_or(0.0);
        let z: Vec<f64> = if std_x > 0.0 {
            xs.iter().map(|x| (x - mean_x) / std_x).collect()
        } else {
            vec![0.0; xs.len()]
        };

        let (w, b, iterations) = self.descend(&z, &ys);

        // Undo standardization: w z + b = (w / s) x + (b - w m / s)
        let (slope, intercept) = if std_x > 0.0 {
            (w / std_x, b - w * mean_x / std_x)
        } else {
            (0.0, b)
        };

        let probabilities: Vec<f64> = xs.iter().map(|x| sigmoid(slope * x + intercept)).collect();
        let residuals: Vec<f64> = ys
            .iter()
            .zip(&probabilities)
            .map(|(y, p)| y - p)
            .collect();

        let (mut statistics, r_squared) = FitStatistics::from_fit(&ys, &probabilities, 1);
        statistics.iterations = Some(iterations);
        statistics.log_loss = Some(log_loss(&ys, &probabilities));

        tracing::trace!(iterations, slope, intercept, "logistic regression finished");

        Ok(RegressionResult {
            kind: RegressionKind::Logistic,
            coefficients: vec![slope],
            intercept: Some(intercept),
            r_squared,
            equation: format!(
                "p = 1 / (1 + e^-({}))",
                polynomial_expression(intercept, &[slope])
            ),
            predictions: probabilities,
            residuals,
            statistics,
        })
    }

    /// Batch gradient descent on standardized inputs; returns (w, b, iterations)
    fn descend(&self, z: &[f64], ys: &[f64]) -> (f64, f64, usize) {
        let n = z.len() as f64;
        let LogisticConfig {
            learning_rate,
            max_iterations,
            tolerance,
        } = self.config;

        let mut w = 0.0;
        let mut b = 0.0;

        for iteration in 1..=max_iterations {
            let (grad_w, grad_b) = z.iter().zip(ys).fold((0.0, 0.0), |(gw, gb), (&zi, &yi)| {
                let error = sigmoid(w * zi + b) - yi;
                (gw + error * zi, gb + error)
            });
            let grad_w = grad_w / n;
            let grad_b = grad_b / n;

            w -= learning_rate * grad_w;
            b -= learning_rate * grad_b;

            if grad_w.abs() < tolerance && grad_b.abs() < tolerance {
                return (w, b, iteration);
            }
        }

        (w, b, max_iterations)
    }
}

/// Mean binary cross-entropy
fn log_loss(ys: &[f64], probabilities: &[f64]) -> f64 {
    let total: f64 = ys
        .iter()
        .zip(probabilities)
        .map(|(&y, &p)| {
            let p = p.clamp(PROBABILITY_CLAMP, 1.0 - PROBABILITY_CLAMP);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    total / ys.len() as f64
}
