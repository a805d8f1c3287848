//! Regression models
//!
//! This module provides three single-predictor regression models:
//! - Ordinary least squares line (closed form)
//! - Polynomial least squares (normal equations, Gauss-Jordan)
//! - Logistic regression (batch gradient descent on log-loss)
//!
//! Each model is a small configuration value with a `fit` method that returns
//! a fresh [`RegressionResult`]. [`RegressionType`] selects a model by
//! discriminator for callers that receive the choice as data.

pub mod linear;
pub mod logistic;
pub mod polynomial;
pub mod result;

#[cfg(test)]
mod tests;

// Re-exports
pub use linear::LinearRegression;
pub use logistic::LogisticRegression;
pub use polynomial::PolynomialRegression;
pub use result::RegressionResult;

use std::fmt;
use std::str::FromStr;

use pa_core::RegressionDataPoint;
use serde::{Deserialize, Serialize};

use crate::base::{ModelError, Result};

/// Regression family, serialized as its discriminator token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionKind {
    Linear,
    Polynomial,
    Logistic,
}

impl fmt::Display for RegressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionKind::Linear => write!(f, "linear"),
            RegressionKind::Polynomial => write!(f, "polynomial"),
            RegressionKind::Logistic => write!(f, "logistic"),
        }
    }
}

impl FromStr for RegressionKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(RegressionKind::Linear),
            "polynomial" => Ok(RegressionKind::Polynomial),
            "logistic" => Ok(RegressionKind::Logistic),
            other => Err(ModelError::config(
                "type",
                format!("unknown regression type '{}'", other),
            )),
        }
    }
}

/// Polynomial regression configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolynomialConfig {
    /// Highest power of `x` in the model
    pub degree: usize,
}

impl Default for PolynomialConfig {
    fn default() -> Self {
        Self { degree: 2 }
    }
}

impl PolynomialConfig {
    pub fn validate(&self) -> Result<()> {
        if self.degree == 0 {
            return Err(ModelError::config("degree", "must be at least 1"));
        }
        Ok(())
    }
}

/// Logistic regression configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogisticConfig {
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Stop early once both gradient components fall below this
    pub tolerance: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iterations: 1000,
            tolerance: 1e-10,
        }
    }
}

impl LogisticConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ModelError::config(
                "learning_rate",
                "must be a positive finite number",
            ));
        }
        if self.max_iterations == 0 {
            return Err(ModelError::config("max_iterations", "must be at least 1"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ModelError::config("tolerance", "must be non-negative"));
        }
        Ok(())
    }
}

/// A regression model selected by discriminator, with its configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegressionType {
    Linear,
    Polynomial(PolynomialConfig),
    Logistic(LogisticConfig),
}

impl RegressionType {
    pub fn kind(&self) -> RegressionKind {
        match self {
            RegressionType::Linear => RegressionKind::Linear,
            RegressionType::Polynomial(_) => RegressionKind::Polynomial,
            RegressionType::Logistic(_) => RegressionKind::Logistic,
        }
    }

    /// Fit the selected model
    pub fn fit(&self, data: &[RegressionDataPoint]) -> Result<RegressionResult> {
        tracing::debug!(kind = %self.kind(), n = data.len(), "fitting regression");
        match *self {
            RegressionType::Linear => LinearRegression::new().fit(data),
            RegressionType::Polynomial(config) => PolynomialRegression::with_config(config).fit(data),
            RegressionType::Logistic(config) => LogisticRegression::with_config(config).fit(data),
        }
    }
}

impl From<RegressionKind> for RegressionType {
    fn from(kind: RegressionKind) -> Self {
        match kind {
            RegressionKind::Linear => RegressionType::Linear,
            RegressionKind::Polynomial => RegressionType::Polynomial(PolynomialConfig::default()),
            RegressionKind::Logistic => RegressionType::Logistic(LogisticConfig::default()),
        }
    }
}

/// Fit `data` with the model selected by `regression_type`
pub fn fit(data: &[RegressionDataPoint], regression_type: &RegressionType) -> Result<RegressionResult> {
    regression_type.fit(data)
}

/// Ordinary least squares line through `data`
pub fn linear_regression(data: &[RegressionDataPoint]) -> Result<RegressionResult> {
    RegressionType::Linear.fit(data)
}

/// Polynomial least squares fit, degree 2 unless given
pub fn polynomial_regression(
    data: &[RegressionDataPoint],
    degree: Option<usize>,
) -> Result<RegressionResult> {
    let config = PolynomialConfig {
        degree: degree.unwrap_or(PolynomialConfig::default().degree),
    };
    RegressionType::Polynomial(config).fit(data)
}

/// Logistic regression with the default learning rate and iteration cap
pub fn logistic_regression(data: &[RegressionDataPoint]) -> Result<RegressionResult> {
    RegressionType::Logistic(LogisticConfig::default()).fit(data)
}
