//! Regression result structure
//!
//! Holds everything a fit produces: coefficients, fit quality, a display
//! equation, and the in-sample fitted values and residuals.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::base::{Coefficient, FitStatistics, RegressionSummary};
use crate::regression::RegressionKind;

/// Result of fitting a regression model
///
/// `coefficients` holds the non-intercept terms in ascending power of `x`
/// (`[slope]` for linear and logistic, `[β1, .., βd]` for polynomial) and
/// `intercept` holds β0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionResult {
    /// Model family
    #[serde(rename = "type")]
    pub kind: RegressionKind,
    /// Non-intercept coefficients, ascending power
    pub coefficients: Vec<f64>,
    /// Intercept (β0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercept: Option<f64>,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Human-readable model equation, display only
    pub equation: String,
    /// Fitted values (probabilities for logistic)
    pub predictions: Vec<f64>,
    /// Observed minus fitted
    pub residuals: Vec<f64>,
    /// Additional fit statistics
    pub statistics: FitStatistics,
}

impl RegressionResult {
    /// Slope of a linear or logistic fit
    pub fn slope(&self) -> Option<f64> {
        match self.kind {
            RegressionKind::Linear | RegressionKind::Logistic => self.coefficients.first().copied(),
            RegressionKind::Polynomial => None,
        }
    }

    /// Highest power of `x` in the model
    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluate the fitted model at `x`
    ///
    /// Logistic fits return the predicted probability.
    pub fn predict(&self, x: f64) -> f64 {
        let linear = self.linear_predictor(x);
        match self.kind {
            RegressionKind::Logistic => sigmoid(linear),
            _ => linear,
        }
    }

    /// Evaluate the fitted model at every value of `xs`
    pub fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Coefficients as named terms, intercept first
    pub fn to_coefficients(&self) -> Vec<Coefficient> {
        let mut terms = Vec::with_capacity(self.coefficients.len() + 1);
        if let Some(intercept) = self.intercept {
            terms.push(Coefficient::intercept(intercept));
        }
        terms.extend(
            self.coefficients
                .iter()
                .enumerate()
                .map(|(i, &c)| Coefficient::power_term(i + 1, c)),
        );
        terms
    }

    /// Model summary for display
    pub fn summary(&self) -> RegressionSummary {
        RegressionSummary {
            model_type: self.kind,
            equation: self.equation.clone(),
            coefficients: self.to_coefficients(),
            r_squared: self.r_squared,
            statistics: self.statistics,
        }
    }

    fn linear_predictor(&self, x: f64) -> f64 {
        // Horner evaluation over β_d .. β_1, then β0
        let higher = self
            .coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| (acc + c) * x);
        higher + self.intercept.unwrap_or(0.0)
    }
}

/// Numerically stable logistic function
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Render `βd x^d + .. + β1 x + β0` with two decimals, highest power first
pub(crate) fn polynomial_expression(intercept: f64, coefficients: &[f64]) -> String {
    let mut terms: Vec<(f64, String)> = coefficients
        .iter()
        .enumerate()
        .rev()
        .map(|(i, &c)| {
            let suffix = match i + 1 {
                1 => "x".to_string(),
                p => format!("x^{}", p),
            };
            (c, suffix)
        })
        .collect();
    terms.push((intercept, String::new()));

    let mut out = String::new();
    for (idx, (value, suffix)) in terms.iter().enumerate() {
        let magnitude = format!("{:.2}", value.abs());
        let negative = *value < 0.0 && magnitude != "0.00";
        let _ = if idx == 0 {
            write!(out, "{}{}{}", if negative { "-" } else { "" }, magnitude, suffix)
        } else {
            write!(out, " {} {}{}", if negative { '-' } else { '+' }, magnitude, suffix)
        };
    }
    out
}
