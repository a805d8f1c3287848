//! Polynomial least squares regression
//!
//! Builds the Vandermonde design matrix `X[i, j] = x_i^j` for `j = 0..=degree`
//! and solves the normal equations `(XᵀX) β = Xᵀy` with Gauss-Jordan
//! elimination.

use ndarray::Array2;

use pa_core::data::validate_regression;
use pa_core::{linalg, RegressionDataPoint, Vector};

use crate::base::{FitStatistics, ModelError, Result};
use crate::regression::result::polynomial_expression;
use crate::regression::{PolynomialConfig, RegressionKind, RegressionResult};

/// Polynomial regression model
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialRegression {
    config: PolynomialConfig,
}

impl PolynomialRegression {
    /// Create a model of the given degree
    pub fn new(degree: usize) -> Self {
        Self {
            config: PolynomialConfig { degree },
        }
    }

    /// Create a model from a configuration
    pub fn with_config(config: PolynomialConfig) -> Self {
        Self { config }
    }

    pub fn degree(&self) -> usize {
        self.config.degree
    }

    /// Fit the polynomial
    pub fn fit(&self, data: &[RegressionDataPoint]) -> Result<RegressionResult> {
        self.config.validate()?;
        validate_regression(data, 1, "polynomial regression")?;

        let degree = self.config.degree;
        let n = data.len();
        if n <= degree {
            return Err(ModelError::numerical(
                format!(
                    "degree {} needs at least {} points, got {}",
                    degree,
                    degree + 1,
                    n
                ),
                "polynomial_regression",
            ));
        }

        let mut distinct: Vec<f64> = data.iter().map(|p| p.x).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        if distinct.len() <= degree {
            return Err(ModelError::SingularMatrix {
                operation: format!(
                    "polynomial_regression: {} distinct x values cannot determine degree {}",
                    distinct.len(),
                    degree
                ),
            });
        }

        let x = design_matrix(data, degree);
        let y: Vector = data.iter().map(|p| p.y).collect();

        let xtx = x.t().dot(&x);
        let xty = x.t().dot(&y);
        let beta = linalg::solve(&xtx, &xty)
            .map_err(|e| ModelError::from_linalg(e, "polynomial_regression"))?;

        if beta.iter().any(|b| !b.is_finite()) {
            return Err(ModelError::numerical(
                "normal equations produced non-finite coefficients",
                "polynomial_regression",
            ));
        }

        let fitted = x.dot(&beta).to_vec();
        let observed = y.to_vec();
        let residuals: Vec<f64> = observed.iter().zip(&fitted).map(|(y, f)| y - f).collect();
        let (statistics, r_squared) = FitStatistics::from_fit(&observed, &fitted, degree);

        let intercept = beta[0];
        let coefficients = beta.iter().skip(1).copied().collect::<Vec<_>>();

        Ok(RegressionResult {
            kind: RegressionKind::Polynomial,
            equation: format!("y = {}", polynomial_expression(intercept, &coefficients)),
            coefficients,
            intercept: Some(intercept),
            r_squared,
            predictions: fitted,
            residuals,
            statistics,
        })
    }
}

/// Vandermonde matrix with columns `1, x, x², .., x^degree`
fn design_matrix(data: &[RegressionDataPoint], degree: usize) -> Array2<f64> {
    Array2::from_shape_fn((data.len(), degree + 1), |(i, j)| data[i].x.powi(j as i32))
}
