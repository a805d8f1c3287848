//! Model summary structures

use super::coefficient::Coefficient;
use super::statistics::FitStatistics;
use crate::regression::RegressionKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Printable summary of a fitted regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionSummary {
    /// Model type
    pub model_type: RegressionKind,
    /// Display equation
    pub equation: String,
    /// Coefficients table, intercept first
    pub coefficients: Vec<Coefficient>,
    /// R-squared
    pub r_squared: f64,
    /// Fit statistics
    pub statistics: FitStatistics,
}

impl fmt::Display for RegressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "Model Type: {}", self.model_type)?;
        writeln!(f, "Equation: {}", self.equation)?;
        writeln!(f, "Observations: {}", self.statistics.n_obs)?;
        writeln!(f)?;

        writeln!(f, "Coefficients:")?;
        writeln!(f, "{:<20} {:>14}", "Term", "Estimate")?;
        writeln!(f, "{:-<20} {:-<14}", "", "")?;
        for coeff in &self.coefficients {
            writeln!(f, "{:<20} {:>14.6}", coeff.name, coeff.estimate)?;
        }
        writeln!(f)?;

        writeln!(f, "Model Statistics:")?;
        writeln!(f, "  R-squared: {:.4}", self.r_squared)?;
        if let Some(adj_r2) = self.statistics.adj_r_squared {
            writeln!(f, "  Adjusted R-squared: {:.4}", adj_r2)?;
        }
        if let Some(resid_se) = self.statistics.residual_std_error {
            writeln!(f, "  Residual Std. Error: {:.4}", resid_se)?;
        }
        writeln!(f, "  Residual Sum of Squares: {:.4}", self.statistics.rss)?;
        if let Some(log_loss) = self.statistics.log_loss {
            writeln!(f, "  Log-loss: {:.4}", log_loss)?;
        }
        if let Some(iterations) = self.statistics.iterations {
            writeln!(f, "  Iterations: {}", iterations)?;
        }

        Ok(())
    }
}
