//! Coefficient definition

use serde::{Deserialize, Serialize};

/// Named coefficient estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficient {
    /// Term name, e.g. `(Intercept)`, `x`, `x^2`
    pub name: String,
    /// Coefficient estimate
    pub estimate: f64,
    /// Is this the intercept?
    pub is_intercept: bool,
}

impl Coefficient {
    /// Create a new coefficient
    pub fn new(name: impl Into<String>, estimate: f64) -> Self {
        Self {
            name: name.into(),
            estimate,
            is_intercept: false,
        }
    }

    /// Create the intercept term
    pub fn intercept(estimate: f64) -> Self {
        Self {
            name: "(Intercept)".to_string(),
            estimate,
            is_intercept: true,
        }
    }

    /// Coefficient of `x^power`
    pub fn power_term(power: usize, estimate: f64) -> Self {
        let name = match power {
            1 => "x".to_string(),
            p => format!("x^{}", p),
        };
        Self::new(name, estimate)
    }
}
