//! Model-related error types

use serde::Serialize;
use thiserror::Error;

use pa_core::{LinalgError, ValidationError};

/// Model-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Malformed or insufficient input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Numerical computation error
    #[error("Numerical error: {message} (operation: {operation})")]
    NumericalError {
        /// Error message
        message: String,
        /// Operation that failed
        operation: String,
    },

    /// Singular matrix encountered
    #[error("Singular matrix encountered (operation: {operation})")]
    SingularMatrix {
        /// Operation that produced the matrix
        operation: String,
    },

    /// Invalid algorithm parameter or unknown discriminator
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Offending parameter
        parameter: String,
        /// Configuration error message
        message: String,
    },
}

/// Coarse classification of a [`ModelError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input shape or values are unusable
    Validation,
    /// Well-shaped input led to a degenerate computation
    Numerical,
    /// An algorithm parameter is invalid
    Configuration,
}

impl ModelError {
    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::Validation(_) => ErrorKind::Validation,
            ModelError::NumericalError { .. } | ModelError::SingularMatrix { .. } => {
                ErrorKind::Numerical
            }
            ModelError::InvalidConfig { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn numerical(message: impl Into<String>, operation: &str) -> Self {
        ModelError::NumericalError {
            message: message.into(),
            operation: operation.to_string(),
        }
    }

    pub(crate) fn config(parameter: &str, message: impl Into<String>) -> Self {
        ModelError::InvalidConfig {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Convert a linear algebra failure raised while running `operation`
    pub(crate) fn from_linalg(err: LinalgError, operation: &str) -> Self {
        match err {
            LinalgError::Singular { .. } => ModelError::SingularMatrix {
                operation: operation.to_string(),
            },
            other => ModelError::numerical(other.to_string(), operation),
        }
    }
}
