//! Core types shared by the model engines
//!
//! This module defines the result alias, fit statistics and the
//! printable regression summary used across the crate.

pub use coefficient::Coefficient;
pub use statistics::FitStatistics;
pub use summary::RegressionSummary;

pub use crate::error::{ErrorKind, ModelError};

pub mod coefficient;
pub mod statistics;
pub mod summary;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
