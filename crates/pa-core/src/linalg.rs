//! Dense linear algebra helpers
//!
//! Only what the models need: descriptive statistics over slices and a
//! Gauss-Jordan solver with partial pivoting for small normal-equation systems.

mod gauss_jordan;
mod ops;


pub use gauss_jordan::{invert, solve, PIVOT_TOLERANCE};
pub use ops::{dot, euclidean_distance, mean, std_dev, sum_squared_deviations, variance};

/// Linear algebra errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Matrix is singular: pivot {pivot:e} in column {column} is below tolerance")]
    Singular { column: usize, pivot: f64 },

    #[error("Matrix is empty")]
    Empty,
}

/// Result type for linear algebra operations
pub type Result<T> = std::result::Result<T, LinalgError>;
