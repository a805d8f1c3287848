//! Input data structures and validation
//!
//! Every engine entry point receives plain slices of the point types defined
//! here and validates them before doing any arithmetic.

mod points;
mod validation;

#[cfg(test)]
mod tests;

// Re-exports
pub use points::{ClassificationDataPoint, Label, RegressionDataPoint, TimeSeriesData};
pub use validation::{
    check_range, parse_date, validate_classification, validate_regression, validate_series,
};

/// Error types for malformed or insufficient input
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Not enough data for {context}: need at least {required} points, got {actual}")]
    InsufficientData {
        context: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("The {set} set is empty")]
    Empty { set: &'static str },

    #[error("Non-finite value in field '{field}' of {set} set at index {index}")]
    NonFinite {
        set: &'static str,
        field: &'static str,
        index: usize,
    },

    #[error("Feature length mismatch in {set} set at index {index}: expected {expected}, got {actual}")]
    DimensionMismatch {
        set: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Feature vectors must contain at least one value")]
    EmptyFeatures,

    #[error("Training point at index {index} has no label")]
    MissingLabel { index: usize },

    #[error("Value {value} in field '{field}' at index {index} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid date '{value}' at index {index}: expected ISO-8601")]
    InvalidDate { index: usize, value: String },
}

/// Result type for validation
pub type Result<T> = std::result::Result<T, ValidationError>;
