//! Core building blocks for the predictive analytics engine
//!
//! This crate holds everything the model crate shares:
//! - Input value types for regression, classification and time series data
//! - Validation of raw inputs (lengths, shapes, finiteness, dates)
//! - Small dense linear algebra helpers (vector statistics, Gauss-Jordan)
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod data;
pub mod linalg;

pub use data::{
    ClassificationDataPoint, Label, RegressionDataPoint, TimeSeriesData, ValidationError,
};
pub use linalg::LinalgError;

/// Dense vector of observations
pub type Vector = ndarray::Array1<f64>;

/// Dense row-major matrix
pub type Matrix = ndarray::Array2<f64>;
