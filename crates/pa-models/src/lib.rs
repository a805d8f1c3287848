//! Statistical models for the predictive analytics engine
//!
//! Three engines share the input types of `pa-core` and one error type:
//! - [`regression`]: linear, polynomial and logistic regression
//! - [`classification`]: k-nearest-neighbors, decision tree, Gaussian naive Bayes
//! - [`forecast`]: moving average, exponential smoothing, Holt, linear trend
//!
//! Every entry point is a pure function from validated input to a
//! serializable result value. The crate keeps no state between calls and
//! prints nothing; diagnostic events go through `tracing`.
//!
//! ```
//! use pa_core::RegressionDataPoint;
//! use pa_models::regression::linear_regression;
//!
//! let data: Vec<RegressionDataPoint> =
//!     vec![(1.0, 2.0).into(), (2.0, 4.0).into(), (3.0, 6.0).into()];
//! let result = linear_regression(&data).unwrap();
//! assert_eq!(result.equation, "y = 2.00x + 0.00");
//! ```

pub mod base;
pub mod classification;
pub mod error;
pub mod forecast;
pub mod regression;

pub use base::{ErrorKind, ModelError, Result};
pub use classification::{
    classify, decision_tree_classifier, knn_classifier, naive_bayes_classifier,
    ClassificationOptions, ClassificationResult, ClassifierModel,
};
pub use forecast::{forecast, ForecastMethod, ForecastOptions, ForecastResult};
pub use regression::{
    linear_regression, logistic_regression, polynomial_regression, RegressionResult,
    RegressionType,
};
