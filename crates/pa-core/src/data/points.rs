//! Point types accepted by the engines
//!
//! These mirror the JSON records an upstream handler hands over, so they
//! derive serde with camelCase field names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A paired observation for regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionDataPoint {
    pub x: f64,
    pub y: f64,
}

impl RegressionDataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for RegressionDataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Class label, either numeric or textual
///
/// Labels are grouped by their canonical string form, so `Number(1.0)` and
/// `Text("1")` land in the same class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl Label {
    /// Canonical key used for grouping and confusion matrix entries
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Whether two labels denote the same class
    pub fn same_class(&self, other: &Label) -> bool {
        match (self, other) {
            (Label::Text(a), Label::Text(b)) => a == b,
            _ => self.key() == other.key(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(v) => write!(f, "{}", v),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Label::Number(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Number(value as f64)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Number(f64::from(value))
    }
}

/// A feature vector with an optional class label
///
/// Training points must be labeled; test points may leave `label` empty, in
/// which case they are predicted but excluded from accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDataPoint {
    pub features: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
}

impl ClassificationDataPoint {
    /// Create a labeled point
    pub fn labeled(features: impl Into<Vec<f64>>, label: impl Into<Label>) -> Self {
        Self {
            features: features.into(),
            label: Some(label.into()),
        }
    }

    /// Create an unlabeled point
    pub fn unlabeled(features: impl Into<Vec<f64>>) -> Self {
        Self {
            features: features.into(),
            label: None,
        }
    }
}

/// One observation of a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    /// ISO-8601 date or timestamp
    pub date: String,
    pub value: f64,
}

impl TimeSeriesData {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}
