//! Shape and value checks shared by all engines

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{ClassificationDataPoint, RegressionDataPoint, Result, TimeSeriesData, ValidationError};

/// Check that a regression dataset has at least `min_points` finite points
pub fn validate_regression(
    points: &[RegressionDataPoint],
    min_points: usize,
    context: &'static str,
) -> Result<()> {
    if points.len() < min_points {
        return Err(ValidationError::InsufficientData {
            context,
            required: min_points,
            actual: points.len(),
        });
    }

    for (index, point) in points.iter().enumerate() {
        if !point.x.is_finite() {
            return Err(ValidationError::NonFinite {
                set: "data",
                field: "x",
                index,
            });
        }
        if !point.y.is_finite() {
            return Err(ValidationError::NonFinite {
                set: "data",
                field: "y",
                index,
            });
        }
    }

    Ok(())
}

/// Check a train/test pair and return the shared feature count
///
/// Both sets must be non-empty, every feature vector must have the same
/// non-zero length and finite values, and every training point needs a label.
pub fn validate_classification(
    train: &[ClassificationDataPoint],
    test: &[ClassificationDataPoint],
) -> Result<usize> {
    let first = train
        .first()
        .ok_or(ValidationError::Empty { set: "training" })?;
    if test.is_empty() {
        return Err(ValidationError::Empty { set: "test" });
    }

    let n_features = first.features.len();
    if n_features == 0 {
        return Err(ValidationError::EmptyFeatures);
    }

    for (set, points) in [("training", train), ("test", test)] {
        for (index, point) in points.iter().enumerate() {
            if point.features.len() != n_features {
                return Err(ValidationError::DimensionMismatch {
                    set,
                    index,
                    expected: n_features,
                    actual: point.features.len(),
                });
            }
            if point.features.iter().any(|v| !v.is_finite()) {
                return Err(ValidationError::NonFinite {
                    set,
                    field: "features",
                    index,
                });
            }
        }
    }

    if let Some(index) = train.iter().position(|p| p.label.is_none()) {
        return Err(ValidationError::MissingLabel { index });
    }

    Ok(n_features)
}

/// Check a time series: at least two points, finite values, parsable dates
pub fn validate_series(series: &[TimeSeriesData]) -> Result<()> {
    if series.len() < 2 {
        return Err(ValidationError::InsufficientData {
            context: "forecast",
            required: 2,
            actual: series.len(),
        });
    }

    for (index, point) in series.iter().enumerate() {
        if !point.value.is_finite() {
            return Err(ValidationError::NonFinite {
                set: "series",
                field: "value",
                index,
            });
        }
        if parse_date(&point.date).is_none() {
            return Err(ValidationError::InvalidDate {
                index,
                value: point.date.clone(),
            });
        }
    }

    Ok(())
}

/// Check that `value` lies in the closed interval `[min, max]`
pub fn check_range(field: &'static str, index: usize, value: f64, min: f64, max: f64) -> Result<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            index,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Parse an ISO-8601 calendar date or timestamp
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]` and RFC 3339 with offset.
/// Offsets are normalized to UTC.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}
