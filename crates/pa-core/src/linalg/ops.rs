//! Vector operations over plain slices

use super::{LinalgError, Result};

/// Inner product of two equal-length vectors
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sum of squared deviations from the mean
pub fn sum_squared_deviations(values: &[f64]) -> f64 {
    match mean(values) {
        Some(m) => values.iter().map(|v| (v - m).powi(2)).sum(),
        None => 0.0,
    }
}

/// Variance with `ddof` delta degrees of freedom
///
/// `ddof = 0` gives the population variance, `ddof = 1` the sample variance.
/// Returns `None` when there are not more values than `ddof`.
pub fn variance(values: &[f64], ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    Some(sum_squared_deviations(values) / (values.len() - ddof) as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom
pub fn std_dev(values: &[f64], ddof: usize) -> Option<f64> {
    variance(values, ddof).map(f64::sqrt)
}

/// Euclidean distance between two points of equal dimension
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt())
}
