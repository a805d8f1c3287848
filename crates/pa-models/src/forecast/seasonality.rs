//! Multiplicative seasonal indices

use pa_core::RegressionDataPoint;

use crate::base::{ModelError, Result};
use crate::regression::linear_regression;

/// Trend values this small relative to the series scale give no usable ratio
const TREND_TOLERANCE: f64 = 1e-10;

/// Check a season length against the series length
///
/// Two full cycles are needed for every phase to be observed twice.
pub fn check_period(period: usize, n: usize) -> Result<()> {
    if period < 2 || period > n / 2 {
        return Err(ModelError::config(
            "seasonality",
            format!(
                "must be between 2 and {} for {} observations, got {}",
                n / 2,
                n,
                period
            ),
        ));
    }
    Ok(())
}

/// Seasonal index per phase, normalized to mean 1
///
/// Each index is the mean ratio of actual value to a least-squares linear
/// trend over the observations in that phase. Phases where every trend
/// value is near zero get an index of 1.
pub fn seasonal_indices(values: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period, values.len())?;

    let points: Vec<RegressionDataPoint> = values
        .iter()
        .enumerate()
        .map(|(i, &y)| RegressionDataPoint::new(i as f64, y))
        .collect();
    let trend = linear_regression(&points)?;

    let scale = values.iter().fold(1.0f64, |acc, v| acc.max(v.abs()));
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (t, (&actual, &fitted)) in values.iter().zip(&trend.predictions).enumerate() {
        if fitted.abs() <= TREND_TOLERANCE * scale {
            continue;
        }
        sums[t % period] += actual / fitted;
        counts[t % period] += 1;
    }

    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| if count == 0 { 1.0 } else { sum / count as f64 })
        .collect();

    let average = raw.iter().sum::<f64>() / period as f64;
    if !average.is_finite() || average.abs() <= f64::EPSILON {
        return Err(ModelError::numerical(
            format!("seasonal indices average to {}", average),
            "seasonal_indices",
        ));
    }

    let indices: Vec<f64> = raw.iter().map(|r| r / average).collect();
    if let Some(phase) = indices
        .iter()
        .position(|idx| !idx.is_finite() || idx.abs() <= f64::EPSILON)
    {
        return Err(ModelError::numerical(
            format!("seasonal index for phase {} is {}", phase, indices[phase]),
            "seasonal_indices",
        ));
    }

    Ok(indices)
}

/// Index for position `t` of the series (or beyond its end)
pub fn factor(indices: &[f64], t: usize) -> f64 {
    if indices.is_empty() {
        1.0
    } else {
        indices[t % indices.len()]
    }
}
