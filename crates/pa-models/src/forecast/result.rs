//! Forecast result types

use serde::Serialize;

use super::ForecastMethod;

/// One forecast period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// 1-based distance past the last observation
    pub period: usize,
    pub value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Projected calendar date (`YYYY-MM-DD`), when the input dates allow it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Result of forecasting a series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub method: ForecastMethod,
    pub periods: usize,
    pub points: Vec<ForecastPoint>,
    /// Confidence level of the bounds
    pub confidence_interval: f64,
    /// Residual standard error behind the bounds
    pub standard_error: f64,
    /// Per-phase multiplicative indices, when seasonality was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_indices: Option<Vec<f64>>,
}

impl ForecastResult {
    /// Point forecasts in period order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Half-width of the confidence band
    pub fn margin(&self) -> f64 {
        self.points
            .first()
            .map_or(0.0, |p| (p.upper_bound - p.lower_bound) / 2.0)
    }
}
