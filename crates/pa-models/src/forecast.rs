//! Time-series forecasting
//!
//! Projects a chronologically ordered series forward with one of four
//! methods and wraps each point in a flat confidence band:
//! - Moving average of the trailing window
//! - Simple exponential smoothing
//! - Trend-adjusted exponential smoothing (Holt)
//! - Linear trend extrapolation
//!
//! With a season length the series is deseasonalized by multiplicative
//! phase indices, forecast, and reseasonalized.

pub mod confidence;
pub mod methods;
pub mod result;
pub mod seasonality;


// Re-exports
pub use methods::{ExponentialSmoothing, Forecaster, HoltLinear, LinearTrend, MovingAverage};
pub use result::{ForecastPoint, ForecastResult};

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use pa_core::data::validate_series;
use pa_core::TimeSeriesData;

use crate::base::{ModelError, Result};

/// Forecasting method, serialized as its discriminator token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    MovingAverage,
    ExponentialSmoothing,
    ExponentialSmoothingTrend,
    LinearTrend,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::MovingAverage => write!(f, "moving_average"),
            ForecastMethod::ExponentialSmoothing => write!(f, "exponential_smoothing"),
            ForecastMethod::ExponentialSmoothingTrend => write!(f, "exponential_smoothing_trend"),
            ForecastMethod::LinearTrend => write!(f, "linear_trend"),
        }
    }
}

impl FromStr for ForecastMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moving_average" | "ma" => Ok(ForecastMethod::MovingAverage),
            "exponential_smoothing" | "ses" => Ok(ForecastMethod::ExponentialSmoothing),
            "exponential_smoothing_trend" | "holt" => Ok(ForecastMethod::ExponentialSmoothingTrend),
            "linear_trend" | "linear" => Ok(ForecastMethod::LinearTrend),
            other => Err(ModelError::config(
                "method",
                format!("unknown forecast method '{}'", other),
            )),
        }
    }
}

fn default_confidence_interval() -> f64 {
    0.95
}

fn default_alpha() -> f64 {
    ExponentialSmoothing::DEFAULT_ALPHA
}

fn default_beta() -> f64 {
    HoltLinear::DEFAULT_BETA
}

/// Forecast request options
///
/// `method` and `periods` are required; everything else has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastOptions {
    pub method: ForecastMethod,
    /// Number of future periods
    pub periods: usize,
    /// Confidence level of the bounds, in `(0, 1)`
    #[serde(default = "default_confidence_interval")]
    pub confidence_interval: f64,
    /// Season length; no seasonal adjustment when `None`
    #[serde(default)]
    pub seasonality: Option<usize>,
    /// Moving average window; `min(3, n)` when `None`
    #[serde(default)]
    pub window_size: Option<usize>,
    /// Level smoothing factor
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Trend smoothing factor
    #[serde(default = "default_beta")]
    pub beta: f64,
}

impl ForecastOptions {
    pub fn new(method: ForecastMethod, periods: usize) -> Self {
        Self {
            method,
            periods,
            confidence_interval: default_confidence_interval(),
            seasonality: None,
            window_size: None,
            alpha: default_alpha(),
            beta: default_beta(),
        }
    }

    pub fn with_confidence_interval(mut self, confidence_interval: f64) -> Self {
        self.confidence_interval = confidence_interval;
        self
    }

    pub fn with_seasonality(mut self, seasonality: usize) -> Self {
        self.seasonality = Some(seasonality);
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Build an unfitted forecaster for the configured method
    pub fn forecaster(&self) -> Box<dyn Forecaster> {
        match self.method {
            ForecastMethod::MovingAverage => Box::new(MovingAverage::new(self.window_size)),
            ForecastMethod::ExponentialSmoothing => Box::new(ExponentialSmoothing::new(self.alpha)),
            ForecastMethod::ExponentialSmoothingTrend => {
                Box::new(HoltLinear::new(self.alpha, self.beta))
            }
            ForecastMethod::LinearTrend => Box::new(LinearTrend::new()),
        }
    }
}

/// Forecast `options.periods` values past the end of `series`
pub fn forecast(series: &[TimeSeriesData], options: &ForecastOptions) -> Result<ForecastResult> {
    tracing::debug!(
        method = %options.method,
        n_obs = series.len(),
        periods = options.periods,
        "running forecast"
    );
    validate_series(series)?;

    if options.periods < 1 {
        return Err(ModelError::config("periods", "must be at least 1"));
    }
    let z = confidence::z_critical(options.confidence_interval)?;

    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let n = values.len();

    let indices = options
        .seasonality
        .map(|period| seasonality::seasonal_indices(&values, period))
        .transpose()?;
    let season = indices.as_deref().unwrap_or(&[]);

    let adjusted: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(t, v)| v / seasonality::factor(season, t))
        .collect();

    let mut forecaster = options.forecaster();
    forecaster.fit(&adjusted)?;

    let residuals: Vec<f64> = forecaster
        .fitted()
        .iter()
        .enumerate()
        .filter_map(|(t, fitted)| {
            fitted.map(|p| values[t] - p * seasonality::factor(season, t))
        })
        .collect();
    let standard_error = confidence::standard_error(&residuals);
    let half_width = z * standard_error;

    let dates = project_dates(series, options.periods);
    let points = forecaster
        .predict(options.periods)?
        .into_iter()
        .zip(dates)
        .enumerate()
        .map(|(i, (value, date))| {
            let period = i + 1;
            let value = value * seasonality::factor(season, n - 1 + period);
            let (lower_bound, upper_bound) = confidence::bounds(value, half_width);
            ForecastPoint {
                period,
                value,
                lower_bound,
                upper_bound,
                date,
            }
        })
        .collect();

    tracing::trace!(standard_error, n_residuals = residuals.len(), "forecast finished");

    Ok(ForecastResult {
        method: options.method,
        periods: options.periods,
        points,
        confidence_interval: options.confidence_interval,
        standard_error,
        seasonal_indices: indices,
    })
}

/// Spacing between the last two dates of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateStep {
    Days(u64),
    Months(u32),
}

impl DateStep {
    /// Months when both dates share a day of the month, days otherwise
    fn between(prev: NaiveDate, last: NaiveDate) -> Option<Self> {
        let months = (last.year() - prev.year()) * 12 + last.month() as i32 - prev.month() as i32;
        if prev.day() == last.day() && months > 0 {
            return u32::try_from(months).ok().map(DateStep::Months);
        }
        let days = (last - prev).num_days();
        u64::try_from(days)
            .ok()
            .filter(|&d| d > 0)
            .map(DateStep::Days)
    }

    /// `last` moved forward by `h` steps
    fn advance(self, last: NaiveDate, h: usize) -> Option<NaiveDate> {
        match self {
            DateStep::Days(step) => (h as u64)
                .checked_mul(step)
                .and_then(|days| last.checked_add_days(Days::new(days))),
            DateStep::Months(step) => u32::try_from(h)
                .ok()
                .and_then(|h| h.checked_mul(step))
                .and_then(|months| last.checked_add_months(Months::new(months))),
        }
    }
}

/// Calendar dates for the forecast periods
///
/// Steps forward from the last date by the spacing of the last two dates.
/// When both dates fall on the same day of the month the step is a whole
/// number of calendar months (clamped to the month end where that day does
/// not exist), otherwise a fixed number of days. Only plain `YYYY-MM-DD`
/// dates with a positive spacing are projected.
fn project_dates(series: &[TimeSeriesData], periods: usize) -> Vec<Option<String>> {
    let calendar = |point: &TimeSeriesData| {
        NaiveDate::parse_from_str(point.date.trim(), "%Y-%m-%d").ok()
    };

    let spacing = match series {
        [.., prev, last] => match (calendar(prev), calendar(last)) {
            (Some(p), Some(l)) => DateStep::between(p, l).map(|step| (l, step)),
            _ => None,
        },
        _ => None,
    };

    match spacing {
        Some((last, step)) => (1..=periods)
            .map(|h| {
                step.advance(last, h)
                    .map(|date| date.format("%Y-%m-%d").to_string())
            })
            .collect(),
        None => vec![None; periods],
    }
}
