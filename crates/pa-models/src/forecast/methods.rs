//! Point forecasting methods
//!
//! Each method learns from a value series and produces:
//! - one-step-ahead in-sample predictions, used for the residual error
//! - an out-of-sample forecast for a number of steps
//!
//! Methods see plain values; dates and seasonality are handled by the caller.

use pa_core::linalg::mean;
use pa_core::{RegressionDataPoint, ValidationError};

use crate::base::{ModelError, Result};
use crate::regression::{linear_regression, RegressionResult};

/// Fit-then-extrapolate contract shared by the forecasting methods
pub trait Forecaster {
    /// Learn from a chronologically ordered series
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// One-step-ahead in-sample predictions aligned with the fitted series;
    /// `None` where the method has nothing to predict from
    fn fitted(&self) -> &[Option<f64>];

    /// Forecast `steps` periods past the end of the series
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;
}

fn not_fitted(operation: &str) -> ModelError {
    ModelError::numerical("forecaster has not been fitted", operation)
}

/// Check a smoothing factor lies in `(0, 1]`
fn check_smoothing(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ModelError::config(
            name,
            format!("must be in (0, 1], got {}", value),
        ))
    }
}

// ============================================================================
// Moving average
// ============================================================================

/// Mean of the trailing window, held flat
#[derive(Debug, Clone, Default)]
pub struct MovingAverage {
    window: Option<usize>,
    fitted: Vec<Option<f64>>,
    level: Option<f64>,
}

impl MovingAverage {
    /// Window used when none is configured, capped by the series length
    pub const DEFAULT_WINDOW: usize = 3;

    pub fn new(window: Option<usize>) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn level(&self) -> Option<f64> {
        self.level
    }
}

impl Forecaster for MovingAverage {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        let n = values.len();
        let window = self.window.unwrap_or(Self::DEFAULT_WINDOW.min(n));
        if window == 0 || window > n {
            return Err(ModelError::config(
                "window_size",
                format!("must be between 1 and {}, got {}", n, window),
            ));
        }

        // prediction at t averages up to `window` points before t
        self.fitted = (0..n)
            .map(|t| mean(&values[t.saturating_sub(window)..t]))
            .collect();
        self.level = mean(&values[n - window..]);
        Ok(())
    }

    fn fitted(&self) -> &[Option<f64>] {
        &self.fitted
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let level = self.level.ok_or_else(|| not_fitted("moving_average"))?;
        Ok(vec![level; steps])
    }
}

// ============================================================================
// Simple exponential smoothing
// ============================================================================

/// Simple exponential smoothing
///
/// `level_t = α·y_t + (1 − α)·level_{t−1}`, starting from the first value.
/// The forecast is the final level for every future period.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    fitted: Vec<Option<f64>>,
    level: Option<f64>,
}

impl ExponentialSmoothing {
    pub const DEFAULT_ALPHA: f64 = 0.3;

    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            fitted: Vec::new(),
            level: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn level(&self) -> Option<f64> {
        self.level
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA)
    }
}

impl Forecaster for ExponentialSmoothing {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        check_smoothing("alpha", self.alpha)?;
        let (&first, rest) = values.split_first().ok_or(ValidationError::InsufficientData {
            context: "exponential_smoothing",
            required: 1,
            actual: 0,
        })?;

        let mut level = first;
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(None);
        for &value in rest {
            fitted.push(Some(level));
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }

        self.fitted = fitted;
        self.level = Some(level);
        Ok(())
    }

    fn fitted(&self) -> &[Option<f64>] {
        &self.fitted
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let level = self.level.ok_or_else(|| not_fitted("exponential_smoothing"))?;
        Ok(vec![level; steps])
    }
}

// ============================================================================
// Holt's linear trend
// ============================================================================

/// Trend-adjusted exponential smoothing (Holt's linear method)
///
/// ```text
/// level_t = α·y_t + (1 − α)·(level_{t−1} + trend_{t−1})
/// trend_t = β·(level_t − level_{t−1}) + (1 − β)·trend_{t−1}
/// ŷ_{n+h} = level_n + h·trend_n
/// ```
///
/// Initialized with `level = y₀` and `trend = y₁ − y₀`, which reproduces
/// `y₁` exactly, so in-sample predictions start at the third point.
#[derive(Debug, Clone)]
pub struct HoltLinear {
    alpha: f64,
    beta: f64,
    fitted: Vec<Option<f64>>,
    state: Option<(f64, f64)>,
}

impl HoltLinear {
    pub const DEFAULT_BETA: f64 = 0.1;

    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            fitted: Vec::new(),
            state: None,
        }
    }

    /// Final `(level, trend)`
    pub fn state(&self) -> Option<(f64, f64)> {
        self.state
    }
}

impl Default for HoltLinear {
    fn default() -> Self {
        Self::new(ExponentialSmoothing::DEFAULT_ALPHA, Self::DEFAULT_BETA)
    }
}

impl Forecaster for HoltLinear {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        check_smoothing("alpha", self.alpha)?;
        check_smoothing("beta", self.beta)?;
        if values.len() < 2 {
            return Err(ValidationError::InsufficientData {
                context: "exponential_smoothing_trend",
                required: 2,
                actual: values.len(),
            }
            .into());
        }

        let mut level = values[0];
        let mut trend = values[1] - values[0];
        let mut fitted = vec![None, None];

        for (t, &value) in values.iter().enumerate().skip(1) {
            if t >= 2 {
                fitted.push(Some(level + trend));
            }
            let previous = level;
            level = self.alpha * value + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - previous) + (1.0 - self.beta) * trend;
        }

        self.fitted = fitted;
        self.state = Some((level, trend));
        Ok(())
    }

    fn fitted(&self) -> &[Option<f64>] {
        &self.fitted
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let (level, trend) = self
            .state
            .ok_or_else(|| not_fitted("exponential_smoothing_trend"))?;
        Ok((1..=steps).map(|h| level + h as f64 * trend).collect())
    }
}

// ============================================================================
// Linear trend
// ============================================================================

/// Least-squares line through `(index, value)`, extrapolated
#[derive(Debug, Clone, Default)]
pub struct LinearTrend {
    fitted: Vec<Option<f64>>,
    line: Option<RegressionResult>,
    n: usize,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted line
    pub fn line(&self) -> Option<&RegressionResult> {
        self.line.as_ref()
    }
}

impl Forecaster for LinearTrend {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        let points: Vec<RegressionDataPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &y)| RegressionDataPoint::new(i as f64, y))
            .collect();
        let line = linear_regression(&points)?;

        self.fitted = line.predictions.iter().copied().map(Some).collect();
        self.line = Some(line);
        self.n = values.len();
        Ok(())
    }

    fn fitted(&self) -> &[Option<f64>] {
        &self.fitted
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let line = self.line.as_ref().ok_or_else(|| not_fitted("linear_trend"))?;
        let last = self.n - 1;
        Ok((1..=steps)
            .map(|h| line.predict((last + h) as f64))
            .collect())
    }
}
