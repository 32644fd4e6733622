//! Trend and volatility estimation from history.

use opsim_core::errors::ConfigError;
use opsim_core::types::HistoricalSeries;

/// How the per-step trend is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendMethod {
    /// Average change per period over the trailing `n` observations
    /// (or the whole series if shorter).
    RecentWindow(usize),
    /// A configured trend rate per period.
    Fixed(f64),
}

impl Default for TrendMethod {
    fn default() -> Self {
        Self::RecentWindow(6)
    }
}

impl TrendMethod {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::RecentWindow(n) if n < 2 => Err(ConfigError::validation(
                "trend_window",
                "must cover at least 2 observations",
            )),
            Self::Fixed(rate) if !rate.is_finite() => Err(ConfigError::InvalidValue {
                field: "trend".to_string(),
                message: "trend rate must be finite".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Estimate the trend. The caller guarantees at least two observations.
    pub fn estimate(&self, series: &HistoricalSeries) -> f64 {
        match *self {
            Self::Fixed(rate) => rate,
            Self::RecentWindow(n) => {
                let points = series.points();
                let k = n.min(points.len());
                if k < 2 {
                    return 0.0;
                }
                let window = &points[points.len() - k..];
                (window[k - 1].value - window[0].value) / (k - 1) as f64
            }
        }
    }
}

/// Where per-step noise scale comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volatility {
    /// Caller-supplied scale.
    Fixed(f64),
    /// Sample standard deviation of the history times `scale`.
    Historical { scale: f64 },
}

impl Default for Volatility {
    fn default() -> Self {
        Self::Historical { scale: 0.3 }
    }
}

impl Volatility {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (field, v) = match *self {
            Self::Fixed(v) => ("volatility", v),
            Self::Historical { scale } => ("noise_scale", scale),
        };
        if !v.is_finite() || v < 0.0 {
            return Err(ConfigError::validation(field, "must be a non-negative number"));
        }
        Ok(())
    }

    pub fn resolve(&self, series: &HistoricalSeries) -> f64 {
        match *self {
            Self::Fixed(v) => v,
            Self::Historical { scale } => series.sample_std_dev().unwrap_or(0.0) * scale,
        }
    }
}
