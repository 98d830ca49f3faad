//! Daily aggregate bars and price-series statistics.
//!
//! The screener operates on a short window of daily bars per ticker.
//! All math here is pure and f64-based so the usecases and adapters
//! never pull in provider-specific types.

use serde::{Deserialize, Serialize};

/// A single daily aggregate bar as returned by the upstream provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggBar {
    /// Opening price.
    #[serde(rename = "o")]
    pub open: f64,
    /// Highest price of the day.
    #[serde(rename = "h")]
    pub high: f64,
    /// Lowest price of the day.
    #[serde(rename = "l")]
    pub low: f64,
    /// Closing price.
    #[serde(rename = "c")]
    pub close: f64,
    /// Trading volume.
    #[serde(rename = "v")]
    pub volume: f64,
    /// Bar start timestamp (Unix ms).
    #[serde(rename = "t")]
    pub timestamp_ms: i64,
}

/// Statistics derived from a window of daily bars, oldest first.
///
/// Built once per ticker by the screener; the filters in
/// [`crate::domain::selection`] consume these numbers.
#[derive(Debug, Clone)]
pub struct SeriesStats {
    /// Close of the most recent bar.
    pub latest_close: f64,
    /// Arithmetic mean of all closes in the window.
    pub mean_close: f64,
    /// Absolute percent distance of the latest close from the mean.
    pub move_pct: f64,
    /// EWMA volatility of daily returns, in percent.
    pub ewma_volatility_pct: f64,
}

/// RiskMetrics decay factor for the EWMA variance estimate.
const EWMA_LAMBDA: f64 = 0.94;

impl SeriesStats {
    /// Compute statistics over a window of bars, oldest first.
    ///
    /// Returns `None` when the window has fewer than two bars — a
    /// single bar has no return series and its mean equals its close,
    /// which would make every downstream filter vacuous.
    pub fn from_bars(bars: &[AggBar]) -> Option<Self> {
        if bars.len() < 2 {
            return None;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let latest_close = *closes.last()?;
        let mean_close = closes.iter().sum::<f64>() / closes.len() as f64;

        if mean_close <= 0.0 || latest_close <= 0.0 {
            return None;
        }

        let move_pct = ((latest_close - mean_close) / mean_close).abs() * 100.0;

        // EWMA variance over daily returns, newest observation weighted
        // (1 - λ), each older one decayed by λ.
        let returns: Vec<f64> = closes
            .windows(2)
            .filter(|w| w[0] > 0.0)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect();

        let mut variance = 0.0;
        let mut weight = 1.0 - EWMA_LAMBDA;
        for r in returns.iter().rev() {
            variance += weight * r * r;
            weight *= EWMA_LAMBDA;
        }

        Some(Self {
            latest_close,
            mean_close,
            move_pct,
            ewma_volatility_pct: variance.sqrt() * 100.0,
        })
    }
}
