//! Stock and strike selection rules.
//!
//! Two filters decide whether a ticker is worth trading:
//! a price band around the mean close and a volatility window.
//! Both are pure predicates over [`SeriesStats`](crate::domain::quote::SeriesStats)
//! so they can be tuned from config and tested in isolation.

use crate::domain::quote::SeriesStats;

/// Screening thresholds applied to every candidate ticker.
#[derive(Debug, Clone, Copy)]
pub struct ScreenParams {
    /// Maximum fractional distance of the latest close from the mean
    /// close (0.04 = within ±4%).
    pub band: f64,
    /// Inclusive lower bound on EWMA volatility, in percent.
    pub min_volatility_pct: f64,
    /// Inclusive upper bound on EWMA volatility, in percent.
    pub max_volatility_pct: f64,
}

impl Default for ScreenParams {
    fn default() -> Self {
        Self {
            band: 0.04,
            min_volatility_pct: 0.05,
            max_volatility_pct: 5.0,
        }
    }
}

impl ScreenParams {
    /// Check whether the latest close sits inside the band around the
    /// mean close. Both edges are inclusive.
    pub fn within_band(&self, stats: &SeriesStats) -> bool {
        let lower = (1.0 - self.band) * stats.mean_close;
        let upper = (1.0 + self.band) * stats.mean_close;
        stats.latest_close >= lower && stats.latest_close <= upper
    }

    /// Check whether EWMA volatility falls inside the configured window.
    pub fn within_volatility_window(&self, stats: &SeriesStats) -> bool {
        stats.ewma_volatility_pct >= self.min_volatility_pct
            && stats.ewma_volatility_pct <= self.max_volatility_pct
    }

    /// Combined verdict: a ticker passes when both filters pass.
    pub fn passes(&self, stats: &SeriesStats) -> bool {
        self.within_band(stats) && self.within_volatility_window(stats)
    }
}

/// Find the strikes closest to a target price.
///
/// Returns every strike at the minimum absolute distance, preserving
/// ladder order, so ties (equidistant strikes above and below) are all
/// reported. Empty input yields an empty result.
pub fn closest_strikes(ladder: &[f64], target: f64) -> Vec<f64> {
    let mut min_diff = f64::INFINITY;
    let mut closest = Vec::new();

    for &strike in ladder {
        let diff = (target - strike).abs();
        if diff < min_diff {
            min_diff = diff;
            closest.clear();
            closest.push(strike);
        } else if (diff - min_diff).abs() < f64::EPSILON {
            closest.push(strike);
        }
    }

    closest
}

/// Snap a requested strike to the nearest listed strike.
///
/// When two listed strikes are equidistant the lower one wins, matching
/// ladder order. Returns `None` for an empty ladder.
pub fn snap_strike(ladder: &[f64], requested: f64) -> Option<f64> {
    closest_strikes(ladder, requested).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::AggBar;

    fn stats(closes: &[f64]) -> SeriesStats {
        let bars: Vec<AggBar> = closes
            .iter()
            .map(|&c| AggBar {
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 0.0,
                timestamp_ms: 0,
            })
            .collect();
        SeriesStats::from_bars(&bars).unwrap()
    }

    #[test]
    fn test_band_accepts_latest_close_on_edge() {
        // mean = 100, latest = 104 → exactly on the +4% edge
        let s = stats(&[98.0, 98.0, 104.0]);
        let params = ScreenParams {
            band: (s.latest_close - s.mean_close) / s.mean_close,
            ..ScreenParams::default()
        };
        assert!(params.within_band(&s));
    }

    #[test]
    fn test_band_rejects_runaway_price() {
        let s = stats(&[100.0, 100.0, 120.0]);
        let params = ScreenParams::default();
        assert!(!params.within_band(&s));
    }

    #[test]
    fn test_volatility_window_is_inclusive() {
        let params = ScreenParams {
            band: 1.0,
            min_volatility_pct: 0.0,
            max_volatility_pct: 100.0,
        };
        let s = stats(&[100.0, 101.0, 100.5]);
        assert!(params.within_volatility_window(&s));
    }

    #[test]
    fn test_flat_series_fails_default_volatility_floor() {
        // Zero volatility sits below the 0.05% floor
        let s = stats(&[100.0, 100.0, 100.0]);
        let params = ScreenParams::default();
        assert!(!params.passes(&s));
    }

    #[test]
    fn test_closest_strikes_single_winner() {
        let ladder = [140.0, 145.0, 150.0, 155.0];
        assert_eq!(closest_strikes(&ladder, 151.0), vec![150.0]);
    }

    #[test]
    fn test_closest_strikes_reports_ties() {
        let ladder = [145.0, 150.0, 155.0];
        assert_eq!(closest_strikes(&ladder, 152.5), vec![150.0, 155.0]);
    }

    #[test]
    fn test_closest_strikes_empty_ladder() {
        assert!(closest_strikes(&[], 100.0).is_empty());
        assert!(snap_strike(&[], 100.0).is_none());
    }

    #[test]
    fn test_snap_strike_prefers_lower_on_tie() {
        let ladder = [145.0, 150.0, 155.0];
        assert_eq!(snap_strike(&ladder, 152.5), Some(150.0));
    }
}
