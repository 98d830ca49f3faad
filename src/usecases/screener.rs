//! Stock Screener - Batch Band and Volatility Filtering
//!
//! Fetches a daily-aggregate window per candidate ticker and keeps
//! the ones passing the selection filters. A ticker whose data cannot
//! be fetched is skipped and logged; one bad symbol must not void the
//! batch.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::quote::SeriesStats;
use crate::domain::selection::ScreenParams;
use crate::ports::market_data::MarketData;

/// Screens tickers against the configured selection filters.
pub struct Screener<M: MarketData> {
    /// Market data port.
    market_data: Arc<M>,
    /// Selection thresholds.
    params: ScreenParams,
    /// Daily bars fetched per ticker.
    window_days: u32,
}

impl<M: MarketData> Screener<M> {
    /// Create a new screener.
    pub fn new(market_data: Arc<M>, params: ScreenParams, window_days: u32) -> Self {
        Self {
            market_data,
            params,
            window_days,
        }
    }

    /// Return the subset of `tickers` passing both selection filters.
    ///
    /// Order of the input is preserved; duplicates are screened twice.
    #[instrument(skip(self, tickers), fields(candidates = tickers.len()))]
    pub async fn best_stocks(&self, tickers: &[String]) -> Vec<String> {
        let mut best = Vec::new();

        for ticker in tickers {
            let bars = match self.market_data.daily_aggregates(ticker, self.window_days).await {
                Ok(bars) => bars,
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Skipping ticker, no aggregate data");
                    continue;
                }
            };

            let Some(stats) = SeriesStats::from_bars(&bars) else {
                warn!(ticker = %ticker, bars = bars.len(), "Skipping ticker, window too short");
                continue;
            };

            debug!(
                ticker = %ticker,
                latest = stats.latest_close,
                mean = stats.mean_close,
                vol_pct = stats.ewma_volatility_pct,
                "Screened ticker"
            );

            if self.params.passes(&stats) {
                best.push(ticker.clone());
            }
        }

        best
    }
}
