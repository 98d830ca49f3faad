//! Quote Relay - Upstream Quote Passthrough
//!
//! Forwards a single-ticker quote request to the market-data port and
//! hands the payload back untouched. All response shaping (envelope,
//! status mapping) happens in the HTTP adapter.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::ports::market_data::{MarketData, MarketDataError};

/// Relays quote requests to the upstream provider.
pub struct QuoteRelay<M: MarketData> {
    /// Market data port.
    market_data: Arc<M>,
}

impl<M: MarketData> QuoteRelay<M> {
    /// Create a new relay over the given provider.
    pub fn new(market_data: Arc<M>) -> Self {
        Self { market_data }
    }

    /// Fetch the provider payload for a ticker, verbatim.
    ///
    /// # Errors
    /// Propagates the port error unchanged; `NotFound` is the caller's
    /// cue for a 404.
    #[instrument(skip(self))]
    pub async fn fetch(&self, ticker: &str) -> Result<Value, MarketDataError> {
        let payload = self.market_data.quote(ticker).await?;
        debug!(ticker, "Relayed upstream quote");
        Ok(payload)
    }
}
