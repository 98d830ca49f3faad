//! Market Data Port - Upstream Quote Provider Interface
//!
//! Defines the trait the usecases require from a quote provider:
//! raw quote passthrough for the relay endpoint and daily aggregate
//! windows for the screener. Adapters (e.g. the Polygon-style REST
//! client) implement this trait; the error enum is the seam the HTTP
//! layer maps onto status codes.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::quote::AggBar;

/// Failure modes of an upstream market-data request.
///
/// `NotFound` is the only variant a client must distinguish: the relay
/// endpoint turns it into a 404 while everything else collapses to 500.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Upstream answered but had no data for the ticker (404 or an
    /// empty body).
    #[error("no quote data for ticker")]
    NotFound,
    /// Upstream returned a non-success status that is not retryable.
    #[error("upstream returned status {0}")]
    Status(u16),
    /// Request never completed (connect, timeout, TLS), retries
    /// exhausted.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Upstream body was not the JSON shape we expect.
    #[error("malformed upstream payload: {0}")]
    Decode(String),
}

/// Trait for upstream quote providers.
///
/// Implementors own credentials, timeouts, and retry policy; callers
/// see only tickers in and domain values out.
#[async_trait]
pub trait MarketData: Send + Sync + 'static {
    /// Fetch the provider's quote payload for a ticker, verbatim.
    ///
    /// The relay endpoint forwards this value untouched, so the return
    /// type is raw JSON rather than a domain struct.
    async fn quote(&self, ticker: &str) -> Result<Value, MarketDataError>;

    /// Fetch up to `window_days` of daily aggregate bars, oldest first.
    async fn daily_aggregates(
        &self,
        ticker: &str,
        window_days: u32,
    ) -> Result<Vec<AggBar>, MarketDataError>;

    /// Check if the provider is reachable.
    async fn is_healthy(&self) -> bool;
}
