//! Trade Execution Port - Broker Gateway Interface
//!
//! Defines the trait for placing option trades through a broker
//! gateway. The only shipped implementation is the in-process paper
//! gateway; a real brokerage adapter would implement the same trait
//! without touching the usecases.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::ticket::TradeTicket;

/// Failure modes of the broker gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway session is down and reconnection has not succeeded.
    #[error("gateway is not connected")]
    NotConnected,
    /// The gateway refused the order (e.g. insufficient cash).
    #[error("order rejected: {0}")]
    Rejected(String),
    /// Initial connection gave up after the configured retry budget.
    #[error("could not connect to gateway after {attempts} attempts")]
    ConnectFailed {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
}

/// Result of a successful order placement.
#[derive(Debug, Clone)]
pub struct OrderPlacement {
    /// Gateway-assigned order id.
    pub order_id: String,
    /// Underlying ticker.
    pub ticker: String,
    /// Listed strike the order was actually placed at (the requested
    /// strike snapped to the chain).
    pub strike: f64,
    /// Contracts filled.
    pub quantity: f64,
    /// Fill timestamp (Unix ms).
    pub timestamp_ms: i64,
}

/// Point-in-time account snapshot.
#[derive(Debug, Clone)]
pub struct AccountSummary {
    /// Remaining cash balance.
    pub cash: Decimal,
    /// Number of fills recorded this session.
    pub fills: usize,
    /// Whether the gateway session is up.
    pub connected: bool,
}

/// Trait for order execution providers.
///
/// Implementors manage their own connection lifecycle; callers only
/// observe it through `is_connected` and the `NotConnected` error.
#[async_trait]
pub trait TradeExecution: Send + Sync + 'static {
    /// Place a single order for a validated ticket.
    ///
    /// # Errors
    /// `NotConnected` when the session is down, `Rejected` when the
    /// account cannot cover the order.
    async fn place_order(&self, ticket: &TradeTicket) -> Result<OrderPlacement, GatewayError>;

    /// Fetch the current account summary.
    async fn account_summary(&self) -> Result<AccountSummary, GatewayError>;

    /// Listed strikes bracketing a price for a ticker's option chain.
    async fn strike_ladder(&self, ticker: &str, around: f64) -> Result<Vec<f64>, GatewayError>;

    /// Whether the gateway session is currently up.
    fn is_connected(&self) -> bool;
}
