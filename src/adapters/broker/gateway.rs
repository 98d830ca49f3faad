//! Paper Broker Gateway — Adapter for Order Placement
//!
//! Implements the `TradeExecution` port against an in-process paper
//! account. The session lifecycle (bounded connect retries, a
//! supervision loop that re-establishes a dropped session) mirrors a
//! desktop trading gateway; fills debit a Decimal cash ledger and the
//! option chain is a synthetic strike ladder around the spot price.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::ticket::TradeTicket;
use crate::ports::execution::{
    AccountSummary, GatewayError, OrderPlacement, TradeExecution,
};

/// Configuration for the paper gateway session.
#[derive(Debug, Clone)]
pub struct PaperGatewayConfig {
    /// Gateway host (kept for session logging parity with a real gateway).
    pub host: String,
    /// Gateway port.
    pub port: u16,
    /// Session client id.
    pub client_id: u32,
    /// Connection attempts before giving up.
    pub max_retries: u32,
    /// Delay between connection attempts.
    pub retry_delay: Duration,
    /// Interval of the supervision loop.
    pub supervision_interval: Duration,
    /// Starting cash for the paper account.
    pub initial_cash: f64,
    /// Distance between adjacent listed strikes.
    pub strike_step: f64,
    /// Listed strikes generated on each side of the spot price.
    pub ladder_width: u32,
}

impl Default for PaperGatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7497,
            client_id: 1,
            max_retries: 5,
            retry_delay: Duration::from_secs(3),
            supervision_interval: Duration::from_secs(10),
            initial_cash: 10_000.0,
            strike_step: 5.0,
            ladder_width: 3,
        }
    }
}

/// A recorded paper fill.
#[derive(Debug, Clone)]
struct Fill {
    order_id: String,
    cost: Decimal,
}

/// Cash and fill history of the paper account.
#[derive(Debug)]
struct Ledger {
    cash: Decimal,
    fills: Vec<Fill>,
}

/// Paper broker gateway backed by an in-memory account.
pub struct PaperGateway {
    /// Session configuration.
    config: PaperGatewayConfig,
    /// Whether the session is currently up.
    connected: AtomicBool,
    /// Paper account state.
    ledger: Mutex<Ledger>,
}

impl PaperGateway {
    /// Create a disconnected gateway; call [`Self::connect`] before trading.
    pub fn new(config: PaperGatewayConfig) -> Self {
        let cash = Decimal::from_f64(config.initial_cash).unwrap_or(Decimal::ZERO);
        Self {
            config,
            connected: AtomicBool::new(false),
            ledger: Mutex::new(Ledger {
                cash,
                fills: Vec::new(),
            }),
        }
    }

    /// Establish the gateway session with bounded retries.
    ///
    /// # Errors
    /// `ConnectFailed` once the retry budget is exhausted.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<(), GatewayError> {
        for attempt in 1..=self.config.max_retries {
            info!(
                host = %self.config.host,
                port = self.config.port,
                client_id = self.config.client_id,
                attempt,
                max = self.config.max_retries,
                "Connecting to broker gateway"
            );

            if self.handshake() {
                self.connected.store(true, Ordering::Relaxed);
                info!("Broker gateway session established");
                return Ok(());
            }

            warn!(attempt, "Gateway handshake failed");
            if attempt < self.config.max_retries {
                sleep(self.config.retry_delay).await;
            }
        }

        Err(GatewayError::ConnectFailed {
            attempts: self.config.max_retries,
        })
    }

    /// Paper handshake: always succeeds, the session is in-process.
    fn handshake(&self) -> bool {
        true
    }

    /// Drop the session.
    pub fn disconnect(&self) {
        if self.connected.swap(false, Ordering::Relaxed) {
            info!("Disconnected from broker gateway");
        }
    }

    /// Supervision loop: re-establish the session whenever it drops.
    ///
    /// Runs until the shutdown channel fires. Event-driven via
    /// `tokio::select!`; the interval only paces the health check.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn maintain(&self, mut shutdown_rx: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Gateway supervision stopping");
                    break;
                }
                () = sleep(self.config.supervision_interval) => {
                    if !self.is_connected() {
                        warn!("Lost gateway session, reconnecting");
                        if let Err(e) = self.connect().await {
                            warn!(error = %e, "Gateway reconnect failed");
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl TradeExecution for PaperGateway {
    #[instrument(skip(self, ticket), fields(ticker = %ticket.ticker, strike = ticket.strike_price, qty = ticket.quantity))]
    async fn place_order(&self, ticket: &TradeTicket) -> Result<OrderPlacement, GatewayError> {
        if !self.is_connected() {
            return Err(GatewayError::NotConnected);
        }

        let cost = Decimal::from_f64(ticket.strike_price * ticket.quantity)
            .ok_or_else(|| GatewayError::Rejected("non-finite order cost".to_string()))?;
        if cost <= Decimal::ZERO {
            return Err(GatewayError::Rejected(format!(
                "order cost must be positive, got {cost}"
            )));
        }

        let mut ledger = self.ledger.lock().unwrap();
        if ledger.cash < cost {
            return Err(GatewayError::Rejected(format!(
                "insufficient cash: need {cost}, have {}",
                ledger.cash
            )));
        }

        let order_id = Uuid::new_v4().to_string();
        ledger.cash -= cost;
        ledger.fills.push(Fill {
            order_id: order_id.clone(),
            cost,
        });

        info!(
            order_id = %order_id,
            cost = %cost,
            remaining = %ledger.cash,
            "Paper order filled"
        );

        Ok(OrderPlacement {
            order_id,
            ticker: ticket.ticker.clone(),
            strike: ticket.strike_price,
            quantity: ticket.quantity,
            timestamp_ms: Utc::now().timestamp_millis(),
        })
    }

    async fn account_summary(&self) -> Result<AccountSummary, GatewayError> {
        let ledger = self.ledger.lock().unwrap();
        Ok(AccountSummary {
            cash: ledger.cash,
            fills: ledger.fills.len(),
            connected: self.is_connected(),
        })
    }

    async fn strike_ladder(&self, ticker: &str, around: f64) -> Result<Vec<f64>, GatewayError> {
        if !self.is_connected() {
            return Err(GatewayError::NotConnected);
        }
        if !around.is_finite() || around <= 0.0 {
            return Err(GatewayError::Rejected(format!(
                "cannot build a strike ladder around {around}"
            )));
        }

        let step = self.config.strike_step;
        let width = i64::from(self.config.ladder_width);
        let center = (around / step).round() * step;

        let ladder: Vec<f64> = (-width..=width)
            .map(|i| center + i as f64 * step)
            .filter(|&s| s > 0.0)
            .collect();

        debug!(ticker, around, strikes = ladder.len(), "Built synthetic strike ladder");
        Ok(ladder)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}
