//! Broker Gateway Adapter
//!
//! In-process paper implementation of the `TradeExecution` port:
//! session lifecycle with retries and supervision, a Decimal cash
//! ledger, and a synthetic option chain.

pub mod gateway;

pub use gateway::{PaperGateway, PaperGatewayConfig};
