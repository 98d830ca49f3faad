//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! gateway's workflows. Each use case is a self-contained operation.
//!
//! Use cases:
//! - `QuoteRelay`: Upstream quote passthrough
//! - `TradeDesk`: Ticket validation, strike snapping, paper placement
//! - `Screener`: Batch band + volatility stock selection

pub mod quote_relay;
pub mod screener;
pub mod trade_desk;
