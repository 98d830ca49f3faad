//! Quote Provider Adapter
//!
//! REST client for the upstream stock-quote provider. Implements the
//! `MarketData` port with API-key injection, timeouts, and bounded
//! retries.

pub mod client;

pub use client::{PolygonClient, PolygonClientConfig};
