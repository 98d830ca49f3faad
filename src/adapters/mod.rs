//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, the paper broker session) and
//! exposes the gateway to the world over HTTP.
//!
//! Adapter categories:
//! - `polygon`: Upstream quote-provider REST client
//! - `broker`: Paper broker gateway (session lifecycle + cash ledger)
//! - `http`: Axum REST API surface and health probes

pub mod broker;
pub mod http;
pub mod polygon;
