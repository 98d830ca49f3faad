//! HTTP Adapter - REST API Surface
//!
//! Driver adapter exposing the gateway over HTTP:
//! - `response`: the uniform `{success, data|message}` envelope
//! - `error`: port/usecase error → status code mapping
//! - `routes`: axum handlers and router assembly
//! - `server`: bind + serve with graceful shutdown

pub mod error;
pub mod response;
pub mod routes;
pub mod server;

pub use routes::AppState;
pub use server::ApiServer;
