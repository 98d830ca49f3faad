//! Configuration Module - TOML-based Gateway Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides (`PORT`, `POLYGON_API_KEY`).
//! All endpoints and thresholds are externalized here - nothing is
//! hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level gateway configuration.
///
/// Loaded from `config.toml` at startup; every section falls back to
/// defaults so the gateway boots with no file present at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server binding.
    pub server: ServerConfig,
    /// Upstream quote provider endpoints and retry policy.
    pub upstream: UpstreamConfig,
    /// Broker gateway session and paper account parameters.
    pub gateway: GatewayConfig,
    /// Stock screener thresholds.
    pub screener: ScreenerConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_address: String,
    /// Listen port. Overridden by the `PORT` env var.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream quote provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Provider REST base URL.
    pub base_url: String,
    /// API key appended to every request. Overridden by the
    /// `POLYGON_API_KEY` env var; the file value is a placeholder.
    pub api_key: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum retries on transient errors.
    pub max_retries: u32,
    /// Base delay between retries (exponential backoff), milliseconds.
    pub retry_base_delay_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.polygon.io".to_string(),
            api_key: "YOUR_POLYGON_API_KEY".to_string(),
            timeout_ms: 5_000,
            max_retries: 3,
            retry_base_delay_ms: 200,
        }
    }
}

/// Broker gateway configuration.
///
/// The session fields mirror a desktop trading gateway (host, port,
/// client id); the paper account fields seed the simulated chain and
/// ledger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway host.
    pub host: String,
    /// Gateway port (paper trading session).
    pub port: u16,
    /// Client id for the session.
    pub client_id: u32,
    /// Connection attempts before giving up.
    pub max_retries: u32,
    /// Delay between connection attempts, milliseconds.
    pub retry_delay_ms: u64,
    /// Interval of the connection supervision loop, milliseconds.
    pub supervision_interval_ms: u64,
    /// Starting cash for the paper account.
    pub initial_cash: f64,
    /// Distance between adjacent listed strikes on the synthetic chain.
    pub strike_step: f64,
    /// Listed strikes generated on each side of the spot price.
    pub ladder_width: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7497,
            client_id: 1,
            max_retries: 5,
            retry_delay_ms: 3_000,
            supervision_interval_ms: 10_000,
            initial_cash: 10_000.0,
            strike_step: 5.0,
            ladder_width: 3,
        }
    }
}

/// Stock screener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// Band around the mean close (0.04 = ±4%).
    pub band: f64,
    /// Inclusive EWMA volatility floor, percent.
    pub min_volatility_pct: f64,
    /// Inclusive EWMA volatility ceiling, percent.
    pub max_volatility_pct: f64,
    /// Daily bars fetched per ticker.
    pub window_days: u32,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            band: 0.04,
            min_volatility_pct: 0.05,
            max_volatility_pct: 5.0,
            window_days: 30,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins
    /// when set.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
