//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, applying environment overrides,
//! validating all parameters, and providing clear error messages for
//! misconfiguration. A missing file is not an error: defaults apply,
//! so `PORT` alone is enough to run the gateway.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read or parsed
/// - An env override is malformed (e.g. non-numeric `PORT`)
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let mut config: AppConfig = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
    } else {
        info!(path = %path.display(), "No config file found, using defaults");
        AppConfig::default()
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config)?;

    info!(
        port = config.server.port,
        upstream = %config.upstream.base_url,
        band = config.screener.band,
        window_days = config.screener.window_days,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Apply environment variable overrides on top of the file values.
///
/// `PORT` overrides the listen port; `POLYGON_API_KEY` overrides the
/// upstream credential so the file only ever carries a placeholder.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("PORT env var is not a valid port: {port}"))?;
    }
    if let Ok(key) = std::env::var("POLYGON_API_KEY") {
        config.upstream.api_key = key;
    }
    Ok(())
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty endpoints and credentials
/// - Positive timeouts and retry budgets
/// - Screener thresholds in sensible ranges
/// - A paper account that can actually trade
fn validate_config(config: &AppConfig) -> Result<()> {
    // Upstream validation
    anyhow::ensure!(
        !config.upstream.base_url.is_empty(),
        "Upstream base URL must not be empty"
    );
    anyhow::ensure!(
        !config.upstream.api_key.is_empty(),
        "Upstream API key must not be empty (set POLYGON_API_KEY)"
    );
    anyhow::ensure!(
        config.upstream.timeout_ms > 0,
        "Upstream timeout_ms must be positive"
    );
    anyhow::ensure!(
        config.upstream.max_retries <= 10,
        "Upstream max_retries must be at most 10, got {}",
        config.upstream.max_retries
    );

    // Screener validation
    anyhow::ensure!(
        config.screener.band > 0.0 && config.screener.band < 1.0,
        "Screener band must be in (0, 1), got {}",
        config.screener.band
    );
    anyhow::ensure!(
        config.screener.min_volatility_pct >= 0.0
            && config.screener.min_volatility_pct <= config.screener.max_volatility_pct,
        "Screener volatility window is inverted: [{}, {}]",
        config.screener.min_volatility_pct,
        config.screener.max_volatility_pct
    );
    anyhow::ensure!(
        config.screener.window_days >= 2,
        "Screener window_days must be at least 2, got {}",
        config.screener.window_days
    );

    // Gateway validation
    anyhow::ensure!(
        config.gateway.max_retries > 0,
        "Gateway max_retries must be positive"
    );
    anyhow::ensure!(
        config.gateway.initial_cash > 0.0,
        "Gateway initial_cash must be positive, got {}",
        config.gateway.initial_cash
    );
    anyhow::ensure!(
        config.gateway.strike_step > 0.0,
        "Gateway strike_step must be positive"
    );
    anyhow::ensure!(
        config.gateway.ladder_width > 0,
        "Gateway ladder_width must be positive"
    );

    Ok(())
}
