//! Stock Gateway — Entry Point
//!
//! Initializes configuration, logging, the upstream quote client, and
//! the paper broker gateway, then serves the REST API until
//! SIGINT/SIGTERM.
//!
//! Wiring sequence:
//! 1. Load config.toml + env overrides (PORT, POLYGON_API_KEY) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create shutdown broadcast channel
//! 4. Create upstream quote client (timeout + retry + api key)
//! 5. Create paper broker gateway and establish the session
//! 6. Spawn the gateway supervision loop (reconnect on drop)
//! 7. Wire usecases (relay, trade desk, screener) into the API state
//! 8. Spawn the API server (graceful shutdown on the channel)
//! 9. Wait for SIGINT → broadcast shutdown → drain tasks → exit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::broker::{PaperGateway, PaperGatewayConfig};
use adapters::http::{ApiServer, AppState};
use adapters::polygon::{PolygonClient, PolygonClientConfig};
use domain::selection::ScreenParams;
use usecases::quote_relay::QuoteRelay;
use usecases::screener::Screener;
use usecases::trade_desk::TradeDesk;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.server.port,
        upstream = %config.upstream.base_url,
        "Starting stock gateway"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Create upstream quote client ─────────────────────
    let polygon_config = PolygonClientConfig {
        base_url: config.upstream.base_url.clone(),
        api_key: config.upstream.api_key.clone(),
        timeout: Duration::from_millis(config.upstream.timeout_ms),
        max_retries: config.upstream.max_retries,
        retry_base_delay: Duration::from_millis(config.upstream.retry_base_delay_ms),
    };
    let market_data = Arc::new(
        PolygonClient::new(polygon_config).context("Failed to create quote client")?,
    );

    // ── 5. Create paper gateway and establish the session ───
    let gateway_config = PaperGatewayConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
        client_id: config.gateway.client_id,
        max_retries: config.gateway.max_retries,
        retry_delay: Duration::from_millis(config.gateway.retry_delay_ms),
        supervision_interval: Duration::from_millis(config.gateway.supervision_interval_ms),
        initial_cash: config.gateway.initial_cash,
        strike_step: config.gateway.strike_step,
        ladder_width: config.gateway.ladder_width,
    };
    let gateway = Arc::new(PaperGateway::new(gateway_config));
    gateway
        .connect()
        .await
        .context("Could not connect to broker gateway")?;

    // ── 6. Spawn gateway supervision (reconnect on drop) ────
    let supervision_rx = shutdown_tx.subscribe();
    let supervised = Arc::clone(&gateway);
    let supervision_handle = tokio::spawn(async move {
        supervised.maintain(supervision_rx).await;
    });

    // ── 7. Wire usecases into the API state ─────────────────
    let screen_params = ScreenParams {
        band: config.screener.band,
        min_volatility_pct: config.screener.min_volatility_pct,
        max_volatility_pct: config.screener.max_volatility_pct,
    };
    let state = AppState {
        relay: Arc::new(QuoteRelay::new(Arc::clone(&market_data))),
        desk: Arc::new(TradeDesk::new(Arc::clone(&gateway))),
        screener: Arc::new(Screener::new(
            Arc::clone(&market_data),
            screen_params,
            config.screener.window_days,
        )),
        gateway: Arc::clone(&gateway),
    };

    // ── 8. Spawn the API server ─────────────────────────────
    let server = ApiServer::new(config.server.bind_address.clone(), config.server.port);
    let server_rx = shutdown_tx.subscribe();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run(state, server_rx).await {
            error!(error = %e, "API server failed");
        }
    });

    info!("All tasks spawned — gateway is serving");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    // Graceful shutdown: signal tasks, close the session, drain.
    let _ = shutdown_tx.send(());
    gateway.disconnect();

    let _ = tokio::time::timeout(Duration::from_secs(10), server_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), supervision_handle).await;

    info!("Shutdown complete");
    Ok(())
}
