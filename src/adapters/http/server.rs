//! API Server - Axum HTTP Server with Graceful Shutdown
//!
//! Binds the REST router and serves until the shutdown channel fires.

use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::ports::execution::TradeExecution;
use crate::ports::market_data::MarketData;

use super::routes::{AppState, build_router};

/// Axum-based API server hosting the gateway's REST endpoints.
pub struct ApiServer {
    /// Interface to bind.
    bind_address: String,
    /// Listen port (default 3000, overridden by `PORT`).
    port: u16,
}

impl ApiServer {
    /// Create a new API server.
    pub fn new(bind_address: String, port: u16) -> Self {
        Self { bind_address, port }
    }

    /// Serve requests until the shutdown channel fires.
    #[instrument(skip(self, state, shutdown_rx))]
    pub async fn run<M, E>(
        self,
        state: AppState<M, E>,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()>
    where
        M: MarketData + 'static,
        E: TradeExecution + 'static,
    {
        let app = build_router(state);

        let addr = format!("{}:{}", self.bind_address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(address = %addr, "API server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}
