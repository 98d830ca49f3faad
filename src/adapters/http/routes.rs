//! HTTP Routes - REST API Handlers
//!
//! Axum router and handlers delegating to the use cases. Handlers
//! only translate between the wire and the usecases; every business
//! decision lives below this layer.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::domain::ticket::TicketDraft;
use crate::ports::execution::TradeExecution;
use crate::ports::market_data::MarketData;
use crate::usecases::quote_relay::QuoteRelay;
use crate::usecases::screener::Screener;
use crate::usecases::trade_desk::TradeDesk;

use super::error::ApiError;
use super::response::ApiResponse;

/// Application state shared across handlers.
pub struct AppState<M, E>
where
    M: MarketData,
    E: TradeExecution,
{
    /// Quote relay use case.
    pub relay: Arc<QuoteRelay<M>>,
    /// Trade desk use case.
    pub desk: Arc<TradeDesk<E>>,
    /// Stock screener use case.
    pub screener: Arc<Screener<M>>,
    /// Broker gateway, polled by the readiness probe.
    pub gateway: Arc<E>,
}

impl<M, E> Clone for AppState<M, E>
where
    M: MarketData,
    E: TradeExecution,
{
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            desk: Arc::clone(&self.desk),
            screener: Arc::clone(&self.screener),
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Query parameters of the screener endpoint.
#[derive(Debug, Deserialize)]
pub struct ScreenQuery {
    /// Comma-separated candidate tickers.
    tickers: Option<String>,
}

/// Create the HTTP router with all endpoints.
pub fn build_router<M, E>(state: AppState<M, E>) -> Router
where
    M: MarketData + 'static,
    E: TradeExecution + 'static,
{
    Router::new()
        .route("/api/stock/:ticker", get(get_stock))
        .route("/api/trade", post(post_trade))
        .route("/api/stocks/best", get(get_best_stocks))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(state)
}

/// Quote relay endpoint: passthrough of the upstream payload.
async fn get_stock<M, E>(
    State(state): State<AppState<M, E>>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse>, ApiError>
where
    M: MarketData,
    E: TradeExecution,
{
    let data = state.relay.fetch(&ticker).await?;
    Ok(Json(ApiResponse::ok_data(data)))
}

/// Trade endpoint: validate, place paper order, confirm.
async fn post_trade<M, E>(
    State(state): State<AppState<M, E>>,
    Json(draft): Json<TicketDraft>,
) -> Result<Json<ApiResponse>, ApiError>
where
    M: MarketData,
    E: TradeExecution,
{
    let confirmation = state.desk.place(draft).await?;
    Ok(Json(ApiResponse::ok_message(confirmation)))
}

/// Screener endpoint: best stocks among the submitted tickers.
async fn get_best_stocks<M, E>(
    State(state): State<AppState<M, E>>,
    Query(query): Query<ScreenQuery>,
) -> Result<Json<ApiResponse>, ApiError>
where
    M: MarketData,
    E: TradeExecution,
{
    let tickers: Vec<String> = query
        .tickers
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tickers.is_empty() {
        return Err(ApiError::BadRequest("No tickers provided.".to_string()));
    }

    let best = state.screener.best_stocks(&tickers).await;
    Ok(Json(ApiResponse::ok_data(json!({ "best_stocks": best }))))
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: returns 200 only while the gateway session is up.
async fn readiness<M, E>(State(state): State<AppState<M, E>>) -> impl IntoResponse
where
    M: MarketData,
    E: TradeExecution,
{
    if state.gateway.is_connected() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
