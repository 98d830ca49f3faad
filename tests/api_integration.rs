//! Integration Tests - End-to-end API Surface Testing
//!
//! Drives the axum router with mocked ports so every status-code and
//! envelope contract can be asserted without a network. Uses mockall
//! for trait mocking and `tower::ServiceExt::oneshot` for requests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mockall::mock;
use serde_json::{Value, json};
use tower::ServiceExt;

use stock_gateway::adapters::http::routes::{AppState, build_router};
use stock_gateway::domain::quote::AggBar;
use stock_gateway::domain::selection::ScreenParams;
use stock_gateway::domain::ticket::TradeTicket;
use stock_gateway::ports::execution::{
    AccountSummary, GatewayError, OrderPlacement, TradeExecution,
};
use stock_gateway::ports::market_data::{MarketData, MarketDataError};
use stock_gateway::usecases::quote_relay::QuoteRelay;
use stock_gateway::usecases::screener::Screener;
use stock_gateway::usecases::trade_desk::TradeDesk;

// ---- Mock Definitions ----

mock! {
    pub Market {}

    #[async_trait::async_trait]
    impl MarketData for Market {
        async fn quote(&self, ticker: &str) -> Result<Value, MarketDataError>;

        async fn daily_aggregates(
            &self,
            ticker: &str,
            window_days: u32,
        ) -> Result<Vec<AggBar>, MarketDataError>;

        async fn is_healthy(&self) -> bool;
    }
}

mock! {
    pub Exec {}

    #[async_trait::async_trait]
    impl TradeExecution for Exec {
        async fn place_order(
            &self,
            ticket: &TradeTicket,
        ) -> Result<OrderPlacement, GatewayError>;

        async fn account_summary(&self) -> Result<AccountSummary, GatewayError>;

        async fn strike_ladder(
            &self,
            ticker: &str,
            around: f64,
        ) -> Result<Vec<f64>, GatewayError>;

        fn is_connected(&self) -> bool;
    }
}

// ---- Helpers ----

fn router(market: MockMarket, exec: MockExec) -> Router {
    let market = Arc::new(market);
    let exec = Arc::new(exec);
    build_router(AppState {
        relay: Arc::new(QuoteRelay::new(Arc::clone(&market))),
        desk: Arc::new(TradeDesk::new(Arc::clone(&exec))),
        screener: Arc::new(Screener::new(
            Arc::clone(&market),
            ScreenParams::default(),
            30,
        )),
        gateway: exec,
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn bar(close: f64) -> AggBar {
    AggBar {
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000.0,
        timestamp_ms: 1_700_000_000_000,
    }
}

fn post_trade(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/trade")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ---- Quote relay ----

#[tokio::test]
async fn quote_passes_upstream_payload_through() {
    let mut market = MockMarket::new();
    market
        .expect_quote()
        .withf(|t| t == "AAPL")
        .returning(|_| Ok(json!({"last": {"price": 189.3}, "symbol": "AAPL"})));

    let response = router(market, MockExec::new())
        .oneshot(get("/api/stock/AAPL"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["last"]["price"], json!(189.3));
}

#[tokio::test]
async fn quote_maps_missing_data_to_404() {
    let mut market = MockMarket::new();
    market
        .expect_quote()
        .returning(|_| Err(MarketDataError::NotFound));

    let response = router(market, MockExec::new())
        .oneshot(get("/api/stock/NOPE"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Stock data not found."));
}

#[tokio::test]
async fn quote_maps_upstream_failure_to_500() {
    let mut market = MockMarket::new();
    market
        .expect_quote()
        .returning(|_| Err(MarketDataError::Transport("connection refused".to_string())));

    let response = router(market, MockExec::new())
        .oneshot(get("/api/stock/AAPL"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("An error occurred while fetching stock data.")
    );
}

// ---- Trade desk ----

#[tokio::test]
async fn trade_rejects_every_missing_field_with_400() {
    let complete = json!({
        "ticker": "AAPL",
        "tradeType": "CALL",
        "strikePrice": 150.0,
        "quantity": 2
    });

    for field in ["ticker", "tradeType", "strikePrice", "quantity"] {
        let mut body = complete.clone();
        body.as_object_mut().unwrap().remove(field);

        let response = router(MockMarket::new(), MockExec::new())
            .oneshot(post_trade(body))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "missing {field} must be a 400"
        );
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Missing required fields for trading."));
    }
}

#[tokio::test]
async fn trade_confirms_and_echoes_all_fields() {
    let mut exec = MockExec::new();
    exec.expect_strike_ladder()
        .withf(|t, around| t == "AAPL" && (*around - 151.0).abs() < 1e-9)
        .returning(|_, _| Ok(vec![145.0, 150.0, 155.0]));
    exec.expect_place_order()
        .withf(|ticket| (ticket.strike_price - 150.0).abs() < 1e-9)
        .returning(|ticket| {
            Ok(OrderPlacement {
                order_id: "ord-1".to_string(),
                ticker: ticket.ticker.clone(),
                strike: ticket.strike_price,
                quantity: ticket.quantity,
                timestamp_ms: 0,
            })
        });

    let response = router(MockMarket::new(), exec)
        .oneshot(post_trade(json!({
            "ticker": "AAPL",
            "tradeType": "CALL",
            "strikePrice": 151.0,
            "quantity": 2
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    // Confirmation echoes the requested values, not the snapped strike
    assert_eq!(
        body["message"],
        json!("Successfully placed a CALL trade for 2 of AAPL at strike price 151.")
    );
}

#[tokio::test]
async fn trade_maps_gateway_failure_to_500() {
    let mut exec = MockExec::new();
    exec.expect_strike_ladder()
        .returning(|_, _| Err(GatewayError::NotConnected));

    let response = router(MockMarket::new(), exec)
        .oneshot(post_trade(json!({
            "ticker": "AAPL",
            "tradeType": "PUT",
            "strikePrice": 90.0,
            "quantity": 1
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("An error occurred while placing trade."));
}

// ---- Screener ----

#[tokio::test]
async fn screener_keeps_in_band_and_skips_failures() {
    let mut market = MockMarket::new();
    // Calm series hugging its mean: passes band + volatility window
    market
        .expect_daily_aggregates()
        .withf(|t, _| t == "CALM")
        .returning(|_, _| Ok(vec![bar(100.0), bar(101.0), bar(100.0), bar(101.0), bar(100.5)]));
    // Latest close 12% above the mean: fails the band
    market
        .expect_daily_aggregates()
        .withf(|t, _| t == "SPIKE")
        .returning(|_, _| Ok(vec![bar(100.0), bar(100.0), bar(120.0)]));
    // No data upstream: skipped, not fatal
    market
        .expect_daily_aggregates()
        .withf(|t, _| t == "GHOST")
        .returning(|_, _| Err(MarketDataError::NotFound));

    let response = router(market, MockExec::new())
        .oneshot(get("/api/stocks/best?tickers=CALM,SPIKE,GHOST"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["best_stocks"], json!(["CALM"]));
}

#[tokio::test]
async fn screener_requires_tickers() {
    for uri in ["/api/stocks/best", "/api/stocks/best?tickers=", "/api/stocks/best?tickers=,,"] {
        let response = router(MockMarket::new(), MockExec::new())
            .oneshot(get(uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} must be a 400");
    }
}

// ---- Health probes ----

#[tokio::test]
async fn liveness_is_always_ok() {
    let response = router(MockMarket::new(), MockExec::new())
        .oneshot(get("/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_tracks_gateway_session() {
    let mut exec = MockExec::new();
    exec.expect_is_connected().returning(|| false);
    let response = router(MockMarket::new(), exec)
        .oneshot(get("/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let mut exec = MockExec::new();
    exec.expect_is_connected().returning(|| true);
    let response = router(MockMarket::new(), exec)
        .oneshot(get("/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
