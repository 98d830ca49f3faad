//! Quote Provider HTTP Client - Rate-limited REST API Client
//!
//! Wraps reqwest with timeouts, bounded retries, and API-key
//! injection for all upstream quote-provider interactions. Implements
//! the `MarketData` port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::domain::quote::AggBar;
use crate::ports::market_data::{MarketData, MarketDataError};

/// Configuration for the quote provider client.
#[derive(Debug, Clone)]
pub struct PolygonClientConfig {
    /// Base URL for the provider REST API.
    pub base_url: String,
    /// API key appended to every request.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient errors.
    pub max_retries: u32,
    /// Base delay between retries (exponential backoff).
    pub retry_base_delay: Duration,
}

impl Default for PolygonClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.polygon.io".to_string(),
            api_key: "YOUR_POLYGON_API_KEY".to_string(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(200),
        }
    }
}

/// Envelope of the provider's aggregates endpoint.
#[derive(Debug, Deserialize)]
struct AggsEnvelope {
    #[serde(default)]
    results: Vec<AggBar>,
}

/// HTTP client for the upstream quote provider.
pub struct PolygonClient {
    /// Underlying HTTP client.
    http: Client,
    /// Client configuration.
    config: PolygonClientConfig,
}

impl PolygonClient {
    /// Create a new quote provider client.
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be built.
    pub fn new(config: PolygonClientConfig) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Execute a GET with api-key injection and bounded retries.
    ///
    /// Retries transport failures, 429 and 5xx with exponential
    /// backoff; 404 maps to `NotFound`, other statuses fail fast.
    async fn get_json(&self, path: &str) -> Result<Value, MarketDataError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut last_error = MarketDataError::Transport("no attempts made".to_string());

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
                debug!(attempt, delay_ms = delay.as_millis(), "Retrying upstream request");
                sleep(delay).await;
            }

            let result = self
                .http
                .get(&url)
                .query(&[("apiKey", self.config.api_key.as_str())])
                .send()
                .await;

            match result {
                Ok(response) => match response.status() {
                    StatusCode::OK => {
                        let body = response
                            .text()
                            .await
                            .map_err(|e| MarketDataError::Transport(e.to_string()))?;
                        return Self::parse_body(&body);
                    }
                    StatusCode::NOT_FOUND => return Err(MarketDataError::NotFound),
                    StatusCode::TOO_MANY_REQUESTS => {
                        warn!("Rate limited by quote provider, backing off");
                        last_error = MarketDataError::Status(429);
                    }
                    status if status.is_server_error() => {
                        warn!(status = %status, "Upstream server error, retrying");
                        last_error = MarketDataError::Status(status.as_u16());
                    }
                    status => return Err(MarketDataError::Status(status.as_u16())),
                },
                Err(e) => {
                    warn!(error = %e, attempt, "Upstream request failed");
                    last_error = MarketDataError::Transport(e.to_string());
                }
            }
        }

        Err(last_error)
    }

    /// Parse a 200 body: an empty or null payload counts as no data.
    fn parse_body(body: &str) -> Result<Value, MarketDataError> {
        if body.trim().is_empty() {
            return Err(MarketDataError::NotFound);
        }
        let value: Value = serde_json::from_str(body)
            .map_err(|e| MarketDataError::Decode(e.to_string()))?;
        if value.is_null() {
            return Err(MarketDataError::NotFound);
        }
        Ok(value)
    }
}

#[async_trait]
impl MarketData for PolygonClient {
    #[instrument(skip(self))]
    async fn quote(&self, ticker: &str) -> Result<Value, MarketDataError> {
        self.get_json(&format!("/v1/quote/{ticker}")).await
    }

    #[instrument(skip(self))]
    async fn daily_aggregates(
        &self,
        ticker: &str,
        window_days: u32,
    ) -> Result<Vec<AggBar>, MarketDataError> {
        let to = Utc::now().date_naive();
        let from = to - chrono::Duration::days(i64::from(window_days));
        let path = format!(
            "/v2/aggs/ticker/{ticker}/range/1/day/{from}/{to}?adjusted=true&sort=asc&limit={window_days}"
        );

        let value = self.get_json(&path).await?;
        let envelope: AggsEnvelope = serde_json::from_value(value)
            .map_err(|e| MarketDataError::Decode(e.to_string()))?;

        if envelope.results.is_empty() {
            return Err(MarketDataError::NotFound);
        }
        Ok(envelope.results)
    }

    async fn is_healthy(&self) -> bool {
        self.get_json("/v1/marketstatus/now").await.is_ok()
    }
}
