//! API Error Mapping - Port Errors to HTTP Statuses
//!
//! Maps the typed port/usecase errors onto the response envelope.
//! Internal detail is logged, never leaked: clients only ever see the
//! generic endpoint messages.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::ticket::TicketError;
use crate::ports::market_data::MarketDataError;
use crate::usecases::trade_desk::TradeDeskError;

use super::response::ApiResponse;

/// API-layer error with a fixed client-facing message per variant.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (400).
    #[error("{0}")]
    BadRequest(String),
    /// Requested resource does not exist upstream (404).
    #[error("{0}")]
    NotFound(String),
    /// Anything else (500). The string is already client-safe.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ApiResponse::fail(message))).into_response()
    }
}

impl From<MarketDataError> for ApiError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::NotFound => Self::NotFound("Stock data not found.".to_string()),
            other => {
                tracing::error!(error = %other, "Error fetching stock data");
                Self::Internal("An error occurred while fetching stock data.".to_string())
            }
        }
    }
}

impl From<TradeDeskError> for ApiError {
    fn from(err: TradeDeskError) -> Self {
        match err {
            TradeDeskError::Invalid(TicketError::MissingFields) => {
                Self::BadRequest("Missing required fields for trading.".to_string())
            }
            TradeDeskError::Gateway(e) => {
                tracing::error!(error = %e, "Error placing trade");
                Self::Internal("An error occurred while placing trade.".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_relay_message() {
        let err: ApiError = MarketDataError::NotFound.into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Stock data not found."));
    }

    #[test]
    fn test_transport_maps_to_generic_internal() {
        let err: ApiError = MarketDataError::Transport("tls handshake".to_string()).into();
        // Internal detail must never reach the client
        assert!(
            matches!(err, ApiError::Internal(ref m) if m == "An error occurred while fetching stock data.")
        );
    }

    #[test]
    fn test_missing_fields_maps_to_bad_request() {
        let err: ApiError = TradeDeskError::Invalid(TicketError::MissingFields).into();
        assert!(
            matches!(err, ApiError::BadRequest(ref m) if m == "Missing required fields for trading.")
        );
    }
}
