//! Response Envelope - Uniform API Response Shape
//!
//! Every endpoint answers with the same envelope: `{success, data}`
//! for payloads, `{success, message}` for confirmations and errors.

use serde::Serialize;
use serde_json::Value;

/// The uniform response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload for data-bearing successes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Human-readable message for confirmations and failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Successful response carrying a payload.
    pub fn ok_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Successful response carrying a confirmation message.
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Failed response carrying an error message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
