//! Trade tickets: the request shape accepted by the trade endpoint.
//!
//! A [`TicketDraft`] mirrors the wire format with every field optional
//! so presence is checked here, in one place, and a missing field maps
//! to a 400 instead of a framework-level deserialization rejection.

use serde::Deserialize;
use thiserror::Error;

/// Raw trade request body as received on the wire.
///
/// Field names follow the public API's camelCase contract.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    /// Underlying stock symbol.
    pub ticker: Option<String>,
    /// Free-form trade type label (e.g. "CALL", "PUT").
    pub trade_type: Option<String>,
    /// Requested option strike price.
    pub strike_price: Option<f64>,
    /// Number of contracts.
    pub quantity: Option<f64>,
}

/// Validation failure for a ticket draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    /// One or more of the four required fields was absent.
    #[error("Missing required fields for trading.")]
    MissingFields,
}

/// A fully populated trade ticket, ready for the execution port.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeTicket {
    /// Underlying stock symbol.
    pub ticker: String,
    /// Free-form trade type label, echoed back in the confirmation.
    pub trade_type: String,
    /// Requested strike price, before any snap to a listed strike.
    pub strike_price: f64,
    /// Number of contracts.
    pub quantity: f64,
}

impl TicketDraft {
    /// Promote the draft to a [`TradeTicket`], requiring all four fields.
    pub fn validate(self) -> Result<TradeTicket, TicketError> {
        match (self.ticker, self.trade_type, self.strike_price, self.quantity) {
            (Some(ticker), Some(trade_type), Some(strike_price), Some(quantity)) => {
                Ok(TradeTicket {
                    ticker,
                    trade_type,
                    strike_price,
                    quantity,
                })
            }
            _ => Err(TicketError::MissingFields),
        }
    }
}

impl TradeTicket {
    /// Confirmation message echoing the requested values verbatim.
    pub fn confirmation(&self) -> String {
        format!(
            "Successfully placed a {} trade for {} of {} at strike price {}.",
            self.trade_type, self.quantity, self.ticker, self.strike_price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> TicketDraft {
        TicketDraft {
            ticker: Some("AAPL".to_string()),
            trade_type: Some("CALL".to_string()),
            strike_price: Some(150.0),
            quantity: Some(2.0),
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        let ticket = full_draft().validate().unwrap();
        assert_eq!(ticket.ticker, "AAPL");
        assert_eq!(ticket.trade_type, "CALL");
    }

    #[test]
    fn test_each_missing_field_rejected() {
        let drafts = [
            TicketDraft { ticker: None, ..full_draft() },
            TicketDraft { trade_type: None, ..full_draft() },
            TicketDraft { strike_price: None, ..full_draft() },
            TicketDraft { quantity: None, ..full_draft() },
            TicketDraft::default(),
        ];
        for draft in drafts {
            assert_eq!(draft.validate(), Err(TicketError::MissingFields));
        }
    }

    #[test]
    fn test_confirmation_echoes_all_fields() {
        let ticket = full_draft().validate().unwrap();
        let msg = ticket.confirmation();
        assert_eq!(
            msg,
            "Successfully placed a CALL trade for 2 of AAPL at strike price 150."
        );
    }

    #[test]
    fn test_draft_deserializes_camel_case() {
        let json = r#"{"ticker":"TSLA","tradeType":"PUT","strikePrice":200.5,"quantity":1}"#;
        let draft: TicketDraft = serde_json::from_str(json).unwrap();
        let ticket = draft.validate().unwrap();
        assert_eq!(ticket.trade_type, "PUT");
        assert!((ticket.strike_price - 200.5).abs() < 1e-9);
    }
}
