//! Trade Desk - Ticket Validation and Paper Placement
//!
//! Turns a raw trade request into a placed paper order: validate the
//! draft, snap the requested strike to the gateway's listed chain,
//! place through the execution port, and build the confirmation
//! message echoing the requested values.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::selection::snap_strike;
use crate::domain::ticket::{TicketDraft, TicketError, TradeTicket};
use crate::ports::execution::{GatewayError, TradeExecution};

/// Failure modes of a trade placement.
#[derive(Debug, Error)]
pub enum TradeDeskError {
    /// The request body was missing required fields.
    #[error(transparent)]
    Invalid(#[from] TicketError),
    /// The broker gateway refused or was unreachable.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Places validated tickets through the execution port.
pub struct TradeDesk<E: TradeExecution> {
    /// Execution port.
    execution: Arc<E>,
}

impl<E: TradeExecution> TradeDesk<E> {
    /// Create a new trade desk over the given gateway.
    pub fn new(execution: Arc<E>) -> Self {
        Self { execution }
    }

    /// Validate and place a trade, returning the confirmation message.
    ///
    /// The confirmation echoes the *requested* values; the snapped
    /// strike only affects the order handed to the gateway.
    #[instrument(skip(self, draft))]
    pub async fn place(&self, draft: TicketDraft) -> Result<String, TradeDeskError> {
        let ticket = draft.validate()?;

        let ladder = self
            .execution
            .strike_ladder(&ticket.ticker, ticket.strike_price)
            .await?;
        let snapped = snap_strike(&ladder, ticket.strike_price).unwrap_or(ticket.strike_price);
        if (snapped - ticket.strike_price).abs() > f64::EPSILON {
            debug!(
                requested = ticket.strike_price,
                snapped, "Requested strike snapped to listed strike"
            );
        }

        let order = TradeTicket {
            strike_price: snapped,
            ..ticket.clone()
        };
        let placement = self.execution.place_order(&order).await?;

        info!(
            order_id = %placement.order_id,
            ticker = %placement.ticker,
            strike = placement.strike,
            "Trade placed"
        );

        Ok(ticket.confirmation())
    }
}
