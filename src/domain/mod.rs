//! Domain layer - Core business logic and models.
//!
//! Pure price-series math and selection rules for the stock gateway.
//! No external dependencies allowed here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod quote;
pub mod selection;
pub mod ticket;

// Re-export core types for convenience
pub use quote::{AggBar, SeriesStats};
pub use selection::{closest_strikes, snap_strike, ScreenParams};
pub use ticket::{TicketDraft, TicketError, TradeTicket};
