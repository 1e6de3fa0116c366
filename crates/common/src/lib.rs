//! Shared identifier types used across the booking fulfillment crates.

pub mod types;

pub use types::{BookingId, TicketId};
