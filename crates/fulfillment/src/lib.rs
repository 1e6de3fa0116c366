//! Booking fulfillment workflow.
//!
//! This crate coordinates a multi-step booking transaction across
//! independently-failing external services:
//! 1. Validate the user and booking request
//! 2. Charge the payment instrument
//! 3. Persist the booking record
//! 4. Persist the ticket record
//! 5. Send a confirmation notification (best effort)
//!
//! A failure before the charge aborts with nothing written. A failure
//! after the charge surfaces a distinct "charged but not recorded"
//! error; no compensating refund is issued. A notification failure is
//! logged and never fails the booking.

pub mod adapters;
pub mod error;
pub mod orchestrator;
pub mod phase;

pub use adapters::notification::{
    DeliveryError, DeliveryReceipt, EmailMessage, InMemoryMailDispatcher, NotificationDispatcher,
};
pub use adapters::payment::{InMemoryPaymentGateway, PaymentError, PaymentGateway};
pub use adapters::store::{BookingStore, InMemoryBookingStore, StoreError};
pub use error::BookingError;
pub use orchestrator::{BookingOrchestrator, Timeouts};
pub use phase::BookingPhase;
