//! Domain layer for the booking fulfillment system.
//!
//! This crate provides the core data model and input validation:
//! - Raw inputs (`UserInput`, `BookingInput`) as received from callers
//! - Validated records (`User`, `BookingRequest`) produced by the `Validator`
//! - Payment types (`PaymentOrder`, `ChargeReceipt`, `ChargeId`)
//! - Persisted projections (`BookingRecord`, `TicketRecord`) and the
//!   notification payload
//!
//! Everything here is pure and side-effect free; all I/O lives behind the
//! adapter traits in the `fulfillment` crate.

pub mod booking;
pub mod money;
pub mod payment;
pub mod records;
pub mod user;
pub mod validate;

pub use booking::{BookingInput, BookingRequest, Movie, MovieInput};
pub use money::Money;
pub use payment::{ChargeId, ChargeReceipt, PaymentOrder, DEFAULT_CURRENCY};
pub use records::{
    BookingRecord, CinemaSlot, NotificationPayload, StoredBooking, StoredTicket, TicketRecord,
    UserContact,
};
pub use user::{CreditCard, CreditCardInput, User, UserInput, UserType};
pub use validate::{ValidationError, Validator};
