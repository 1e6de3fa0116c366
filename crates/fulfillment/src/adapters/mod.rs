//! External service contracts and in-memory implementations.

pub mod notification;
pub mod payment;
pub mod store;

pub use notification::{
    DeliveryError, DeliveryReceipt, EmailMessage, InMemoryMailDispatcher, NotificationDispatcher,
};
pub use payment::{InMemoryPaymentGateway, PaymentError, PaymentGateway};
pub use store::{BookingStore, InMemoryBookingStore, StoreError};
