//! Workflow error taxonomy.

use domain::{ChargeId, ValidationError};
use thiserror::Error;

use crate::adapters::notification::DeliveryError;
use crate::adapters::payment::PaymentError;
use crate::adapters::store::StoreError;
use crate::phase::BookingPhase;

/// Errors surfaced by the booking pipeline.
///
/// Nothing is retried automatically; retries, if any, are a caller
/// concern.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Bad input. Recoverable by the caller correcting the input;
    /// nothing was charged or written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The gateway declined the instrument. Terminal for this attempt;
    /// the user must supply a different instrument.
    #[error("payment declined: {reason}")]
    PaymentDeclined { reason: String },

    /// Gateway infrastructure failure, including a timed-out charge
    /// whose outcome at the remote end is unknown.
    #[error("payment gateway error: {0}")]
    PaymentGateway(String),

    /// Money moved but the durable record did not: the charge
    /// succeeded and a later persistence step failed. Carries the
    /// charge identifier for manual reconciliation.
    #[error("charge {charge_id} captured but not recorded ({phase} failed): {source}")]
    ChargedNotRecorded {
        charge_id: ChargeId,
        phase: BookingPhase,
        source: StoreError,
    },

    /// Store failure on a read path, outside the write pipeline.
    #[error("booking store error: {0}")]
    Store(#[from] StoreError),

    /// Delivery failure from the standalone notification entry point.
    /// Inside the booking pipeline delivery failures are logged and
    /// swallowed, never surfaced as this variant.
    #[error("notification delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl BookingError {
    /// Returns the stranded charge identifier, if money moved without
    /// a durable record.
    pub fn stranded_charge(&self) -> Option<&ChargeId> {
        match self {
            BookingError::ChargedNotRecorded { charge_id, .. } => Some(charge_id),
            _ => None,
        }
    }
}

impl From<PaymentError> for BookingError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::Declined { reason } => BookingError::PaymentDeclined { reason },
            PaymentError::Gateway(msg) => BookingError::PaymentGateway(msg),
        }
    }
}

/// Convenience type alias for workflow results.
pub type Result<T> = std::result::Result<T, BookingError>;
