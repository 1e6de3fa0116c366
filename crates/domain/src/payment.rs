//! Payment orders and charge receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::BookingRequest;
use crate::money::Money;
use crate::user::{CreditCard, User};

/// Currency used when a booking does not specify one.
pub const DEFAULT_CURRENCY: &str = "mxn";

/// Gateway-assigned identifier for a captured charge.
///
/// Opaque to this system. It is the only cross-reference key between a
/// payment and the booking/ticket records it paid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeId(String);

impl ChargeId {
    /// Creates a charge ID from a gateway-assigned string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the charge ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChargeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChargeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChargeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ChargeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A payment order submitted to the gateway.
///
/// Built per booking from the validated user and request, never
/// persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub payer_name: String,
    pub currency: String,
    pub card: CreditCard,
    pub amount: Money,
    pub description: String,
}

impl PaymentOrder {
    /// Builds the payment order for a booking.
    ///
    /// The amount is taken verbatim from the booking's total; the
    /// description is the human-readable line that later becomes the
    /// ticket description.
    pub fn for_booking(user: &User, booking: &BookingRequest) -> Self {
        Self {
            payer_name: user.full_name(),
            currency: DEFAULT_CURRENCY.to_string(),
            card: user.credit_card.clone(),
            amount: booking.total_amount,
            description: format!(
                "Ticket(s) for movie {}, with seat(s) {} at time {}",
                booking.movie.title,
                booking.seats_display(),
                booking.schedule
            ),
        }
    }
}

/// The gateway's durable proof that a charge was captured.
///
/// Immutable once created. Its identifier becomes the permanent order
/// identifier for the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    pub charge_id: ChargeId,
    pub payer: String,
    pub amount: Money,
    pub currency: String,
    pub charged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Movie;

    fn sample_user() -> User {
        User {
            name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            membership: false,
            credit_card: CreditCard {
                number: "4242424242424242".to_string(),
                cvc: "123".to_string(),
                exp_month: 12,
                exp_year: 2027,
            },
        }
    }

    fn sample_booking() -> BookingRequest {
        BookingRequest {
            city: "Mexico City".to_string(),
            cinema: "Plaza Central".to_string(),
            cinema_room: "2".to_string(),
            movie: Movie {
                title: "Dune".to_string(),
                format: "IMAX".to_string(),
            },
            schedule: "2024-05-01T19:00".to_string(),
            seats: vec!["A1".to_string(), "A2".to_string()],
            total_amount: Money::from_cents(25000),
        }
    }

    #[test]
    fn test_for_booking_carries_amount_verbatim() {
        let order = PaymentOrder::for_booking(&sample_user(), &sample_booking());
        assert_eq!(order.amount, Money::from_cents(25000));
        assert_eq!(order.payer_name, "Ann Lee");
        assert_eq!(order.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_for_booking_description() {
        let order = PaymentOrder::for_booking(&sample_user(), &sample_booking());
        assert_eq!(
            order.description,
            "Ticket(s) for movie Dune, with seat(s) A1, A2 at time 2024-05-01T19:00"
        );
    }

    #[test]
    fn test_charge_id_string_conversion() {
        let id = ChargeId::new("CH-0001");
        assert_eq!(id.as_str(), "CH-0001");

        let id2: ChargeId = "CH-0002".into();
        assert_eq!(id2.to_string(), "CH-0002");
    }

    #[test]
    fn test_charge_id_serializes_transparently() {
        let id = ChargeId::new("CH-0042");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"CH-0042\"");
    }
}
