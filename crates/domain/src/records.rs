//! Persisted projections and the notification payload.

use common::{BookingId, TicketId};
use serde::{Deserialize, Serialize};

use crate::booking::{BookingRequest, Movie};
use crate::money::Money;
use crate::payment::ChargeId;
use crate::user::{User, UserType};

/// The persisted projection of a booking request.
///
/// Created once per successful charge, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub city: String,
    pub user_type: UserType,
    pub total_amount: Money,
    pub cinema: CinemaSlot,
    pub movie: Movie,
    pub schedule: String,
}

impl BookingRecord {
    /// Projects a validated user and booking request into the record
    /// shape the store persists.
    pub fn project(user: &User, booking: &BookingRequest) -> Self {
        Self {
            city: booking.city.clone(),
            user_type: user.user_type(),
            total_amount: booking.total_amount,
            cinema: CinemaSlot {
                name: booking.cinema.clone(),
                room: booking.cinema_room.clone(),
                seats: booking.seats.clone(),
            },
            movie: booking.movie.clone(),
            schedule: booking.schedule.clone(),
        }
    }
}

/// The cinema, room, and seats a booking occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaSlot {
    pub name: String,
    pub room: String,
    pub seats: Vec<String>,
}

/// A booking record together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBooking {
    pub id: BookingId,
    #[serde(flatten)]
    pub record: BookingRecord,
}

/// The durable artifact returned to the caller: the booking record
/// plus the charge identifier and payment description.
///
/// Created exactly once per successful charge+booking pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    #[serde(flatten)]
    pub booking: BookingRecord,
    pub order_id: ChargeId,
    pub description: String,
}

impl TicketRecord {
    /// Derives a ticket from a persisted booking and the charge that
    /// paid for it.
    pub fn issue(booking: BookingRecord, order_id: ChargeId, description: String) -> Self {
        Self {
            booking,
            order_id,
            description,
        }
    }
}

/// A ticket record together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTicket {
    pub id: TicketId,
    #[serde(flatten)]
    pub ticket: TicketRecord,
}

/// Minimal contact info attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContact {
    pub name: String,
    pub email: String,
}

impl UserContact {
    /// Extracts contact info from a validated user.
    pub fn of(user: &User) -> Self {
        Self {
            name: user.full_name(),
            email: user.email.clone(),
        }
    }
}

/// Everything the dispatcher needs to send a confirmation message.
/// Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(flatten)]
    pub ticket: TicketRecord,
    pub user: UserContact,
}
