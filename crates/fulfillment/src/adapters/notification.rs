//! Notification dispatcher contract and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::NotificationPayload;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A delivery attempt failed.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The mail transport rejected or dropped the message.
    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Proof that the transport accepted a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub accepted_at: DateTime<Utc>,
}

/// Contract the orchestrator requires of a notification channel.
///
/// Sends are best-effort from the booking pipeline's perspective: the
/// caller bounds each send with a timeout and a failure never fails
/// the booking.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Renders and sends the confirmation message for a ticket.
    async fn send(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt, DeliveryError>;
}

/// A rendered confirmation message.
///
/// Rendering belongs to the adapter; the transport protocol does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Renders the booking confirmation for a ticket.
    pub fn confirmation(payload: &NotificationPayload) -> Self {
        let ticket = &payload.ticket;
        Self {
            from: "\"Do Not Reply, Cinemas Company\" <no-reply@cinemas.com>".to_string(),
            to: payload.user.email.clone(),
            subject: format!("Tickets for movie {}", ticket.booking.movie.title),
            body: format!(
                "Tickets for {title}\n\n\
                 Cinema: {cinema}\n\
                 Room: {room}\n\
                 Seats: {seats}\n\n\
                 Description: {description}\n\n\
                 Total: {total}\n\
                 Order: {order}\n\n\
                 Enjoy your movie!",
                title = ticket.booking.movie.title,
                cinema = ticket.booking.cinema.name,
                room = ticket.booking.cinema.room,
                seats = ticket.booking.cinema.seats.join(", "),
                description = ticket.description,
                total = ticket.booking.total_amount,
                order = ticket.order_id,
            ),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryMailState {
    sent: Vec<EmailMessage>,
    next_id: u32,
    fail_on_send: bool,
}

/// In-memory mail dispatcher for tests and default wiring.
///
/// Each send renders one message and holds no per-send resources, so
/// nothing leaks across calls.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailDispatcher {
    state: Arc<RwLock<InMemoryMailState>>,
}

impl InMemoryMailDispatcher {
    /// Creates a new in-memory mail dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the dispatcher to fail send calls.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of accepted messages.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }

    /// Returns the most recently accepted message.
    pub fn last_message(&self) -> Option<EmailMessage> {
        self.state.read().unwrap().sent.last().cloned()
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryMailDispatcher {
    async fn send(&self, payload: &NotificationPayload) -> Result<DeliveryReceipt, DeliveryError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(DeliveryError::Transport("smtp unavailable".to_string()));
        }

        state.next_id += 1;
        let message_id = format!("MSG-{:04}", state.next_id);
        state.sent.push(EmailMessage::confirmation(payload));

        Ok(DeliveryReceipt {
            message_id,
            accepted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        BookingRecord, ChargeId, CinemaSlot, Money, Movie, TicketRecord, UserContact, UserType,
    };

    fn sample_payload() -> NotificationPayload {
        let record = BookingRecord {
            city: "Mexico City".to_string(),
            user_type: UserType::Normal,
            total_amount: Money::from_cents(25000),
            cinema: CinemaSlot {
                name: "Plaza Central".to_string(),
                room: "2".to_string(),
                seats: vec!["A1".to_string(), "A2".to_string()],
            },
            movie: Movie {
                title: "Dune".to_string(),
                format: "IMAX".to_string(),
            },
            schedule: "2024-05-01T19:00".to_string(),
        };
        NotificationPayload {
            ticket: TicketRecord::issue(
                record,
                ChargeId::new("CH-0001"),
                "Ticket(s) for movie Dune".to_string(),
            ),
            user: UserContact {
                name: "Ann Lee".to_string(),
                email: "ann@x.com".to_string(),
            },
        }
    }

    #[test]
    fn test_confirmation_rendering() {
        let message = EmailMessage::confirmation(&sample_payload());
        assert_eq!(message.to, "ann@x.com");
        assert_eq!(message.subject, "Tickets for movie Dune");
        assert!(message.body.contains("Cinema: Plaza Central"));
        assert!(message.body.contains("Room: 2"));
        assert!(message.body.contains("Seats: A1, A2"));
        assert!(message.body.contains("Total: $250.00"));
        assert!(message.body.contains("Order: CH-0001"));
    }

    #[tokio::test]
    async fn test_send_records_message() {
        let dispatcher = InMemoryMailDispatcher::new();

        let receipt = dispatcher.send(&sample_payload()).await.unwrap();
        assert_eq!(receipt.message_id, "MSG-0001");
        assert_eq!(dispatcher.sent_count(), 1);
        assert_eq!(dispatcher.last_message().unwrap().to, "ann@x.com");
    }

    #[tokio::test]
    async fn test_fail_on_send() {
        let dispatcher = InMemoryMailDispatcher::new();
        dispatcher.set_fail_on_send(true);

        let err = dispatcher.send(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)));
        assert_eq!(dispatcher.sent_count(), 0);
    }
}
