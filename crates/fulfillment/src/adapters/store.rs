//! Booking store contract and in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{BookingId, TicketId};
use domain::{BookingRecord, ChargeId, StoredBooking, StoredTicket, TicketRecord};
use thiserror::Error;

/// Errors a store operation can produce.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// One or more requested seats are already sold for the same
    /// cinema, room, and schedule.
    #[error("seats [{}] already sold for {cinema} room {room} at {schedule}", .seats.join(", "))]
    SeatConflict {
        cinema: String,
        room: String,
        schedule: String,
        seats: Vec<String>,
    },

    /// The store could not complete the operation.
    #[error("booking store unavailable: {0}")]
    Unavailable(String),
}

/// Contract the orchestrator requires of the booking datastore.
///
/// Writes are single-document inserts with store-assigned identifiers.
/// There is no transactionality between the booking and ticket
/// collections; the two inserts fail independently.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists a booking record, returning it with its new identifier.
    async fn insert_booking(&self, record: BookingRecord) -> Result<StoredBooking, StoreError>;

    /// Persists a ticket record, returning it with its new identifier.
    async fn insert_ticket(&self, ticket: TicketRecord) -> Result<StoredTicket, StoreError>;

    /// Looks up a booking by its store-assigned identifier.
    async fn find_booking_by_id(
        &self,
        id: BookingId,
    ) -> Result<Option<StoredBooking>, StoreError>;

    /// Looks up a ticket by the charge identifier it was issued for.
    async fn find_ticket_by_order_id(
        &self,
        order_id: &ChargeId,
    ) -> Result<Option<StoredTicket>, StoreError>;
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    bookings: HashMap<BookingId, StoredBooking>,
    tickets: HashMap<TicketId, StoredTicket>,
    /// Seats sold per (cinema, room, schedule).
    sold: HashMap<(String, String, String), HashSet<String>>,
    fail_on_insert_booking: bool,
    fail_on_insert_ticket: bool,
}

/// In-memory booking store for tests and default wiring.
///
/// Enforces seat disjointness per (cinema, room, schedule) the way the
/// real datastore would, reporting [`StoreError::SeatConflict`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

impl InMemoryBookingStore {
    /// Creates a new empty in-memory booking store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail booking inserts.
    pub fn set_fail_on_insert_booking(&self, fail: bool) {
        self.state.write().unwrap().fail_on_insert_booking = fail;
    }

    /// Configures the store to fail ticket inserts.
    pub fn set_fail_on_insert_ticket(&self, fail: bool) {
        self.state.write().unwrap().fail_on_insert_ticket = fail;
    }

    /// Returns the number of persisted bookings.
    pub fn booking_count(&self) -> usize {
        self.state.read().unwrap().bookings.len()
    }

    /// Returns the number of persisted tickets.
    pub fn ticket_count(&self) -> usize {
        self.state.read().unwrap().tickets.len()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert_booking(&self, record: BookingRecord) -> Result<StoredBooking, StoreError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_insert_booking {
            return Err(StoreError::Unavailable("write failed".to_string()));
        }

        let slot = (
            record.cinema.name.clone(),
            record.cinema.room.clone(),
            record.schedule.clone(),
        );
        let sold = state.sold.entry(slot).or_default();
        let taken: Vec<String> = record
            .cinema
            .seats
            .iter()
            .filter(|seat| sold.contains(*seat))
            .cloned()
            .collect();
        if !taken.is_empty() {
            return Err(StoreError::SeatConflict {
                cinema: record.cinema.name.clone(),
                room: record.cinema.room.clone(),
                schedule: record.schedule.clone(),
                seats: taken,
            });
        }
        sold.extend(record.cinema.seats.iter().cloned());

        let stored = StoredBooking {
            id: BookingId::new(),
            record,
        };
        state.bookings.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn insert_ticket(&self, ticket: TicketRecord) -> Result<StoredTicket, StoreError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_insert_ticket {
            return Err(StoreError::Unavailable("write failed".to_string()));
        }

        let stored = StoredTicket {
            id: TicketId::new(),
            ticket,
        };
        state.tickets.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_booking_by_id(
        &self,
        id: BookingId,
    ) -> Result<Option<StoredBooking>, StoreError> {
        Ok(self.state.read().unwrap().bookings.get(&id).cloned())
    }

    async fn find_ticket_by_order_id(
        &self,
        order_id: &ChargeId,
    ) -> Result<Option<StoredTicket>, StoreError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .tickets
            .values()
            .find(|stored| &stored.ticket.order_id == order_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CinemaSlot, Money, Movie, UserType};

    fn sample_record(seats: &[&str]) -> BookingRecord {
        BookingRecord {
            city: "Mexico City".to_string(),
            user_type: UserType::Normal,
            total_amount: Money::from_cents(25000),
            cinema: CinemaSlot {
                name: "Plaza Central".to_string(),
                room: "2".to_string(),
                seats: seats.iter().map(|s| s.to_string()).collect(),
            },
            movie: Movie {
                title: "Dune".to_string(),
                format: "IMAX".to_string(),
            },
            schedule: "2024-05-01T19:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_booking() {
        let store = InMemoryBookingStore::new();

        let stored = store.insert_booking(sample_record(&["A1", "A2"])).await.unwrap();
        assert_eq!(store.booking_count(), 1);

        let found = store.find_booking_by_id(stored.id).await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn test_find_booking_unknown_id() {
        let store = InMemoryBookingStore::new();
        let found = store.find_booking_by_id(BookingId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_and_find_ticket_by_order_id() {
        let store = InMemoryBookingStore::new();
        let ticket = TicketRecord::issue(
            sample_record(&["A1"]),
            ChargeId::new("CH-0001"),
            "desc".to_string(),
        );

        store.insert_ticket(ticket).await.unwrap();
        assert_eq!(store.ticket_count(), 1);

        let found = store
            .find_ticket_by_order_id(&ChargeId::new("CH-0001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.ticket.order_id.as_str(), "CH-0001");

        let missing = store
            .find_ticket_by_order_id(&ChargeId::new("CH-0002"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_overlapping_seats_conflict() {
        let store = InMemoryBookingStore::new();
        store.insert_booking(sample_record(&["A1", "A2"])).await.unwrap();

        let err = store
            .insert_booking(sample_record(&["A2", "A3"]))
            .await
            .unwrap_err();
        match err {
            StoreError::SeatConflict { seats, .. } => assert_eq!(seats, vec!["A2"]),
            other => panic!("expected seat conflict, got {other:?}"),
        }
        assert_eq!(store.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_same_seats_different_schedule_do_not_conflict() {
        let store = InMemoryBookingStore::new();
        store.insert_booking(sample_record(&["A1"])).await.unwrap();

        let mut other = sample_record(&["A1"]);
        other.schedule = "2024-05-01T22:00".to_string();
        assert!(store.insert_booking(other).await.is_ok());
        assert_eq!(store.booking_count(), 2);
    }

    #[tokio::test]
    async fn test_fail_on_insert_booking() {
        let store = InMemoryBookingStore::new();
        store.set_fail_on_insert_booking(true);

        let err = store.insert_booking(sample_record(&["A1"])).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_fail_on_insert_ticket() {
        let store = InMemoryBookingStore::new();
        store.set_fail_on_insert_ticket(true);

        let ticket = TicketRecord::issue(
            sample_record(&["A1"]),
            ChargeId::new("CH-0001"),
            "desc".to_string(),
        );
        let err = store.insert_ticket(ticket).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.ticket_count(), 0);
    }
}
