use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier for a persisted booking record.
///
/// Wraps a UUID to keep booking identifiers from being mixed up with
/// ticket identifiers or gateway-assigned charge identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random booking ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a booking ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BookingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<BookingId> for Uuid {
    fn from(id: BookingId) -> Self {
        id.0
    }
}

/// Store-assigned identifier for a persisted ticket record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Creates a new random ticket ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ticket ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TicketId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<TicketId> for Uuid {
    fn from(id: TicketId) -> Self {
        id.0
    }
}
