//! Booking requests and their validated forms.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Raw booking data as received from a caller, prior to validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingInput {
    pub city: String,
    pub cinema: String,
    pub cinema_room: String,
    pub movie: MovieInput,
    pub schedule: String,
    pub seats: Vec<String>,
    pub total_amount_cents: i64,
}

/// Raw movie fields, prior to validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub format: String,
}

/// A validated booking request. Only constructed by
/// [`crate::Validator::booking`].
///
/// The total amount is carried verbatim from the input; pricing
/// correctness is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub city: String,
    pub cinema: String,
    pub cinema_room: String,
    pub movie: Movie,
    pub schedule: String,
    pub seats: Vec<String>,
    pub total_amount: Money,
}

impl BookingRequest {
    /// Returns the seat list joined for display, e.g. `"A1, A2"`.
    pub fn seats_display(&self) -> String {
        self.seats.join(", ")
    }
}

/// The movie being booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats_display() {
        let booking = BookingRequest {
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
        };
        assert_eq!(booking.seats_display(), "A1, A2");
    }

    #[test]
    fn test_input_deserialization() {
        let json = r#"{
            "city": "Mexico City",
            "cinema": "Plaza Central",
            "cinema_room": "2",
            "movie": {"title": "Dune", "format": "IMAX"},
            "schedule": "2024-05-01T19:00",
            "seats": ["A1", "A2"],
            "total_amount_cents": 25000
        }"#;
        let input: BookingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.movie.title, "Dune");
        assert_eq!(input.seats.len(), 2);
        assert_eq!(input.total_amount_cents, 25000);
    }
}
