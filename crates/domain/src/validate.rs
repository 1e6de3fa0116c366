//! Input validation.
//!
//! One stateless [`Validator`] covers the four record shapes the system
//! accepts: user, booking, payment order, and notification payload.
//! Validation is pure and idempotent; it either produces a normalized
//! record or the first [`ValidationError`] encountered.

use std::collections::HashSet;

use thiserror::Error;

use crate::booking::{BookingInput, BookingRequest, Movie};
use crate::money::Money;
use crate::payment::PaymentOrder;
use crate::records::NotificationPayload;
use crate::user::{CreditCard, CreditCardInput, User, UserInput};

/// A required field was missing, malformed, or out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field '{field}': {reason}")]
pub struct ValidationError {
    /// The offending field, dotted for nested fields (`credit_card.cvc`).
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validates raw inputs into normalized records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validates a raw user, normalizing whitespace on the way.
    pub fn user(&self, input: &UserInput) -> Result<User, ValidationError> {
        Ok(User {
            name: required("name", &input.name)?,
            last_name: required("last_name", &input.last_name)?,
            email: email("email", &input.email)?,
            membership: input.membership,
            credit_card: card(&input.credit_card)?,
        })
    }

    /// Validates a raw booking request.
    pub fn booking(&self, input: &BookingInput) -> Result<BookingRequest, ValidationError> {
        let seats = seats(&input.seats)?;

        if input.total_amount_cents <= 0 {
            return Err(ValidationError::new(
                "total_amount_cents",
                "amount must be positive",
            ));
        }

        Ok(BookingRequest {
            city: required("city", &input.city)?,
            cinema: required("cinema", &input.cinema)?,
            cinema_room: required("cinema_room", &input.cinema_room)?,
            movie: Movie {
                title: required("movie.title", &input.movie.title)?,
                format: required("movie.format", &input.movie.format)?,
            },
            schedule: required("schedule", &input.schedule)?,
            seats,
            total_amount: Money::from_cents(input.total_amount_cents),
        })
    }

    /// Validates a payment order submitted directly, outside the
    /// booking pipeline.
    pub fn payment(&self, order: &PaymentOrder) -> Result<(), ValidationError> {
        required("payer_name", &order.payer_name)?;
        required("currency", &order.currency)?;
        if !order.amount.is_positive() {
            return Err(ValidationError::new("amount", "amount must be positive"));
        }
        card(&CreditCardInput {
            number: order.card.number.clone(),
            cvc: order.card.cvc.clone(),
            exp_month: order.card.exp_month,
            exp_year: order.card.exp_year,
        })?;
        Ok(())
    }

    /// Validates a notification payload submitted directly.
    pub fn notification(&self, payload: &NotificationPayload) -> Result<(), ValidationError> {
        required("user.name", &payload.user.name)?;
        email("user.email", &payload.user.email)?;
        if payload.ticket.order_id.as_str().is_empty() {
            return Err(ValidationError::new("order_id", "must not be empty"));
        }
        Ok(())
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = required(field, value)?;
    let malformed = || ValidationError::new(field, "malformed email address");

    let (local, host) = trimmed.split_once('@').ok_or_else(malformed)?;
    if local.is_empty() || host.is_empty() || !host.contains('.') || host.ends_with('.') {
        return Err(malformed());
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(malformed());
    }
    Ok(trimmed)
}

fn card(input: &CreditCardInput) -> Result<CreditCard, ValidationError> {
    let number: String = input.number.chars().filter(|c| !c.is_whitespace()).collect();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "credit_card.number",
            "card number must be digits only",
        ));
    }

    let cvc = input.cvc.trim();
    if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "credit_card.cvc",
            "security code must be 3 or 4 digits",
        ));
    }

    if !(1..=12).contains(&input.exp_month) {
        return Err(ValidationError::new(
            "credit_card.exp_month",
            "expiry month must be between 1 and 12",
        ));
    }

    if !(1000..=9999).contains(&input.exp_year) {
        return Err(ValidationError::new(
            "credit_card.exp_year",
            "expiry year must be four digits",
        ));
    }

    Ok(CreditCard {
        number,
        cvc: cvc.to_string(),
        exp_month: input.exp_month,
        exp_year: input.exp_year,
    })
}

fn seats(input: &[String]) -> Result<Vec<String>, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::new("seats", "seat set must not be empty"));
    }

    let mut seen = HashSet::new();
    let mut seats = Vec::with_capacity(input.len());
    for seat in input {
        let seat = required("seats", seat)?;
        if !seen.insert(seat.clone()) {
            return Err(ValidationError::new(
                "seats",
                format!("duplicate seat '{seat}' in request"),
            ));
        }
        seats.push(seat);
    }
    Ok(seats)
}
