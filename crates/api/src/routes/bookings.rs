//! Booking pipeline and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::BookingId;
use domain::{BookingInput, ChargeId, StoredBooking, StoredTicket, TicketRecord, UserInput};
use fulfillment::{BookingOrchestrator, BookingStore, NotificationDispatcher, PaymentGateway};
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<P, S, N>
where
    P: PaymentGateway,
    S: BookingStore,
    N: NotificationDispatcher,
{
    pub orchestrator: BookingOrchestrator<P, S, N>,
}

#[derive(Deserialize)]
pub struct PlaceBookingRequest {
    pub user: UserInput,
    pub booking: BookingInput,
}

/// POST /bookings — run the fulfillment pipeline for a booking.
#[tracing::instrument(skip(state, req))]
pub async fn place<P, S, N>(
    State(state): State<Arc<AppState<P, S, N>>>,
    Json(req): Json<PlaceBookingRequest>,
) -> Result<(StatusCode, Json<TicketRecord>), ApiError>
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let ticket = state
        .orchestrator
        .place_booking(req.user, req.booking)
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /bookings/:id — load a stored booking by its identifier.
#[tracing::instrument(skip(state))]
pub async fn get_booking<P, S, N>(
    State(state): State<Arc<AppState<P, S, N>>>,
    Path(id): Path<String>,
) -> Result<Json<StoredBooking>, ApiError>
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid booking id: {e}")))?;
    let booking = state
        .orchestrator
        .find_booking(BookingId::from_uuid(uuid))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Booking {id} not found")))?;
    Ok(Json(booking))
}

/// GET /tickets/:order_id — load a stored ticket by its order
/// (charge) identifier.
#[tracing::instrument(skip(state))]
pub async fn get_ticket<P, S, N>(
    State(state): State<Arc<AppState<P, S, N>>>,
    Path(order_id): Path<String>,
) -> Result<Json<StoredTicket>, ApiError>
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let ticket = state
        .orchestrator
        .find_ticket(&ChargeId::new(order_id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ticket for order {order_id} not found")))?;
    Ok(Json(ticket))
}
