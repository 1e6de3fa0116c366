//! Booking orchestrator coordinating the fulfillment pipeline.

use std::future::Future;
use std::time::Duration;

use common::BookingId;
use domain::{
    BookingInput, BookingRecord, ChargeId, ChargeReceipt, NotificationPayload, PaymentOrder,
    StoredBooking, StoredTicket, TicketRecord, User, UserContact, UserInput, Validator,
};
use tokio::time::timeout;

use crate::adapters::notification::{DeliveryError, DeliveryReceipt, NotificationDispatcher};
use crate::adapters::payment::PaymentGateway;
use crate::adapters::store::{BookingStore, StoreError};
use crate::error::BookingError;
use crate::phase::BookingPhase;

/// Upper bounds for the remote calls in the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Bound on a charge call.
    pub charge: Duration,
    /// Bound on each store insert.
    pub store: Duration,
    /// Bound on a notification send.
    pub notify: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            charge: Duration::from_secs(10),
            store: Duration::from_secs(5),
            notify: Duration::from_secs(3),
        }
    }
}

/// Coordinates the booking fulfillment saga.
///
/// Drives validation → charge → booking insert → ticket insert →
/// notification strictly in order, carrying each step's output into
/// the next and applying the failure policy at each transition. All
/// per-booking state lives on the calling task's stack; concurrent
/// bookings share only the adapters, which must be safe for
/// concurrent use.
pub struct BookingOrchestrator<P, S, N>
where
    P: PaymentGateway,
    S: BookingStore,
    N: NotificationDispatcher,
{
    validator: Validator,
    gateway: P,
    store: S,
    dispatcher: N,
    timeouts: Timeouts,
}

impl<P, S, N> BookingOrchestrator<P, S, N>
where
    P: PaymentGateway,
    S: BookingStore,
    N: NotificationDispatcher,
{
    /// Creates a new orchestrator with default timeouts.
    pub fn new(validator: Validator, gateway: P, store: S, dispatcher: N) -> Self {
        Self::with_timeouts(validator, gateway, store, dispatcher, Timeouts::default())
    }

    /// Creates a new orchestrator with explicit timeouts.
    pub fn with_timeouts(
        validator: Validator,
        gateway: P,
        store: S,
        dispatcher: N,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            validator,
            gateway,
            store,
            dispatcher,
            timeouts,
        }
    }

    /// Places a booking: charges the user, persists the booking and
    /// ticket, sends a confirmation, and returns the ticket.
    ///
    /// A failure before the charge aborts with nothing written. A
    /// store failure after the charge surfaces
    /// [`BookingError::ChargedNotRecorded`]; no refund is issued. A
    /// notification failure is logged and does not fail the booking.
    #[tracing::instrument(skip(self, raw_user, raw_booking))]
    pub async fn place_booking(
        &self,
        raw_user: UserInput,
        raw_booking: BookingInput,
    ) -> Result<TicketRecord, BookingError> {
        metrics::counter!("bookings_total").increment(1);
        let started = std::time::Instant::now();

        let result = self.run_pipeline(&raw_user, &raw_booking).await;

        metrics::histogram!("booking_duration_seconds").record(started.elapsed().as_secs_f64());
        match &result {
            Ok(ticket) => {
                metrics::counter!("bookings_completed").increment(1);
                tracing::info!(
                    phase = %BookingPhase::Done,
                    order_id = %ticket.order_id,
                    "booking fulfilled"
                );
            }
            Err(e) => {
                metrics::counter!("bookings_failed").increment(1);
                tracing::warn!(error = %e, "booking failed");
            }
        }
        result
    }

    async fn run_pipeline(
        &self,
        raw_user: &UserInput,
        raw_booking: &BookingInput,
    ) -> Result<TicketRecord, BookingError> {
        // 1. Validate both inputs before any side effect. Both checks
        //    are local and must succeed before proceeding.
        tracing::debug!(phase = %BookingPhase::Validating, "validating inputs");
        let user = self.validator.user(raw_user)?;
        let booking = self.validator.booking(raw_booking)?;

        // 2. Build the payment order. The amount is the booking's
        //    total, verbatim; pricing is the caller's responsibility.
        let order = PaymentOrder::for_booking(&user, &booking);

        // 3. Charge. Nothing has been written yet, so a failure here
        //    aborts with no cleanup needed.
        tracing::info!(
            phase = %BookingPhase::Charging,
            payer = %order.payer_name,
            amount = %order.amount,
            "submitting payment order"
        );
        let receipt = match timeout(self.timeouts.charge, self.gateway.charge(&order)).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => return Err(e.into()),
            // The remote outcome is unknown; without an idempotency
            // key this charge must not be resubmitted here.
            Err(_) => {
                return Err(BookingError::PaymentGateway(format!(
                    "charge timed out after {:?}, outcome unknown",
                    self.timeouts.charge
                )));
            }
        };

        // 4. Persist the booking record. The charge has already
        //    happened; a failure here strands it.
        tracing::info!(
            phase = %BookingPhase::PersistingBooking,
            charge_id = %receipt.charge_id,
            "persisting booking record"
        );
        let record = BookingRecord::project(&user, &booking);
        let stored = self
            .insert_with_charge(
                BookingPhase::PersistingBooking,
                &receipt,
                &user,
                &order,
                self.store.insert_booking(record),
            )
            .await?;

        // 5. Persist the ticket: the booking record keyed by the
        //    charge identifier, with the payment description.
        tracing::info!(
            phase = %BookingPhase::PersistingTicket,
            charge_id = %receipt.charge_id,
            "persisting ticket record"
        );
        let ticket = TicketRecord::issue(
            stored.record,
            receipt.charge_id.clone(),
            order.description.clone(),
        );
        let stored_ticket = self
            .insert_with_charge(
                BookingPhase::PersistingTicket,
                &receipt,
                &user,
                &order,
                self.store.insert_ticket(ticket),
            )
            .await?;

        // 6. Send the confirmation, best effort. The ticket exists and
        //    is returned regardless of delivery.
        tracing::debug!(phase = %BookingPhase::Notifying, "dispatching confirmation");
        let payload = NotificationPayload {
            ticket: stored_ticket.ticket.clone(),
            user: UserContact::of(&user),
        };
        match timeout(self.timeouts.notify, self.dispatcher.send(&payload)).await {
            Ok(Ok(delivery)) => {
                tracing::debug!(message_id = %delivery.message_id, "confirmation accepted");
            }
            Ok(Err(e)) => {
                metrics::counter!("notifications_failed").increment(1);
                tracing::warn!(
                    order_id = %stored_ticket.ticket.order_id,
                    error = %e,
                    "confirmation delivery failed"
                );
            }
            Err(_) => {
                metrics::counter!("notifications_failed").increment(1);
                tracing::warn!(
                    order_id = %stored_ticket.ticket.order_id,
                    "confirmation delivery timed out"
                );
            }
        }

        // 7. Return the durable artifact.
        Ok(stored_ticket.ticket)
    }

    /// Runs a store insert that happens after a successful charge,
    /// wrapping any failure as `ChargedNotRecorded` and logging the
    /// details needed for manual reconciliation.
    async fn insert_with_charge<T>(
        &self,
        phase: BookingPhase,
        receipt: &ChargeReceipt,
        user: &User,
        order: &PaymentOrder,
        insert: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, BookingError> {
        debug_assert!(phase.strands_charge());

        let outcome = match timeout(self.timeouts.store, insert).await {
            Ok(outcome) => outcome,
            Err(_) => Err(StoreError::Unavailable(format!(
                "insert timed out after {:?}",
                self.timeouts.store
            ))),
        };

        outcome.map_err(|source| {
            tracing::error!(
                phase = %phase,
                charge_id = %receipt.charge_id,
                payer = %user.email,
                booking = %order.description,
                error = %source,
                "charge captured but record not persisted, manual reconciliation required"
            );
            BookingError::ChargedNotRecorded {
                charge_id: receipt.charge_id.clone(),
                phase,
                source,
            }
        })
    }

    /// Validates and submits a standalone payment order, recording
    /// the purchase at the gateway. Backs the direct purchase entry
    /// point; not part of the booking pipeline.
    #[tracing::instrument(skip(self, order))]
    pub async fn purchase(&self, order: PaymentOrder) -> Result<ChargeReceipt, BookingError> {
        self.validator.payment(&order)?;
        match timeout(self.timeouts.charge, self.gateway.charge(&order)).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(BookingError::PaymentGateway(format!(
                "charge timed out after {:?}, outcome unknown",
                self.timeouts.charge
            ))),
        }
    }

    /// Validates and sends a standalone notification. Backs the
    /// direct email entry point; unlike pipeline notifications, a
    /// failure here is surfaced to the caller.
    #[tracing::instrument(skip(self, payload))]
    pub async fn send_confirmation(
        &self,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, BookingError> {
        self.validator.notification(payload)?;
        match timeout(self.timeouts.notify, self.dispatcher.send(payload)).await {
            Ok(outcome) => Ok(outcome?),
            Err(_) => Err(DeliveryError::Transport(format!(
                "send timed out after {:?}",
                self.timeouts.notify
            ))
            .into()),
        }
    }

    /// Looks up a stored booking by its identifier.
    pub async fn find_booking(&self, id: BookingId) -> Result<Option<StoredBooking>, BookingError> {
        Ok(self.store.find_booking_by_id(id).await?)
    }

    /// Looks up a stored ticket by its order (charge) identifier.
    pub async fn find_ticket(
        &self,
        order_id: &ChargeId,
    ) -> Result<Option<StoredTicket>, BookingError> {
        Ok(self.store.find_ticket_by_order_id(order_id).await?)
    }

    /// Looks up a captured charge by its identifier.
    pub async fn find_purchase(
        &self,
        charge_id: &ChargeId,
    ) -> Result<Option<ChargeReceipt>, BookingError> {
        Ok(self.gateway.find_purchase(charge_id).await?)
    }
}
