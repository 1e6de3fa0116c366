//! Payment gateway contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use domain::{ChargeId, ChargeReceipt, PaymentOrder};
use thiserror::Error;

/// Errors a charge attempt can produce.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// Card-level decline. Terminal for this attempt; the user must
    /// supply a different instrument.
    #[error("payment declined: {reason}")]
    Declined { reason: String },

    /// Gateway or transport failure. The caller may retry the whole
    /// operation; nothing is retried here.
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

/// Contract the orchestrator requires of a payment gateway.
///
/// A charge either fully succeeds with one receipt or captures
/// nothing; there are no partial charges. Charges carry no idempotency
/// key, so a charge whose outcome is unknown (e.g. a timeout) must not
/// be resubmitted blindly: doing so can double-charge the instrument.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the instrument on the order for the order's amount.
    async fn charge(&self, order: &PaymentOrder) -> Result<ChargeReceipt, PaymentError>;

    /// Looks up a previously captured charge by its identifier.
    async fn find_purchase(
        &self,
        charge_id: &ChargeId,
    ) -> Result<Option<ChargeReceipt>, PaymentError>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    purchases: HashMap<ChargeId, ChargeReceipt>,
    next_id: u32,
    decline_on_charge: bool,
    fail_on_charge: bool,
}

/// In-memory payment gateway for tests and default wiring.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to decline charge calls (card-level).
    pub fn set_decline_on_charge(&self, decline: bool) {
        self.state.write().unwrap().decline_on_charge = decline;
    }

    /// Configures the gateway to fail charge calls (infrastructure).
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.write().unwrap().fail_on_charge = fail;
    }

    /// Returns the number of captured charges.
    pub fn charge_count(&self) -> usize {
        self.state.read().unwrap().purchases.len()
    }

    /// Returns true if a charge exists with the given ID.
    pub fn has_purchase(&self, charge_id: &ChargeId) -> bool {
        self.state.read().unwrap().purchases.contains_key(charge_id)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn charge(&self, order: &PaymentOrder) -> Result<ChargeReceipt, PaymentError> {
        let mut state = self.state.write().unwrap();

        if state.decline_on_charge {
            return Err(PaymentError::Declined {
                reason: "card declined".to_string(),
            });
        }
        if state.fail_on_charge {
            return Err(PaymentError::Gateway("gateway unavailable".to_string()));
        }

        state.next_id += 1;
        let charge_id = ChargeId::new(format!("CH-{:04}", state.next_id));
        let receipt = ChargeReceipt {
            charge_id: charge_id.clone(),
            payer: order.payer_name.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            charged_at: Utc::now(),
        };
        state.purchases.insert(charge_id, receipt.clone());

        Ok(receipt)
    }

    async fn find_purchase(
        &self,
        charge_id: &ChargeId,
    ) -> Result<Option<ChargeReceipt>, PaymentError> {
        Ok(self.state.read().unwrap().purchases.get(charge_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CreditCard, Money};

    fn sample_order() -> PaymentOrder {
        PaymentOrder {
            payer_name: "Ann Lee".to_string(),
            currency: "mxn".to_string(),
            card: CreditCard {
                number: "4242424242424242".to_string(),
                cvc: "123".to_string(),
                exp_month: 12,
                exp_year: 2027,
            },
            amount: Money::from_cents(25000),
            description: "Ticket(s) for movie Dune".to_string(),
        }
    }

    #[tokio::test]
    async fn test_charge_captures_and_records_purchase() {
        let gateway = InMemoryPaymentGateway::new();

        let receipt = gateway.charge(&sample_order()).await.unwrap();
        assert!(receipt.charge_id.as_str().starts_with("CH-"));
        assert_eq!(receipt.payer, "Ann Lee");
        assert_eq!(receipt.amount, Money::from_cents(25000));
        assert_eq!(gateway.charge_count(), 1);
        assert!(gateway.has_purchase(&receipt.charge_id));

        let found = gateway.find_purchase(&receipt.charge_id).await.unwrap();
        assert_eq!(found, Some(receipt));
    }

    #[tokio::test]
    async fn test_decline_produces_declined_error() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.set_decline_on_charge(true);

        let err = gateway.charge(&sample_order()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Declined { .. }));
        assert_eq!(gateway.charge_count(), 0);
    }

    #[tokio::test]
    async fn test_infrastructure_failure_produces_gateway_error() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.set_fail_on_charge(true);

        let err = gateway.charge(&sample_order()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Gateway(_)));
        assert_eq!(gateway.charge_count(), 0);
    }

    #[tokio::test]
    async fn test_sequential_charge_ids() {
        let gateway = InMemoryPaymentGateway::new();

        let r1 = gateway.charge(&sample_order()).await.unwrap();
        let r2 = gateway.charge(&sample_order()).await.unwrap();

        assert_eq!(r1.charge_id.as_str(), "CH-0001");
        assert_eq!(r2.charge_id.as_str(), "CH-0002");
    }

    #[tokio::test]
    async fn test_find_purchase_unknown_id() {
        let gateway = InMemoryPaymentGateway::new();
        let found = gateway.find_purchase(&ChargeId::new("CH-9999")).await.unwrap();
        assert!(found.is_none());
    }
}
