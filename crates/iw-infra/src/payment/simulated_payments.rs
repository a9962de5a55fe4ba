use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use iw_core::config::SimulationConfig;
use iw_core::ids::TransactionId;
use iw_core::plan::PlanFeatures;
use iw_core::ports::{BillingDetails, PaymentError, PaymentPort, PaymentReceipt};

/// Card number the simulated processor always declines, for exercising the
/// failure path from the payment form.
pub const DECLINE_CARD: &str = "4000000000000002";

/// Simulated payment processor.
///
/// Charges always succeed after the configured delay, except for the
/// well-known decline card. No billing data leaves the process.
pub struct SimulatedPaymentProcessor {
    delay: Duration,
}

impl SimulatedPaymentProcessor {
    pub fn new(simulation: &SimulationConfig) -> Self {
        Self {
            delay: Duration::from_millis(simulation.payment_delay_ms),
        }
    }
}

#[async_trait]
impl PaymentPort for SimulatedPaymentProcessor {
    async fn charge(
        &self,
        features: &PlanFeatures,
        billing: &BillingDetails,
    ) -> Result<PaymentReceipt, PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let digits: String = billing
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits == DECLINE_CARD {
            debug!(plan = %features.id, "simulated decline");
            return Err(PaymentError::Declined("card was declined".into()));
        }
        if digits.len() < 12 {
            return Err(PaymentError::Declined("card number is incomplete".into()));
        }

        let receipt = PaymentReceipt {
            transaction_id: TransactionId::new(),
            amount_usd_cents: features.price_usd_cents,
        };
        info!(
            plan = %features.id,
            transaction_id = %receipt.transaction_id,
            amount_usd_cents = receipt.amount_usd_cents,
            "simulated charge"
        );
        Ok(receipt)
    }
}
