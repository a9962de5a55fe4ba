use serde::{Deserialize, Serialize};

use crate::ids::TransactionId;
use crate::plan::PlanFeatures;

/// What the payment form collects. Never persisted by the studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub card_holder: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_id: TransactionId,
    pub amount_usd_cents: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment provider unavailable")]
    Unavailable,
}

/// External payment collaborator. Only consulted when the chosen plan has a
/// price; a free plan never reaches it.
#[async_trait::async_trait]
pub trait PaymentPort: Send + Sync {
    async fn charge(
        &self,
        features: &PlanFeatures,
        billing: &BillingDetails,
    ) -> Result<PaymentReceipt, PaymentError>;
}
