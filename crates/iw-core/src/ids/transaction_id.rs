use serde::{Deserialize, Serialize};

/// Identifier returned by the payment processor for one charge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

crate::ids::id_macro::impl_id!(TransactionId);
