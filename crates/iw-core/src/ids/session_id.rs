use serde::{Deserialize, Serialize};

/// Upload session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

crate::ids::id_macro::impl_id!(SessionId);
