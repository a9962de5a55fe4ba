use serde::{Deserialize, Serialize};

/// Identifier of one completed analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(String);

crate::ids::id_macro::impl_id!(AnalysisId);
