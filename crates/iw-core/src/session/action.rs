use serde::{Deserialize, Serialize};

use crate::plan::PlanId;
use crate::ports::BillingDetails;
use crate::report::AnalysisReport;

/// Side-effects produced by wizard transitions, executed by the
/// application layer against the ports.
///
/// 状态迁移产生的副作用，由应用层执行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UploadAction {
    /// Charge the chosen plan through the payment collaborator.
    ChargePayment { plan: PlanId, billing: BillingDetails },
    /// Move the manuscript to `under-scrutiny` and hand it to the engine.
    StartAnalysis { plan: PlanId },
    /// Record the completed run and issue a fresh report link.
    AttachReport { report: AnalysisReport },
    /// Abandon the in-flight run after an engine failure.
    AbandonAnalysis { reason: String },
}
