use serde::{Deserialize, Serialize};

use crate::manuscript::UploadValidationError;

/// Per-step failures surfaced inside the wizard.
///
/// 向导各步骤的失败原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadSessionError {
    FileRejected { error: UploadValidationError },
    AuthorNameRequired,
    TitleRequired,
    InvalidEmail,
    PlanRequired,
    PaymentDeclined { reason: String },
    AnalysisFailed { reason: String },
}
