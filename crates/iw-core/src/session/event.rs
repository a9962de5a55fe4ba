use serde::{Deserialize, Serialize};

use crate::ids::TransactionId;
use crate::manuscript::{Genre, PublicationStatus, UploadValidationError};
use crate::plan::PlanId;
use crate::ports::BillingDetails;
use crate::report::AnalysisReport;
use crate::session::{AcceptedFile, UploadStep};

/// Events that drive the upload wizard.
///
/// 驱动上传向导的事件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UploadEvent {
    /// Intake collaborator accepted and parsed the file.
    ///
    /// 文件通过校验并完成解析。
    FileAccepted { file: AcceptedFile },
    /// Intake rejected the file; no record is created.
    ///
    /// 文件被拒绝，不创建记录。
    FileRejected { error: UploadValidationError },
    /// Author submits the details form.
    ///
    /// 提交作品信息表单。
    SubmitDetails {
        author_name: String,
        manuscript_title: String,
        contact_email: String,
        genre: Genre,
        publication_status: PublicationStatus,
        /// Overrides the intake word count when the author edits it.
        word_count: Option<u64>,
    },
    /// A plan card was picked.
    ///
    /// 选择套餐。
    ChoosePlan { plan: PlanId },
    /// Continue out of the plan step.
    ///
    /// 确认套餐并继续。
    ConfirmPlan,
    /// Payment form submitted.
    ///
    /// 提交支付表单。
    SubmitPayment { billing: BillingDetails },
    /// Charge went through (payment collaborator callback).
    ///
    /// 支付成功（回调）。
    PaymentSucceeded { transaction_id: TransactionId },
    /// Charge failed (payment collaborator callback).
    ///
    /// 支付失败（回调）。
    PaymentFailed { reason: String },
    /// Analysis collaborator finished with a report.
    ///
    /// 分析完成（回调）。
    AnalysisSucceeded { report: AnalysisReport },
    /// Analysis collaborator failed; the run is abandoned.
    ///
    /// 分析失败（回调）。
    AnalysisFailed { reason: String },
    /// Navigate back to an earlier step.
    ///
    /// 返回较早步骤。
    Back { to: UploadStep },
}
