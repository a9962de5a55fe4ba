//! Upload session state.
//!
//! 上传会话状态。

use serde::{Deserialize, Serialize};

use crate::ids::{SessionId, TransactionId};
use crate::manuscript::{FileFormat, Genre, ManuscriptDetails, PreflightChecks, PublicationStatus};
use crate::plan::PlanId;
use crate::session::UploadSessionError;

/// Steps of the upload wizard, in order.
///
/// 上传向导步骤，按顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadStep {
    FileSelect,
    Details,
    PlanSelect,
    /// Only visited when the chosen plan has a price.
    Payment,
    /// Terminal until the analysis collaborator finishes.
    Processing,
    Done,
}

impl UploadStep {
    fn position(self) -> u8 {
        match self {
            Self::FileSelect => 0,
            Self::Details => 1,
            Self::PlanSelect => 2,
            Self::Payment => 3,
            Self::Processing => 4,
            Self::Done => 5,
        }
    }

    /// Backward navigation: any earlier step, except while processing.
    pub fn allows_back_to(self, target: UploadStep) -> bool {
        self != Self::Processing && target.position() < self.position()
    }
}

/// A file that already passed intake validation and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedFile {
    pub file_name: String,
    pub format: FileFormat,
    pub size_bytes: u64,
    /// Counted by the intake collaborator, editable on the details step.
    pub word_count: u64,
    pub preflight: PreflightChecks,
}

impl AcceptedFile {
    /// File name without its extension, used to pre-fill the title.
    pub fn title_suggestion(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }
}

/// Everything gathered so far. Fields persist across backward navigation;
/// nothing already validated is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadDraft {
    pub file: Option<AcceptedFile>,
    pub word_count: u64,
    pub author_name: String,
    pub manuscript_title: String,
    pub contact_email: String,
    pub genre: Option<Genre>,
    pub publication_status: Option<PublicationStatus>,
    pub plan: Option<PlanId>,
    /// Word count over the chosen plan's limit. A warning, never a blocker;
    /// the engine truncates at the limit.
    pub word_limit_exceeded: bool,
    pub transaction_id: Option<TransactionId>,
}

impl UploadDraft {
    /// The validated details, once the details step has been passed.
    pub fn details(&self) -> Option<ManuscriptDetails> {
        Some(ManuscriptDetails {
            title: self.manuscript_title.clone(),
            author: self.author_name.clone(),
            contact_email: self.contact_email.clone(),
            genre: self.genre?,
            publication_status: self.publication_status?,
        })
    }
}

/// One upload-to-analysis flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSession {
    pub id: SessionId,
    pub step: UploadStep,
    pub draft: UploadDraft,
    pub error: Option<UploadSessionError>,
}

impl UploadSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            step: UploadStep::FileSelect,
            draft: UploadDraft::default(),
            error: None,
        }
    }
}
