use std::sync::Arc;

use tracing::info;

use iw_core::manuscript::{
    validate_upload, Manuscript, ManuscriptDetails, UploadCandidate, UploadValidationError,
};
use iw_core::ports::{
    ClockPort, FileIntakeError, FileIntakePort, ManuscriptRepositoryPort, RepositoryError,
};
use iw_core::session::UploadDraft;

#[derive(Debug, thiserror::Error)]
pub enum UploadManuscriptError {
    #[error(transparent)]
    Validation(#[from] UploadValidationError),

    #[error(transparent)]
    Intake(#[from] FileIntakeError),

    #[error("upload draft is missing its file or details")]
    IncompleteDraft,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for creating a manuscript record from an upload.
/// 从上传文件创建书稿记录的用例。
///
/// Acceptance checks run first; a rejected file creates nothing.
pub struct UploadManuscript {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    intake: Arc<dyn FileIntakePort>,
    clock: Arc<dyn ClockPort>,
    max_file_size_bytes: u64,
}

impl UploadManuscript {
    pub fn from_ports(
        repo: Arc<dyn ManuscriptRepositoryPort>,
        intake: Arc<dyn FileIntakePort>,
        clock: Arc<dyn ClockPort>,
        max_file_size_bytes: u64,
    ) -> Self {
        Self {
            repo,
            intake,
            clock,
            max_file_size_bytes,
        }
    }

    /// Validate, parse and mint a fresh record in `awaiting-wisdom`.
    #[tracing::instrument(
        name = "usecase.upload_manuscript.execute",
        skip(self, details),
        fields(file_name = %candidate.file_name)
    )]
    pub async fn execute(
        &self,
        candidate: &UploadCandidate,
        details: ManuscriptDetails,
    ) -> Result<Manuscript, UploadManuscriptError> {
        validate_upload(candidate, self.max_file_size_bytes)?;
        let parsed = self.intake.validate_and_parse(candidate).await?;

        let manuscript = Manuscript::from_upload(
            details,
            parsed.word_count,
            parsed.size_bytes,
            parsed.format,
            self.clock.now(),
        );
        self.repo.insert(manuscript.clone()).await?;

        info!(manuscript_id = %manuscript.id, word_count = manuscript.word_count, "Manuscript record created");
        Ok(manuscript)
    }

    /// Mint a record from a wizard draft whose file already went through
    /// intake; no second parse.
    #[tracing::instrument(name = "usecase.upload_manuscript.from_draft", skip_all)]
    pub async fn from_draft(
        &self,
        draft: &UploadDraft,
    ) -> Result<Manuscript, UploadManuscriptError> {
        let details = draft.details().ok_or(UploadManuscriptError::IncompleteDraft)?;
        let file = draft
            .file
            .as_ref()
            .ok_or(UploadManuscriptError::IncompleteDraft)?;

        let manuscript = Manuscript::from_upload(
            details,
            draft.word_count,
            file.size_bytes,
            file.format,
            self.clock.now(),
        );
        self.repo.insert(manuscript.clone()).await?;

        info!(manuscript_id = %manuscript.id, "Manuscript record created from draft");
        Ok(manuscript)
    }
}
