use crate::manuscript::{FileFormat, PreflightChecks, UploadCandidate};

/// What the intake collaborator learned about an accepted file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedUpload {
    pub word_count: u64,
    pub format: FileFormat,
    pub size_bytes: u64,
    pub preflight: PreflightChecks,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileIntakeError {
    #[error("file failed intake validation: {0}")]
    Validation(String),

    #[error("file could not be read")]
    Unreadable,
}

/// External file parsing collaborator. The studio itself only enforces the
/// format whitelist and size ceiling; counting words is this port's job.
#[async_trait::async_trait]
pub trait FileIntakePort: Send + Sync {
    async fn validate_and_parse(
        &self,
        upload: &UploadCandidate,
    ) -> Result<ParsedUpload, FileIntakeError>;
}
