//! Manuscript domain models.

mod badge;
mod error;
mod intake;
mod metadata;
mod record;
mod status;

pub use badge::{status_badge, BadgeTone, StatusBadge};
pub use error::LifecycleError;
pub use intake::{
    validate_upload, FileFormat, PreflightChecks, UploadCandidate, UploadValidationError,
};
pub use metadata::{Genre, PublicationStatus};
pub use record::{Manuscript, ManuscriptDetails};
pub use status::ManuscriptStatus;
