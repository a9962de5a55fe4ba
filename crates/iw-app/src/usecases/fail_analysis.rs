use std::sync::Arc;

use tracing::warn;

use iw_core::ids::ManuscriptId;
use iw_core::manuscript::LifecycleError;
use iw_core::ports::{ManuscriptRepositoryPort, RepositoryError};

use crate::usecases::internal::{ConcurrentTransitionError, TransitionGuard};

#[derive(Debug, thiserror::Error)]
pub enum FailAnalysisError {
    #[error("manuscript not found")]
    NotFound,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Concurrent(#[from] ConcurrentTransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for abandoning a failed analysis run.
///
/// The record reverts to `awaiting-wisdom`; `last_analyzed` is untouched
/// since only successful completions move it.
pub struct FailAnalysis {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    guard: TransitionGuard,
}

impl FailAnalysis {
    pub fn from_ports(repo: Arc<dyn ManuscriptRepositoryPort>, guard: TransitionGuard) -> Self {
        Self { repo, guard }
    }

    #[tracing::instrument(
        name = "usecase.fail_analysis.execute",
        skip(self),
        fields(manuscript_id = %manuscript_id)
    )]
    pub async fn execute(
        &self,
        manuscript_id: &ManuscriptId,
        reason: &str,
    ) -> Result<(), FailAnalysisError> {
        let _permit = self.guard.acquire(manuscript_id)?;

        let manuscript = self
            .repo
            .get(manuscript_id)
            .await?
            .ok_or(FailAnalysisError::NotFound)?;

        let mut updated = manuscript;
        updated.fail_analysis()?;
        self.repo.update(updated).await?;

        warn!(reason, "Analysis run abandoned");
        Ok(())
    }
}
