use std::sync::Arc;

use tracing::info;

use iw_core::ids::ManuscriptId;
use iw_core::manuscript::{LifecycleError, Manuscript};
use iw_core::ports::{ManuscriptRepositoryPort, RepositoryError};

use crate::usecases::internal::{ConcurrentTransitionError, TransitionGuard};

#[derive(Debug, thiserror::Error)]
pub enum ReanalyzeError {
    #[error("manuscript not found")]
    NotFound,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Concurrent(#[from] ConcurrentTransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for re-running analysis on an already analyzed manuscript.
/// 重新分析的用例。
///
/// Gated by the plan allowance: free plans never re-analyze, pro gets one
/// run, premium is unlimited. The engine run itself is driven by the caller
/// once the record is back `under-scrutiny`.
pub struct ReanalyzeManuscript {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    guard: TransitionGuard,
}

impl ReanalyzeManuscript {
    pub fn from_ports(repo: Arc<dyn ManuscriptRepositoryPort>, guard: TransitionGuard) -> Self {
        Self { repo, guard }
    }

    /// Returns the updated record so the caller can hand it to the engine.
    #[tracing::instrument(
        name = "usecase.reanalyze_manuscript.execute",
        skip(self),
        fields(manuscript_id = %manuscript_id)
    )]
    pub async fn execute(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<Manuscript, ReanalyzeError> {
        let _permit = self.guard.acquire(manuscript_id)?;

        let manuscript = self
            .repo
            .get(manuscript_id)
            .await?
            .ok_or(ReanalyzeError::NotFound)?;

        let mut updated = manuscript;
        updated.start_reanalysis()?;
        self.repo.update(updated.clone()).await?;

        info!(runs_used = updated.reanalyses_used, "Re-analysis started");
        Ok(updated)
    }
}
