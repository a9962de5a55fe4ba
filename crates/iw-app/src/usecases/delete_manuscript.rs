use std::sync::Arc;

use tracing::info;

use iw_core::ids::ManuscriptId;
use iw_core::ports::{ManuscriptRepositoryPort, ReportStorePort, RepositoryError};

use crate::usecases::internal::{ConcurrentTransitionError, TransitionGuard};

#[derive(Debug, thiserror::Error)]
pub enum DeleteManuscriptError {
    #[error(transparent)]
    Concurrent(#[from] ConcurrentTransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for permanently deleting a manuscript with its report and link.
/// 删除书稿及其报告与访问链接的用例。
///
/// Permitted from any status and idempotent: deleting an id that is not on
/// file is a no-op. The transition guard still applies, so a delete can
/// never interleave with a completion on the same record.
pub struct DeleteManuscript {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    reports: Arc<dyn ReportStorePort>,
    guard: TransitionGuard,
}

impl DeleteManuscript {
    pub fn from_ports(
        repo: Arc<dyn ManuscriptRepositoryPort>,
        reports: Arc<dyn ReportStorePort>,
        guard: TransitionGuard,
    ) -> Self {
        Self {
            repo,
            reports,
            guard,
        }
    }

    #[tracing::instrument(
        name = "usecase.delete_manuscript.execute",
        skip(self),
        fields(manuscript_id = %manuscript_id)
    )]
    pub async fn execute(&self, manuscript_id: &ManuscriptId) -> Result<(), DeleteManuscriptError> {
        let _permit = self.guard.acquire(manuscript_id)?;

        // report and token first, record last; a crash in between leaves an
        // orphan record, never an orphan report
        self.reports.delete_for_manuscript(manuscript_id).await?;
        self.repo.delete(manuscript_id).await?;

        info!("Manuscript deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::support::{
        fixed_now, sample_report, InMemoryRepo, InMemoryReports,
    };
    use iw_core::plan::PlanId;
    use iw_core::report::ReportAccessToken;

    #[tokio::test]
    async fn test_delete_removes_record_report_and_token() {
        let repo = Arc::new(InMemoryRepo::default());
        let reports = Arc::new(InMemoryReports::default());
        let mut manuscript = repo.seed_awaiting().await;
        manuscript.begin_analysis(PlanId::Pro).unwrap();
        let report = sample_report(&manuscript.id);
        manuscript
            .complete_analysis(report.id.clone(), fixed_now())
            .unwrap();
        repo.update(manuscript.clone()).await.unwrap();
        reports.put_report(report.clone()).await.unwrap();
        let token = ReportAccessToken::issue(
            report.id.clone(),
            manuscript.id.clone(),
            fixed_now(),
            7,
        );
        reports.replace_token(token.clone()).await.unwrap();

        let uc = DeleteManuscript::from_ports(repo.clone(), reports.clone(), TransitionGuard::new());
        uc.execute(&manuscript.id).await.unwrap();

        assert!(repo.get(&manuscript.id).await.unwrap().is_none());
        assert!(reports.get_report(&report.id).await.unwrap().is_none());
        assert!(reports.find_token(&token.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = Arc::new(InMemoryRepo::default());
        let reports = Arc::new(InMemoryReports::default());
        let manuscript = repo.seed_awaiting().await;

        let uc = DeleteManuscript::from_ports(repo.clone(), reports, TransitionGuard::new());
        uc.execute(&manuscript.id).await.unwrap();
        // second delete of the same id is a quiet no-op
        uc.execute(&manuscript.id).await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_a_no_op() {
        let repo = Arc::new(InMemoryRepo::default());
        let reports = Arc::new(InMemoryReports::default());
        let uc = DeleteManuscript::from_ports(repo, reports, TransitionGuard::new());
        uc.execute(&ManuscriptId::from("ghost")).await.unwrap();
    }
}
