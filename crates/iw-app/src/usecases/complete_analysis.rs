use std::sync::Arc;

use tracing::info;

use iw_core::ids::ManuscriptId;
use iw_core::manuscript::LifecycleError;
use iw_core::ports::{
    ClockPort, ManuscriptRepositoryPort, ReportStorePort, RepositoryError,
};
use iw_core::report::{AnalysisReport, ReportAccessToken};

use crate::usecases::internal::{ConcurrentTransitionError, TransitionGuard};

#[derive(Debug, thiserror::Error)]
pub enum CompleteAnalysisError {
    #[error("manuscript not found")]
    NotFound,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Concurrent(#[from] ConcurrentTransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for recording a finished analysis run.
/// 记录分析完成的用例。
///
/// Attaches the report, stamps `last_analyzed`, and issues a fresh report
/// link; whatever link the manuscript held before is retired in the same
/// step.
pub struct CompleteAnalysis {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    reports: Arc<dyn ReportStorePort>,
    clock: Arc<dyn ClockPort>,
    guard: TransitionGuard,
    link_ttl_days: i64,
}

impl CompleteAnalysis {
    pub fn from_ports(
        repo: Arc<dyn ManuscriptRepositoryPort>,
        reports: Arc<dyn ReportStorePort>,
        clock: Arc<dyn ClockPort>,
        guard: TransitionGuard,
        link_ttl_days: i64,
    ) -> Self {
        Self {
            repo,
            reports,
            clock,
            guard,
            link_ttl_days,
        }
    }

    /// Returns the freshly issued report link.
    #[tracing::instrument(
        name = "usecase.complete_analysis.execute",
        skip(self, report),
        fields(manuscript_id = %manuscript_id, analysis_id = %report.id)
    )]
    pub async fn execute(
        &self,
        manuscript_id: &ManuscriptId,
        report: AnalysisReport,
    ) -> Result<ReportAccessToken, CompleteAnalysisError> {
        let _permit = self.guard.acquire(manuscript_id)?;

        let manuscript = self
            .repo
            .get(manuscript_id)
            .await?
            .ok_or(CompleteAnalysisError::NotFound)?;

        let now = self.clock.now();
        let mut updated = manuscript;
        updated.complete_analysis(report.id.clone(), now)?;

        let token = ReportAccessToken::issue(
            report.id.clone(),
            manuscript_id.clone(),
            now,
            self.link_ttl_days,
        );
        self.reports.put_report(report).await?;
        self.reports.replace_token(token.clone()).await?;
        self.repo.update(updated).await?;

        info!(expires_at = %token.expires_at, "Analysis completed, report link issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::support::{
        fixed_now, sample_report, FixedClock, InMemoryRepo, InMemoryReports,
    };
    use chrono::Duration;
    use iw_core::manuscript::ManuscriptStatus;
    use iw_core::plan::PlanId;

    fn usecase(
        repo: Arc<InMemoryRepo>,
        reports: Arc<InMemoryReports>,
    ) -> CompleteAnalysis {
        CompleteAnalysis::from_ports(
            repo,
            reports,
            Arc::new(FixedClock(fixed_now())),
            TransitionGuard::new(),
            7,
        )
    }

    #[tokio::test]
    async fn test_complete_attaches_report_and_issues_link() {
        let repo = Arc::new(InMemoryRepo::default());
        let reports = Arc::new(InMemoryReports::default());
        let mut manuscript = repo.seed_awaiting().await;
        manuscript.begin_analysis(PlanId::Pro).unwrap();
        repo.update(manuscript.clone()).await.unwrap();

        let report = sample_report(&manuscript.id);
        let uc = usecase(repo.clone(), reports.clone());
        let token = uc.execute(&manuscript.id, report.clone()).await.unwrap();

        assert_eq!(token.expires_at, fixed_now() + Duration::days(7));
        let stored = repo.get(&manuscript.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ManuscriptStatus::InsightsUnveiled);
        assert_eq!(stored.analysis_id, Some(report.id.clone()));
        assert_eq!(stored.last_analyzed, Some(fixed_now()));
        assert!(reports.get_report(&report.id).await.unwrap().is_some());
        assert!(reports
            .find_token(&token.token)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_complete_from_awaiting_is_invalid_state() {
        let repo = Arc::new(InMemoryRepo::default());
        let reports = Arc::new(InMemoryReports::default());
        let manuscript = repo.seed_awaiting().await;

        let report = sample_report(&manuscript.id);
        let uc = usecase(repo.clone(), reports.clone());
        let err = uc.execute(&manuscript.id, report.clone()).await.unwrap_err();

        assert!(matches!(
            err,
            CompleteAnalysisError::Lifecycle(LifecycleError::InvalidState { .. })
        ));
        // nothing was stored
        assert!(reports.get_report(&report.id).await.unwrap().is_none());
        let stored = repo.get(&manuscript.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ManuscriptStatus::AwaitingWisdom);
    }

    #[tokio::test]
    async fn test_completing_a_reanalysis_replaces_the_link() {
        let repo = Arc::new(InMemoryRepo::default());
        let reports = Arc::new(InMemoryReports::default());
        let mut manuscript = repo.seed_awaiting().await;
        manuscript.begin_analysis(PlanId::Premium).unwrap();
        repo.update(manuscript.clone()).await.unwrap();

        let uc = usecase(repo.clone(), reports.clone());
        let first = uc
            .execute(&manuscript.id, sample_report(&manuscript.id))
            .await
            .unwrap();

        let mut stored = repo.get(&manuscript.id).await.unwrap().unwrap();
        stored.start_reanalysis().unwrap();
        repo.update(stored).await.unwrap();

        let second = uc
            .execute(&manuscript.id, sample_report(&manuscript.id))
            .await
            .unwrap();

        assert_ne!(first.token, second.token);
        // the old link is gone, the new one resolves
        assert!(reports.find_token(&first.token).await.unwrap().is_none());
        assert!(reports.find_token(&second.token).await.unwrap().is_some());
    }
}
