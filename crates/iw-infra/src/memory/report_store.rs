use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use iw_core::ids::{AnalysisId, ManuscriptId};
use iw_core::ports::{ReportStorePort, RepositoryError};
use iw_core::report::{AnalysisReport, ReportAccessToken};

/// In-memory report and report-link store.
///
/// One token per manuscript. `replace_token` retires the previous value and
/// installs the new one under a single write lock, so a concurrent lookup
/// observes the old token or nothing; there is no window where both, or a
/// half-written record, are visible.
#[derive(Default)]
pub struct MemoryReportStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    reports: HashMap<AnalysisId, AnalysisReport>,
    tokens: HashMap<ManuscriptId, ReportAccessToken>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStorePort for MemoryReportStore {
    async fn put_report(&self, report: AnalysisReport) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.reports.insert(report.id.clone(), report);
        Ok(())
    }

    async fn get_report(
        &self,
        id: &AnalysisId,
    ) -> Result<Option<AnalysisReport>, RepositoryError> {
        Ok(self.inner.read().await.reports.get(id).cloned())
    }

    async fn find_token(
        &self,
        token: &str,
    ) -> Result<Option<ReportAccessToken>, RepositoryError> {
        Ok(self
            .inner
            .read()
            .await
            .tokens
            .values()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn token_for_manuscript(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<Option<ReportAccessToken>, RepositoryError> {
        Ok(self.inner.read().await.tokens.get(manuscript_id).cloned())
    }

    async fn replace_token(&self, token: ReportAccessToken) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.tokens.insert(token.manuscript_id.clone(), token);
        Ok(())
    }

    async fn delete_for_manuscript(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        inner
            .reports
            .retain(|_, report| &report.manuscript_id != manuscript_id);
        inner.tokens.remove(manuscript_id);
        Ok(())
    }
}
