use std::sync::Arc;

use tracing::info;

use iw_core::ids::ManuscriptId;
use iw_core::ports::{ClockPort, ReportStorePort, RepositoryError};
use iw_core::report::{ReportAccessError, ReportAccessToken};

#[derive(Debug, thiserror::Error)]
pub enum RegenerateLinkError {
    /// The manuscript has never had a report link issued.
    #[error(transparent)]
    Access(#[from] ReportAccessError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for minting a replacement report link.
/// 重新生成报告链接的用例。
///
/// Requires possession of the manuscript, not of the old token. The store
/// swap is atomic: a resolve racing this call sees the old token or nothing,
/// never both; the retired value resolves as not found from then on.
pub struct RegenerateReportLink {
    reports: Arc<dyn ReportStorePort>,
    clock: Arc<dyn ClockPort>,
    link_ttl_days: i64,
}

impl RegenerateReportLink {
    pub fn from_ports(
        reports: Arc<dyn ReportStorePort>,
        clock: Arc<dyn ClockPort>,
        link_ttl_days: i64,
    ) -> Self {
        Self {
            reports,
            clock,
            link_ttl_days,
        }
    }

    #[tracing::instrument(
        name = "usecase.regenerate_report_link.execute",
        skip(self),
        fields(manuscript_id = %manuscript_id)
    )]
    pub async fn execute(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<ReportAccessToken, RegenerateLinkError> {
        let current = self
            .reports
            .token_for_manuscript(manuscript_id)
            .await?
            .ok_or(ReportAccessError::NotFound)?;

        let fresh = current.regenerate(self.clock.now(), self.link_ttl_days);
        self.reports.replace_token(fresh.clone()).await?;

        info!(expires_at = %fresh.expires_at, "Report link regenerated");
        Ok(fresh)
    }
}
