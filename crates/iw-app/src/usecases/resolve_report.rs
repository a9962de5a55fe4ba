use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use iw_core::ids::ManuscriptId;
use iw_core::plan::PlanId;
use iw_core::ports::{ClockPort, ManuscriptRepositoryPort, ReportStorePort, RepositoryError};
use iw_core::report::{AnalysisReport, ReportAccessError};

#[derive(Debug, thiserror::Error)]
pub enum ResolveReportError {
    #[error(transparent)]
    Access(#[from] ReportAccessError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What a shared report link renders: the report plus a summary of the
/// owning manuscript. The owning plan rides along so the view can truncate
/// the roadmap at render time.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedReport {
    pub report: AnalysisReport,
    pub manuscript: ManuscriptSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManuscriptSummary {
    pub id: ManuscriptId,
    pub title: String,
    pub author: String,
    pub word_count: u64,
    pub plan: Option<PlanId>,
    pub last_analyzed: Option<DateTime<Utc>>,
}

/// Use case for resolving a report link.
/// 解析报告链接的用例。
///
/// A token that is on file but past its expiry resolves as expired; a token
/// that was retired by regeneration resolves as not found.
pub struct ResolveReport {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    reports: Arc<dyn ReportStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl ResolveReport {
    pub fn from_ports(
        repo: Arc<dyn ManuscriptRepositoryPort>,
        reports: Arc<dyn ReportStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            repo,
            reports,
            clock,
        }
    }

    #[tracing::instrument(name = "usecase.resolve_report.execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<ResolvedReport, ResolveReportError> {
        let record = self
            .reports
            .find_token(token)
            .await?
            .ok_or(ReportAccessError::NotFound)?;

        let now = self.clock.now();
        if record.is_expired(now) {
            debug!(expired_at = %record.expires_at, "Report link expired");
            return Err(ReportAccessError::Expired.into());
        }

        let report = self
            .reports
            .get_report(&record.analysis_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::Storage("report link points at a missing report".into())
            })?;
        let manuscript = self
            .repo
            .get(&record.manuscript_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::Storage("report link points at a missing manuscript".into())
            })?;

        Ok(ResolvedReport {
            report,
            manuscript: ManuscriptSummary {
                id: manuscript.id,
                title: manuscript.title,
                author: manuscript.author,
                word_count: manuscript.word_count,
                plan: manuscript.plan,
                last_analyzed: manuscript.last_analyzed,
            },
        })
    }
}
