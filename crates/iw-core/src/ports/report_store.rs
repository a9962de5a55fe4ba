use crate::ids::{AnalysisId, ManuscriptId};
use crate::ports::errors::RepositoryError;
use crate::report::{AnalysisReport, ReportAccessToken};

/// Storage for analysis reports and their access tokens.
///
/// One token per manuscript at a time. `replace_token` retires whatever
/// token the manuscript held and installs the new one in a single atomic
/// step: a concurrent lookup sees the old token or nothing, never both and
/// never a torn record.
#[async_trait::async_trait]
pub trait ReportStorePort: Send + Sync {
    async fn put_report(&self, report: AnalysisReport) -> Result<(), RepositoryError>;
    async fn get_report(&self, id: &AnalysisId) -> Result<Option<AnalysisReport>, RepositoryError>;

    async fn find_token(&self, token: &str) -> Result<Option<ReportAccessToken>, RepositoryError>;
    async fn token_for_manuscript(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<Option<ReportAccessToken>, RepositoryError>;
    async fn replace_token(&self, token: ReportAccessToken) -> Result<(), RepositoryError>;

    /// Drop the report and token belonging to one manuscript. Idempotent.
    async fn delete_for_manuscript(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<(), RepositoryError>;
}
