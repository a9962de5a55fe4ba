use crate::manuscript::Manuscript;
use crate::plan::PlanFeatures;
use crate::report::AnalysisReport;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis engine failure: {0}")]
    Engine(String),
}

/// External analysis collaborator. Duration and report content are entirely
/// its own; it truncates input at the plan's word limit.
#[async_trait::async_trait]
pub trait AnalysisEnginePort: Send + Sync {
    async fn analyze(
        &self,
        manuscript: &Manuscript,
        features: &PlanFeatures,
    ) -> Result<AnalysisReport, AnalysisError>;
}
