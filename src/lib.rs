//! Inkwise Library
//!
//! The composed manuscript analysis studio: domain (`iw-core`), use cases
//! (`iw-app`) and the simulated collaborators (`iw-infra`) wired into one
//! client-side facade. There is no backend; everything lives for the
//! session.

use std::sync::Arc;

use tracing::debug;

use iw_app::{
    BeginAnalysis, CompleteAnalysis, CompleteAnalysisError, DeleteManuscript,
    DeleteManuscriptError, FailAnalysis, FailAnalysisError, ListBookshelf, ReanalyzeError,
    ReanalyzeManuscript, RegenerateLinkError, RegenerateReportLink, ResolveReport,
    ResolveReportError, ResolvedReport, RunUploadSession, TransitionGuard, UploadManuscript,
    UploadSessionPorts,
};
use iw_core::bookshelf::{BookshelfFilter, BookshelfSort};
use iw_core::ids::ManuscriptId;
use iw_core::manuscript::Manuscript;
use iw_core::plan::PlanCatalog;
use iw_core::ports::{
    AnalysisEnginePort, AnalysisError, ClockPort, FileIntakePort, ManuscriptRepositoryPort,
    PaymentPort, ReportStorePort, RepositoryError,
};
use iw_core::report::ReportAccessToken;
use iw_core::StudioConfig;
use iw_infra::{
    MemoryManuscriptStore, MemoryReportStore, SimulatedAnalysisEngine, SimulatedFileIntake,
    SimulatedPaymentProcessor, SystemClock,
};

// Re-export the vocabulary the embedding front-end works with
pub use iw_core::bookshelf;
pub use iw_core::manuscript::{status_badge, ManuscriptStatus};
pub use iw_core::plan::{PlanFeatures, PlanId};
pub use iw_core::session::{UploadSession, UploadStep};

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error(transparent)]
    Reanalyze(#[from] ReanalyzeError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Complete(#[from] CompleteAnalysisError),

    #[error(transparent)]
    Fail(#[from] FailAnalysisError),

    #[error(transparent)]
    Delete(#[from] DeleteManuscriptError),

    #[error(transparent)]
    Resolve(#[from] ResolveReportError),

    #[error(transparent)]
    Regenerate(#[from] RegenerateLinkError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Studio dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no hidden logic. Use
/// [`Studio::with_simulated_collaborators`] for the shipped wiring.
pub struct StudioDeps {
    pub repo: Arc<dyn ManuscriptRepositoryPort>,
    pub reports: Arc<dyn ReportStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub intake: Arc<dyn FileIntakePort>,
    pub engine: Arc<dyn AnalysisEnginePort>,
    pub payments: Arc<dyn PaymentPort>,
}

/// The composed studio.
pub struct Studio {
    config: StudioConfig,
    repo: Arc<dyn ManuscriptRepositoryPort>,
    intake: Arc<dyn FileIntakePort>,
    engine: Arc<dyn AnalysisEnginePort>,

    upload: Arc<UploadManuscript>,
    begin: Arc<BeginAnalysis>,
    complete: Arc<CompleteAnalysis>,
    fail: Arc<FailAnalysis>,
    list: ListBookshelf,
    delete: DeleteManuscript,
    reanalyze: ReanalyzeManuscript,
    resolve: ResolveReport,
    regenerate: RegenerateReportLink,
}

impl Studio {
    pub fn from_deps(config: StudioConfig, deps: StudioDeps) -> Self {
        let guard = TransitionGuard::new();

        let upload = Arc::new(UploadManuscript::from_ports(
            deps.repo.clone(),
            deps.intake.clone(),
            deps.clock.clone(),
            config.upload.max_file_size_bytes,
        ));
        let begin = Arc::new(BeginAnalysis::from_ports(
            deps.repo.clone(),
            deps.payments.clone(),
            guard.clone(),
        ));
        let complete = Arc::new(CompleteAnalysis::from_ports(
            deps.repo.clone(),
            deps.reports.clone(),
            deps.clock.clone(),
            guard.clone(),
            config.report_link.ttl_days,
        ));
        let fail = Arc::new(FailAnalysis::from_ports(deps.repo.clone(), guard.clone()));

        let studio = Self {
            list: ListBookshelf::from_ports(deps.repo.clone()),
            delete: DeleteManuscript::from_ports(
                deps.repo.clone(),
                deps.reports.clone(),
                guard.clone(),
            ),
            reanalyze: ReanalyzeManuscript::from_ports(deps.repo.clone(), guard),
            resolve: ResolveReport::from_ports(
                deps.repo.clone(),
                deps.reports.clone(),
                deps.clock.clone(),
            ),
            regenerate: RegenerateReportLink::from_ports(
                deps.reports,
                deps.clock,
                config.report_link.ttl_days,
            ),
            upload,
            begin,
            complete,
            fail,
            repo: deps.repo,
            intake: deps.intake,
            engine: deps.engine,
            config,
        };
        debug!("studio wired");
        studio
    }

    /// The shipped configuration: in-memory stores and the simulated
    /// intake, engine and payment collaborators.
    pub fn with_simulated_collaborators(config: StudioConfig) -> Self {
        let deps = StudioDeps {
            repo: Arc::new(MemoryManuscriptStore::new()),
            reports: Arc::new(MemoryReportStore::new()),
            clock: Arc::new(SystemClock),
            intake: Arc::new(SimulatedFileIntake::new(&config.simulation)),
            engine: Arc::new(SimulatedAnalysisEngine::new(&config.simulation)),
            payments: Arc::new(SimulatedPaymentProcessor::new(&config.simulation)),
        };
        Self::from_deps(config, deps)
    }

    /// A fresh upload wizard.
    pub fn new_upload_session(&self) -> Arc<RunUploadSession> {
        RunUploadSession::new(
            UploadSessionPorts {
                repo: self.repo.clone(),
                intake: self.intake.clone(),
                engine: self.engine.clone(),
                upload: self.upload.clone(),
                begin: self.begin.clone(),
                complete: self.complete.clone(),
                fail: self.fail.clone(),
            },
            &self.config,
        )
    }

    pub async fn bookshelf(
        &self,
        filter: &BookshelfFilter,
        sort: BookshelfSort,
    ) -> Result<Vec<Manuscript>, StudioError> {
        Ok(self.list.execute(filter, sort).await?)
    }

    pub async fn delete_manuscript(&self, id: &ManuscriptId) -> Result<(), StudioError> {
        Ok(self.delete.execute(id).await?)
    }

    /// Full re-analysis: entitlement-gated transition, engine run, and
    /// completion with a fresh report link. A failed run reverts the record
    /// and surfaces the engine error.
    pub async fn reanalyze_manuscript(
        &self,
        id: &ManuscriptId,
    ) -> Result<ReportAccessToken, StudioError> {
        let manuscript = self.reanalyze.execute(id).await?;
        let Some(plan) = manuscript.plan else {
            return Err(ReanalyzeError::Lifecycle(
                iw_core::manuscript::LifecycleError::MissingPlan,
            )
            .into());
        };

        match self.engine.analyze(&manuscript, PlanCatalog::get(plan)).await {
            Ok(report) => Ok(self.complete.execute(id, report).await?),
            Err(e) => {
                self.fail.execute(id, &e.to_string()).await?;
                Err(e.into())
            }
        }
    }

    pub async fn resolve_report(&self, token: &str) -> Result<ResolvedReport, StudioError> {
        Ok(self.resolve.execute(token).await?)
    }

    pub async fn regenerate_report_link(
        &self,
        id: &ManuscriptId,
    ) -> Result<ReportAccessToken, StudioError> {
        Ok(self.regenerate.execute(id).await?)
    }
}
