use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use iw_core::ids::{ManuscriptId, SessionId};
use iw_core::manuscript::{ManuscriptStatus, UploadCandidate};
use iw_core::plan::{PlanCatalog, PlanId};
use iw_core::ports::{
    AnalysisEnginePort, BillingDetails, FileIntakeError, FileIntakePort,
    ManuscriptRepositoryPort, RepositoryError,
};
use iw_core::session::{
    AcceptedFile, UploadAction, UploadEvent, UploadSession, UploadStateMachine, UploadStep,
};
use iw_core::StudioConfig;

use crate::usecases::{
    BeginAnalysis, BeginAnalysisError, CompleteAnalysis, CompleteAnalysisError, FailAnalysis,
    FailAnalysisError, UploadManuscript, UploadManuscriptError,
};

#[derive(Debug, thiserror::Error)]
pub enum SessionDriverError {
    #[error(transparent)]
    Intake(#[from] FileIntakeError),

    #[error(transparent)]
    Upload(#[from] UploadManuscriptError),

    #[error(transparent)]
    Begin(#[from] BeginAnalysisError),

    #[error(transparent)]
    Complete(#[from] CompleteAnalysisError),

    #[error(transparent)]
    Fail(#[from] FailAnalysisError),

    #[error("payment gate returned no receipt for a paid plan")]
    MissingReceipt,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The details form as submitted, word count override included.
#[derive(Debug, Clone)]
pub struct DetailsForm {
    pub author_name: String,
    pub manuscript_title: String,
    pub contact_email: String,
    pub genre: iw_core::manuscript::Genre,
    pub publication_status: iw_core::manuscript::PublicationStatus,
    pub word_count: Option<u64>,
}

/// Ports and use cases one session driver runs against.
///
/// Plain parameter grouping, not a builder: all fields are required.
pub struct UploadSessionPorts {
    pub repo: Arc<dyn ManuscriptRepositoryPort>,
    pub intake: Arc<dyn FileIntakePort>,
    pub engine: Arc<dyn AnalysisEnginePort>,
    pub upload: Arc<UploadManuscript>,
    pub begin: Arc<BeginAnalysis>,
    pub complete: Arc<CompleteAnalysis>,
    pub fail: Arc<FailAnalysis>,
}

/// Use case driving one upload wizard from file select to done.
/// 驱动一次上传向导的用例。
///
/// The pure step machine decides; this driver feeds it events, executes the
/// actions it emits against the ports, and owns the processing wait as an
/// abortable task. Cancelling the wait abandons the pending transition:
/// completion is never recorded afterwards.
pub struct RunUploadSession {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    intake: Arc<dyn FileIntakePort>,
    engine: Arc<dyn AnalysisEnginePort>,
    upload: Arc<UploadManuscript>,
    begin: Arc<BeginAnalysis>,
    complete: Arc<CompleteAnalysis>,
    fail: Arc<FailAnalysis>,
    max_file_size_bytes: u64,

    state: Mutex<UploadSession>,
    manuscript_id: StdMutex<Option<ManuscriptId>>,
    processing: StdMutex<Option<JoinHandle<()>>>,
}

impl RunUploadSession {
    pub fn new(ports: UploadSessionPorts, config: &StudioConfig) -> Arc<Self> {
        Arc::new(Self {
            repo: ports.repo,
            intake: ports.intake,
            engine: ports.engine,
            upload: ports.upload,
            begin: ports.begin,
            complete: ports.complete,
            fail: ports.fail,
            max_file_size_bytes: config.upload.max_file_size_bytes,
            state: Mutex::new(UploadSession::new(SessionId::new())),
            manuscript_id: StdMutex::new(None),
            processing: StdMutex::new(None),
        })
    }

    /// Snapshot of the wizard state.
    pub async fn session(&self) -> UploadSession {
        self.state.lock().await.clone()
    }

    /// The record this session created, once it exists.
    pub fn manuscript_id(&self) -> Option<ManuscriptId> {
        self.manuscript_id.lock().expect("driver poisoned").clone()
    }

    /// File-select step: acceptance checks, then the intake collaborator.
    ///
    /// A file failing the whitelist or size ceiling stays on the step with
    /// the rejection surfaced; an intake outage propagates to the caller.
    #[tracing::instrument(name = "usecase.run_upload_session.select_file", skip_all)]
    pub async fn select_file(
        self: &Arc<Self>,
        candidate: UploadCandidate,
    ) -> Result<UploadSession, SessionDriverError> {
        let event = match iw_core::manuscript::validate_upload(
            &candidate,
            self.max_file_size_bytes,
        ) {
            Err(error) => UploadEvent::FileRejected { error },
            Ok(_) => {
                let parsed = self.intake.validate_and_parse(&candidate).await?;
                UploadEvent::FileAccepted {
                    file: AcceptedFile {
                        file_name: candidate.file_name,
                        format: parsed.format,
                        size_bytes: parsed.size_bytes,
                        word_count: parsed.word_count,
                        preflight: parsed.preflight,
                    },
                }
            }
        };
        self.dispatch(event).await
    }

    pub async fn submit_details(
        self: &Arc<Self>,
        details: DetailsForm,
    ) -> Result<UploadSession, SessionDriverError> {
        self.dispatch(UploadEvent::SubmitDetails {
            author_name: details.author_name,
            manuscript_title: details.manuscript_title,
            contact_email: details.contact_email,
            genre: details.genre,
            publication_status: details.publication_status,
            word_count: details.word_count,
        })
        .await
    }

    pub async fn choose_plan(
        self: &Arc<Self>,
        plan: PlanId,
    ) -> Result<UploadSession, SessionDriverError> {
        self.dispatch(UploadEvent::ChoosePlan { plan }).await
    }

    pub async fn confirm_plan(self: &Arc<Self>) -> Result<UploadSession, SessionDriverError> {
        self.dispatch(UploadEvent::ConfirmPlan).await
    }

    pub async fn submit_payment(
        self: &Arc<Self>,
        billing: BillingDetails,
    ) -> Result<UploadSession, SessionDriverError> {
        self.dispatch(UploadEvent::SubmitPayment { billing }).await
    }

    pub async fn back(
        self: &Arc<Self>,
        to: UploadStep,
    ) -> Result<UploadSession, SessionDriverError> {
        self.dispatch(UploadEvent::Back { to }).await
    }

    /// Abandon the processing wait. The in-flight run is dropped where it
    /// stands; completion is never recorded afterwards.
    pub fn cancel(&self) {
        if let Some(handle) = self.processing.lock().expect("driver poisoned").take() {
            handle.abort();
            info!("Processing wait cancelled, pending transition abandoned");
        }
    }

    /// Wait for the processing task, if one is running. Test and facade
    /// convenience; the UI observes the session snapshot instead.
    pub async fn await_processing(&self) {
        let handle = self.processing.lock().expect("driver poisoned").take();
        if let Some(handle) = handle {
            // a cancelled task surfaces as a JoinError we deliberately drop
            let _ = handle.await;
        }
    }

    async fn dispatch(
        self: &Arc<Self>,
        event: UploadEvent,
    ) -> Result<UploadSession, SessionDriverError> {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let actions = {
                let mut state = self.state.lock().await;
                let (next, actions) = UploadStateMachine::transition(state.clone(), event);
                *state = next;
                actions
            };
            for action in actions {
                if let Some(follow_up) = self.perform(action).await? {
                    queue.push_back(follow_up);
                }
            }
        }
        Ok(self.session().await)
    }

    async fn perform(
        self: &Arc<Self>,
        action: UploadAction,
    ) -> Result<Option<UploadEvent>, SessionDriverError> {
        match action {
            UploadAction::ChargePayment { plan, billing } => {
                let id = self.ensure_record().await?;
                match self.begin.execute(&id, plan, Some(&billing)).await {
                    Ok(receipt) => {
                        let receipt = receipt.ok_or(SessionDriverError::MissingReceipt)?;
                        Ok(Some(UploadEvent::PaymentSucceeded {
                            transaction_id: receipt.transaction_id,
                        }))
                    }
                    Err(BeginAnalysisError::Payment(declined)) => {
                        Ok(Some(UploadEvent::PaymentFailed {
                            reason: declined.to_string(),
                        }))
                    }
                    Err(other) => Err(other.into()),
                }
            }

            UploadAction::StartAnalysis { plan } => {
                let id = self.ensure_record().await?;
                let manuscript = self
                    .repo
                    .get(&id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                // the free path reaches processing without a payment stop,
                // so the record has not transitioned yet
                if manuscript.status == ManuscriptStatus::AwaitingWisdom {
                    self.begin.execute(&id, plan, None).await?;
                }
                self.spawn_processing(id, plan);
                Ok(None)
            }

            UploadAction::AttachReport { report } => {
                let id = self.ensure_record().await?;
                self.complete.execute(&id, report).await?;
                Ok(None)
            }

            UploadAction::AbandonAnalysis { reason } => {
                let id = self.ensure_record().await?;
                self.fail.execute(&id, &reason).await?;
                Ok(None)
            }
        }
    }

    /// Mint the manuscript record on first need, from the validated draft.
    async fn ensure_record(&self) -> Result<ManuscriptId, SessionDriverError> {
        if let Some(id) = self.manuscript_id() {
            return Ok(id);
        }
        let draft = self.state.lock().await.draft.clone();
        let manuscript = self.upload.from_draft(&draft).await?;
        let id = manuscript.id;
        *self.manuscript_id.lock().expect("driver poisoned") = Some(id.clone());
        Ok(id)
    }

    fn spawn_processing(self: &Arc<Self>, manuscript_id: ManuscriptId, plan: PlanId) {
        let driver = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let event = driver.run_engine(&manuscript_id, plan).await;
            if let Err(e) = driver.dispatch(event).await {
                error!(error = %e, "processing completion could not be recorded");
            }
        });
        *self.processing.lock().expect("driver poisoned") = Some(handle);
    }

    /// The non-interactive wait on the analysis collaborator.
    async fn run_engine(&self, manuscript_id: &ManuscriptId, plan: PlanId) -> UploadEvent {
        let manuscript = match self.repo.get(manuscript_id).await {
            Ok(Some(manuscript)) => manuscript,
            Ok(None) => {
                return UploadEvent::AnalysisFailed {
                    reason: "manuscript disappeared mid-run".into(),
                }
            }
            Err(e) => {
                return UploadEvent::AnalysisFailed {
                    reason: e.to_string(),
                }
            }
        };

        match self
            .engine
            .analyze(&manuscript, PlanCatalog::get(plan))
            .await
        {
            Ok(report) => UploadEvent::AnalysisSucceeded { report },
            Err(e) => UploadEvent::AnalysisFailed {
                reason: e.to_string(),
            },
        }
    }
}
