//! Upload wizard state machine.
//!
//! Defines a pure state transition function for the upload-to-analysis flow.
//! Side effects come back as [`UploadAction`]s for the application layer to
//! execute; the machine itself touches no port.

use tracing::warn;

use crate::plan::PlanCatalog;
use crate::session::{
    UploadAction, UploadEvent, UploadSession, UploadSessionError, UploadStep,
};

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct UploadStateMachine;

impl UploadStateMachine {
    pub fn transition(
        mut session: UploadSession,
        event: UploadEvent,
    ) -> (UploadSession, Vec<UploadAction>) {
        match (session.step, event) {
            (UploadStep::FileSelect, UploadEvent::FileAccepted { file }) => {
                session.draft.word_count = file.word_count;
                if session.draft.manuscript_title.is_empty() {
                    session.draft.manuscript_title = file.title_suggestion().to_string();
                }
                session.draft.file = Some(file);
                session.step = UploadStep::Details;
                session.error = None;
                (session, Vec::new())
            }
            (UploadStep::FileSelect, UploadEvent::FileRejected { error }) => {
                session.error = Some(UploadSessionError::FileRejected { error });
                (session, Vec::new())
            }

            (
                UploadStep::Details,
                UploadEvent::SubmitDetails {
                    author_name,
                    manuscript_title,
                    contact_email,
                    genre,
                    publication_status,
                    word_count,
                },
            ) => {
                if author_name.trim().is_empty() {
                    session.error = Some(UploadSessionError::AuthorNameRequired);
                    return (session, Vec::new());
                }
                if manuscript_title.trim().is_empty() {
                    session.error = Some(UploadSessionError::TitleRequired);
                    return (session, Vec::new());
                }
                if !is_valid_email(&contact_email) {
                    session.error = Some(UploadSessionError::InvalidEmail);
                    return (session, Vec::new());
                }

                session.draft.author_name = author_name;
                session.draft.manuscript_title = manuscript_title;
                session.draft.contact_email = contact_email;
                session.draft.genre = Some(genre);
                session.draft.publication_status = Some(publication_status);
                if let Some(word_count) = word_count {
                    session.draft.word_count = word_count;
                }
                session.step = UploadStep::PlanSelect;
                session.error = None;
                (session, Vec::new())
            }

            (UploadStep::PlanSelect, UploadEvent::ChoosePlan { plan }) => {
                session.draft.plan = Some(plan);
                session.draft.word_limit_exceeded =
                    session.draft.word_count > PlanCatalog::get(plan).word_limit;
                session.error = None;
                (session, Vec::new())
            }
            (UploadStep::PlanSelect, UploadEvent::ConfirmPlan) => {
                let Some(plan) = session.draft.plan else {
                    session.error = Some(UploadSessionError::PlanRequired);
                    return (session, Vec::new());
                };
                session.error = None;
                if PlanCatalog::get(plan).is_paid() {
                    session.step = UploadStep::Payment;
                    (session, Vec::new())
                } else {
                    // free plan: no charge, straight to processing
                    session.step = UploadStep::Processing;
                    (session, vec![UploadAction::StartAnalysis { plan }])
                }
            }

            (UploadStep::Payment, UploadEvent::SubmitPayment { billing }) => {
                let Some(plan) = session.draft.plan else {
                    session.error = Some(UploadSessionError::PlanRequired);
                    return (session, Vec::new());
                };
                session.error = None;
                (session, vec![UploadAction::ChargePayment { plan, billing }])
            }
            (UploadStep::Payment, UploadEvent::PaymentSucceeded { transaction_id }) => {
                let Some(plan) = session.draft.plan else {
                    session.error = Some(UploadSessionError::PlanRequired);
                    return (session, Vec::new());
                };
                session.draft.transaction_id = Some(transaction_id);
                session.step = UploadStep::Processing;
                session.error = None;
                (session, vec![UploadAction::StartAnalysis { plan }])
            }
            (UploadStep::Payment, UploadEvent::PaymentFailed { reason }) => {
                session.error = Some(UploadSessionError::PaymentDeclined { reason });
                (session, Vec::new())
            }

            (UploadStep::Processing, UploadEvent::AnalysisSucceeded { report }) => {
                session.step = UploadStep::Done;
                session.error = None;
                (session, vec![UploadAction::AttachReport { report }])
            }
            (UploadStep::Processing, UploadEvent::AnalysisFailed { reason }) => {
                session.step = UploadStep::PlanSelect;
                session.error = Some(UploadSessionError::AnalysisFailed {
                    reason: reason.clone(),
                });
                (session, vec![UploadAction::AbandonAnalysis { reason }])
            }

            (step, UploadEvent::Back { to }) => {
                if step.allows_back_to(to) {
                    session.step = to;
                    session.error = None;
                }
                (session, Vec::new())
            }

            (step, event) => {
                warn!(?step, ?event, "ignoring upload event out of step");
                (session, Vec::new())
            }
        }
    }
}

/// Light RFC-5322-flavored shape check; real deliverability is not our
/// problem.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2
}
