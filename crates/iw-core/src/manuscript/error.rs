use crate::manuscript::ManuscriptStatus;
use crate::plan::PlanId;

/// Lifecycle transition failures.
///
/// `InvalidState` is a programming or race error and is never silently
/// swallowed; `PlanLimit` is terminal for the action and recoverable only by
/// upgrading through a new upload session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot {action} while manuscript is {actual}")]
    InvalidState {
        action: &'static str,
        actual: ManuscriptStatus,
    },

    #[error("plan {plan} does not allow another analysis run")]
    PlanLimit { plan: PlanId },

    #[error("manuscript has no plan attached")]
    MissingPlan,
}
