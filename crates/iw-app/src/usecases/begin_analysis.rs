use std::sync::Arc;

use tracing::info;

use iw_core::ids::ManuscriptId;
use iw_core::manuscript::LifecycleError;
use iw_core::plan::{PlanCatalog, PlanId};
use iw_core::ports::{
    BillingDetails, ManuscriptRepositoryPort, PaymentError, PaymentPort, PaymentReceipt,
    RepositoryError,
};

use crate::usecases::internal::{ConcurrentTransitionError, TransitionGuard};

#[derive(Debug, thiserror::Error)]
pub enum BeginAnalysisError {
    #[error("manuscript not found")]
    NotFound,

    #[error("billing details required for a paid plan")]
    MissingBilling,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Concurrent(#[from] ConcurrentTransitionError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for starting an analysis run.
/// 启动分析的用例。
///
/// Locks in the plan, charges it when it has a price, and moves the record
/// to `under-scrutiny`. A failed charge leaves the record untouched.
pub struct BeginAnalysis {
    repo: Arc<dyn ManuscriptRepositoryPort>,
    payments: Arc<dyn PaymentPort>,
    guard: TransitionGuard,
}

impl BeginAnalysis {
    pub fn from_ports(
        repo: Arc<dyn ManuscriptRepositoryPort>,
        payments: Arc<dyn PaymentPort>,
        guard: TransitionGuard,
    ) -> Self {
        Self {
            repo,
            payments,
            guard,
        }
    }

    /// Returns the payment receipt when the plan had a price.
    #[tracing::instrument(
        name = "usecase.begin_analysis.execute",
        skip(self, billing),
        fields(manuscript_id = %manuscript_id, plan = %plan)
    )]
    pub async fn execute(
        &self,
        manuscript_id: &ManuscriptId,
        plan: PlanId,
        billing: Option<&BillingDetails>,
    ) -> Result<Option<PaymentReceipt>, BeginAnalysisError> {
        let _permit = self.guard.acquire(manuscript_id)?;

        let manuscript = self
            .repo
            .get(manuscript_id)
            .await?
            .ok_or(BeginAnalysisError::NotFound)?;

        // Validate the transition before touching money.
        let mut updated = manuscript;
        updated.begin_analysis(plan)?;

        let features = PlanCatalog::get(plan);
        let receipt = if features.is_paid() {
            let billing = billing.ok_or(BeginAnalysisError::MissingBilling)?;
            let receipt = self.payments.charge(features, billing).await?;
            info!(transaction_id = %receipt.transaction_id, "Plan charged");
            Some(receipt)
        } else {
            None
        };

        self.repo.update(updated).await?;
        info!("Analysis started");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::support::{paid_billing, InMemoryRepo, MockPayments};
    use iw_core::manuscript::ManuscriptStatus;

    #[tokio::test]
    async fn test_free_plan_never_touches_payments() {
        let repo = Arc::new(InMemoryRepo::default());
        let manuscript = repo.seed_awaiting().await;
        let payments = Arc::new(MockPayments::succeeding());

        let uc = BeginAnalysis::from_ports(repo.clone(), payments.clone(), TransitionGuard::new());
        let receipt = uc
            .execute(&manuscript.id, PlanId::Free, None)
            .await
            .unwrap();

        assert!(receipt.is_none());
        assert!(!payments.was_charged());
        let stored = repo.get(&manuscript.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ManuscriptStatus::UnderScrutiny);
        assert_eq!(stored.plan, Some(PlanId::Free));
    }

    #[tokio::test]
    async fn test_paid_plan_charges_then_transitions() {
        let repo = Arc::new(InMemoryRepo::default());
        let manuscript = repo.seed_awaiting().await;
        let payments = Arc::new(MockPayments::succeeding());

        let uc = BeginAnalysis::from_ports(repo.clone(), payments.clone(), TransitionGuard::new());
        let receipt = uc
            .execute(&manuscript.id, PlanId::Pro, Some(&paid_billing()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(receipt.amount_usd_cents, 4_900);
        assert!(payments.was_charged());
        let stored = repo.get(&manuscript.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ManuscriptStatus::UnderScrutiny);
    }

    #[tokio::test]
    async fn test_declined_charge_leaves_record_untouched() {
        let repo = Arc::new(InMemoryRepo::default());
        let manuscript = repo.seed_awaiting().await;
        let payments = Arc::new(MockPayments::declining());

        let uc = BeginAnalysis::from_ports(repo.clone(), payments, TransitionGuard::new());
        let err = uc
            .execute(&manuscript.id, PlanId::Premium, Some(&paid_billing()))
            .await
            .unwrap_err();

        assert!(matches!(err, BeginAnalysisError::Payment(_)));
        let stored = repo.get(&manuscript.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ManuscriptStatus::AwaitingWisdom);
        assert_eq!(stored.plan, None);
    }

    #[tokio::test]
    async fn test_paid_plan_without_billing_is_rejected() {
        let repo = Arc::new(InMemoryRepo::default());
        let manuscript = repo.seed_awaiting().await;
        let payments = Arc::new(MockPayments::succeeding());

        let uc = BeginAnalysis::from_ports(repo.clone(), payments.clone(), TransitionGuard::new());
        let err = uc
            .execute(&manuscript.id, PlanId::Pro, None)
            .await
            .unwrap_err();

        assert!(matches!(err, BeginAnalysisError::MissingBilling));
        assert!(!payments.was_charged());
    }

    #[tokio::test]
    async fn test_begin_twice_is_invalid_state() {
        let repo = Arc::new(InMemoryRepo::default());
        let manuscript = repo.seed_awaiting().await;
        let payments = Arc::new(MockPayments::succeeding());

        let uc = BeginAnalysis::from_ports(repo.clone(), payments, TransitionGuard::new());
        uc.execute(&manuscript.id, PlanId::Free, None).await.unwrap();

        let err = uc
            .execute(&manuscript.id, PlanId::Free, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BeginAnalysisError::Lifecycle(LifecycleError::InvalidState { .. })
        ));
    }

    #[tokio::test]
    async fn test_parallel_begin_one_success_one_rejection() {
        let repo = Arc::new(InMemoryRepo::default());
        let manuscript = repo.seed_awaiting().await;
        // slow payment keeps the first transition in flight while the
        // second one arrives
        let payments = Arc::new(MockPayments::succeeding_after_ms(100));

        let uc = Arc::new(BeginAnalysis::from_ports(
            repo.clone(),
            payments,
            TransitionGuard::new(),
        ));

        let a = {
            let uc = Arc::clone(&uc);
            let id = manuscript.id.clone();
            tokio::spawn(async move { uc.execute(&id, PlanId::Pro, Some(&paid_billing())).await })
        };
        let b = {
            let uc = Arc::clone(&uc);
            let id = manuscript.id.clone();
            tokio::spawn(async move { uc.execute(&id, PlanId::Pro, Some(&paid_billing())).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(
            loser.unwrap_err(),
            BeginAnalysisError::Concurrent(_) | BeginAnalysisError::Lifecycle(_)
        ));
    }
}
