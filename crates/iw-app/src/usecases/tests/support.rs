//! Test fixtures and hand-rolled ports shared by use-case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use iw_core::ids::{AnalysisId, ManuscriptId, TransactionId};
use iw_core::manuscript::{
    FileFormat, Genre, Manuscript, ManuscriptDetails, PublicationStatus,
};
use iw_core::plan::PlanFeatures;
use iw_core::ports::{
    AnalysisEnginePort, AnalysisError, BillingDetails, ClockPort, ManuscriptRepositoryPort,
    PaymentError, PaymentPort, PaymentReceipt, ReportStorePort, RepositoryError,
};
use iw_core::report::{
    AnalysisReport, EffortLevel, ImpactLevel, ReportAccessToken, RevisionItem, Score, ScoreCard,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

pub fn paid_billing() -> BillingDetails {
    BillingDetails {
        card_holder: "Elena Rodriguez".into(),
        card_number: "4242424242424242".into(),
        expiry: "12/27".into(),
        cvc: "123".into(),
    }
}

pub fn sample_details() -> ManuscriptDetails {
    ManuscriptDetails {
        title: "The Hollow Tide".into(),
        author: "Elena Rodriguez".into(),
        contact_email: "elena@example.com".into(),
        genre: Genre::LiteraryFiction,
        publication_status: PublicationStatus::Querying,
    }
}

pub fn sample_report(manuscript_id: &ManuscriptId) -> AnalysisReport {
    AnalysisReport {
        id: AnalysisId::new(),
        manuscript_id: manuscript_id.clone(),
        scores: ScoreCard {
            overall: Score::new(74),
            pacing: Score::new(68),
            character: Score::new(81),
            dialogue: Score::new(77),
            theme: Score::new(70),
        },
        revision_items: vec![RevisionItem {
            priority: 1,
            impact: ImpactLevel::High,
            effort: EffortLevel::Medium,
            suggestion: "Tighten the middle act".into(),
        }],
        generated_at: fixed_now(),
    }
}

/// Intake that accepts anything whitelisted and reports a fixed word count.
pub struct StubIntake {
    pub word_count: u64,
}

#[async_trait]
impl iw_core::ports::FileIntakePort for StubIntake {
    async fn validate_and_parse(
        &self,
        upload: &iw_core::manuscript::UploadCandidate,
    ) -> Result<iw_core::ports::ParsedUpload, iw_core::ports::FileIntakeError> {
        let format = FileFormat::from_file_name(&upload.file_name).ok_or_else(|| {
            iw_core::ports::FileIntakeError::Validation("unknown format".into())
        })?;
        Ok(iw_core::ports::ParsedUpload {
            word_count: self.word_count,
            format,
            size_bytes: upload.size_bytes,
            preflight: iw_core::manuscript::PreflightChecks {
                format: true,
                size: true,
                readability: true,
            },
        })
    }
}

/// Frozen clock.
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// HashMap-backed manuscript repository.
#[derive(Default)]
pub struct InMemoryRepo {
    records: Mutex<HashMap<ManuscriptId, Manuscript>>,
}

impl InMemoryRepo {
    /// Insert a fresh `awaiting-wisdom` record and return it.
    pub async fn seed_awaiting(&self) -> Manuscript {
        let manuscript = Manuscript::from_upload(
            sample_details(),
            84_000,
            480_000,
            FileFormat::Docx,
            fixed_now(),
        );
        self.insert(manuscript.clone()).await.unwrap();
        manuscript
    }
}

#[async_trait]
impl ManuscriptRepositoryPort for InMemoryRepo {
    async fn get(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn insert(&self, manuscript: Manuscript) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .unwrap()
            .insert(manuscript.id.clone(), manuscript);
        Ok(())
    }

    async fn update(&self, manuscript: Manuscript) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().unwrap();
        if !records.contains_key(&manuscript.id) {
            return Err(RepositoryError::NotFound);
        }
        records.insert(manuscript.id.clone(), manuscript);
        Ok(())
    }

    async fn delete(&self, id: &ManuscriptId) -> Result<(), RepositoryError> {
        self.records.lock().unwrap().remove(id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Manuscript>, RepositoryError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

/// Payment port with scripted behavior and call tracking.
pub struct MockPayments {
    decline: bool,
    delay_ms: u64,
    charged: AtomicBool,
}

impl MockPayments {
    pub fn succeeding() -> Self {
        Self {
            decline: false,
            delay_ms: 0,
            charged: AtomicBool::new(false),
        }
    }

    pub fn succeeding_after_ms(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::succeeding()
        }
    }

    pub fn declining() -> Self {
        Self {
            decline: true,
            delay_ms: 0,
            charged: AtomicBool::new(false),
        }
    }

    pub fn was_charged(&self) -> bool {
        self.charged.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentPort for MockPayments {
    async fn charge(
        &self,
        features: &PlanFeatures,
        _billing: &BillingDetails,
    ) -> Result<PaymentReceipt, PaymentError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.decline {
            return Err(PaymentError::Declined("card declined".into()));
        }
        self.charged.store(true, Ordering::SeqCst);
        Ok(PaymentReceipt {
            transaction_id: TransactionId::new(),
            amount_usd_cents: features.price_usd_cents,
        })
    }
}

/// Analysis engine returning a canned report, with an optional delay and
/// call counting.
pub struct MockEngine {
    fail: bool,
    delay_ms: u64,
    pub calls: AtomicU32,
}

impl MockEngine {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            delay_ms: 0,
            calls: AtomicU32::new(0),
        }
    }

    pub fn succeeding_after_ms(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::succeeding()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            delay_ms: 0,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl AnalysisEnginePort for MockEngine {
    async fn analyze(
        &self,
        manuscript: &Manuscript,
        _features: &PlanFeatures,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail {
            return Err(AnalysisError::Engine("model overloaded".into()));
        }
        Ok(sample_report(&manuscript.id))
    }
}

/// HashMap-backed report/token store with an atomic token swap.
#[derive(Default)]
pub struct InMemoryReports {
    inner: Mutex<ReportsInner>,
}

#[derive(Default)]
struct ReportsInner {
    reports: HashMap<AnalysisId, AnalysisReport>,
    tokens: HashMap<ManuscriptId, ReportAccessToken>,
}

#[async_trait]
impl ReportStorePort for InMemoryReports {
    async fn put_report(&self, report: AnalysisReport) -> Result<(), RepositoryError> {
        self.inner
            .lock()
            .unwrap()
            .reports
            .insert(report.id.clone(), report);
        Ok(())
    }

    async fn get_report(
        &self,
        id: &AnalysisId,
    ) -> Result<Option<AnalysisReport>, RepositoryError> {
        Ok(self.inner.lock().unwrap().reports.get(id).cloned())
    }

    async fn find_token(
        &self,
        token: &str,
    ) -> Result<Option<ReportAccessToken>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .tokens
            .values()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn token_for_manuscript(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<Option<ReportAccessToken>, RepositoryError> {
        Ok(self.inner.lock().unwrap().tokens.get(manuscript_id).cloned())
    }

    async fn replace_token(&self, token: ReportAccessToken) -> Result<(), RepositoryError> {
        self.inner
            .lock()
            .unwrap()
            .tokens
            .insert(token.manuscript_id.clone(), token);
        Ok(())
    }

    async fn delete_for_manuscript(
        &self,
        manuscript_id: &ManuscriptId,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.reports.retain(|_, r| &r.manuscript_id != manuscript_id);
        inner.tokens.remove(manuscript_id);
        Ok(())
    }
}
