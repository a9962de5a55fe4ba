use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AnalysisId, ManuscriptId};
use crate::manuscript::{
    FileFormat, Genre, LifecycleError, ManuscriptStatus, PublicationStatus,
};
use crate::plan::{PlanCatalog, PlanId};

/// One uploaded work and its lifecycle state.
///
/// Invariant: `analysis_id` is present iff `status` is
/// [`ManuscriptStatus::InsightsUnveiled`], and a manuscript in that status
/// always carries `last_analyzed`. `last_analyzed` survives a re-analysis as
/// the timestamp of the previous completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manuscript {
    pub id: ManuscriptId,
    pub title: String,
    pub author: String,
    pub contact_email: String,
    pub genre: Genre,
    pub publication_status: PublicationStatus,
    pub word_count: u64,
    pub status: ManuscriptStatus,
    /// Locked in when the first analysis session starts; immutable after.
    pub plan: Option<PlanId>,
    /// Completed re-analysis runs, counted against the plan allowance.
    pub reanalyses_used: u32,
    pub analysis_id: Option<AnalysisId>,
    pub last_analyzed: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub file_size_bytes: u64,
    pub file_format: FileFormat,
}

/// The fields the author fills in on the details step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptDetails {
    pub title: String,
    pub author: String,
    pub contact_email: String,
    pub genre: Genre,
    pub publication_status: PublicationStatus,
}

impl Manuscript {
    /// Mint a fresh record in `AwaitingWisdom` from an accepted upload.
    pub fn from_upload(
        details: ManuscriptDetails,
        word_count: u64,
        file_size_bytes: u64,
        file_format: FileFormat,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ManuscriptId::new(),
            title: details.title,
            author: details.author,
            contact_email: details.contact_email,
            genre: details.genre,
            publication_status: details.publication_status,
            word_count,
            status: ManuscriptStatus::AwaitingWisdom,
            plan: None,
            reanalyses_used: 0,
            analysis_id: None,
            last_analyzed: None,
            uploaded_at,
            file_size_bytes,
            file_format,
        }
    }

    /// Whether any analysis run has ever completed on this record.
    pub fn has_completed_analysis(&self) -> bool {
        self.last_analyzed.is_some()
    }

    /// `awaiting-wisdom → under-scrutiny`, locking in the plan.
    pub fn begin_analysis(&mut self, plan: PlanId) -> Result<(), LifecycleError> {
        let next = self
            .status
            .begin_analysis()
            .ok_or(LifecycleError::InvalidState {
                action: "begin analysis",
                actual: self.status,
            })?;
        self.status = next;
        // The plan survives a failed run's revert; only set it once.
        self.plan.get_or_insert(plan);
        Ok(())
    }

    /// `under-scrutiny → insights-unveiled`, attaching the report.
    pub fn complete_analysis(
        &mut self,
        analysis_id: AnalysisId,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        let next = self
            .status
            .on_analysis_complete()
            .ok_or(LifecycleError::InvalidState {
                action: "complete analysis",
                actual: self.status,
            })?;
        self.status = next;
        self.analysis_id = Some(analysis_id);
        self.last_analyzed = Some(now);
        Ok(())
    }

    /// Abandon a failed run: `under-scrutiny → awaiting-wisdom`.
    ///
    /// `last_analyzed` is untouched; it only ever moves on successful
    /// completion.
    pub fn fail_analysis(&mut self) -> Result<(), LifecycleError> {
        let next = self
            .status
            .on_analysis_failed()
            .ok_or(LifecycleError::InvalidState {
                action: "abandon analysis",
                actual: self.status,
            })?;
        self.status = next;
        Ok(())
    }

    /// `insights-unveiled → under-scrutiny`, if the plan allowance permits.
    ///
    /// On `PlanLimit` the record is left untouched.
    pub fn start_reanalysis(&mut self) -> Result<(), LifecycleError> {
        let plan = self.plan.ok_or(LifecycleError::MissingPlan)?;
        let next = self
            .status
            .start_reanalysis()
            .ok_or(LifecycleError::InvalidState {
                action: "re-analyze",
                actual: self.status,
            })?;

        if !PlanCatalog::get(plan).reanalysis.permits(self.reanalyses_used) {
            return Err(LifecycleError::PlanLimit { plan });
        }

        self.status = next;
        self.reanalyses_used += 1;
        self.analysis_id = None;
        Ok(())
    }
}
