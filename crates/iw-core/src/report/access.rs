//! Time-limited report links.
//!
//! A token maps one opaque string to one analysis report. An expired token
//! stays on file (it resolves as expired, not missing); regeneration mints a
//! fresh value for the same report and retires the old one, which from then
//! on resolves as missing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AnalysisId, ManuscriptId};

/// Opaque, time-limited key granting read access to one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAccessToken {
    pub token: String,
    pub analysis_id: AnalysisId,
    pub manuscript_id: ManuscriptId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ReportAccessToken {
    /// Mint a fresh token for a report, valid `ttl_days` from `now`.
    pub fn issue(
        analysis_id: AnalysisId,
        manuscript_id: ManuscriptId,
        now: DateTime<Utc>,
        ttl_days: i64,
    ) -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
            analysis_id,
            manuscript_id,
            issued_at: now,
            expires_at: now + Duration::days(ttl_days),
        }
    }

    /// Absolute-timestamp comparison, no grace window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// A replacement token for the same report: fresh value, fresh expiry.
    pub fn regenerate(&self, now: DateTime<Utc>, ttl_days: i64) -> Self {
        Self::issue(
            self.analysis_id.clone(),
            self.manuscript_id.clone(),
            now,
            ttl_days,
        )
    }
}

/// Why a report link did not resolve. Both are terminal for the presented
/// token; recovery goes through regeneration, which requires the manuscript,
/// not the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ReportAccessError {
    #[error("report link not found")]
    NotFound,

    #[error("report link has expired")]
    Expired,
}
