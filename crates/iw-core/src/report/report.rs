use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AnalysisId, ManuscriptId};
use crate::plan::PlanFeatures;

/// A 0–100 score. Construction clamps, so a stored score is always in range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Reader-facing payoff of fixing one revision item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

/// Author-facing cost of fixing one revision item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

/// One entry of the revision roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionItem {
    /// 1 is the most urgent; the roadmap is stored sorted ascending.
    pub priority: u32,
    pub impact: ImpactLevel,
    pub effort: EffortLevel,
    pub suggestion: String,
}

/// The five headline scores of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub overall: Score,
    pub pacing: Score,
    pub character: Score,
    pub dialogue: Score,
    pub theme: Score,
}

/// Structured output of one completed analysis, owned by exactly one
/// manuscript.
///
/// The full roadmap is always stored; plan gating truncates at render time
/// via [`AnalysisReport::visible_revision_items`], never in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: AnalysisId,
    pub manuscript_id: ManuscriptId,
    pub scores: ScoreCard,
    pub revision_items: Vec<RevisionItem>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// The roadmap slice the owning plan lets the author see.
    pub fn visible_revision_items(&self, features: &PlanFeatures) -> &[RevisionItem] {
        let count = self.revision_items.len().min(features.roadmap_items);
        &self.revision_items[..count]
    }
}
