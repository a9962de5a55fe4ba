//! Analysis report domain models.

mod access;
#[allow(clippy::module_inception)]
mod report;

pub use access::{ReportAccessError, ReportAccessToken};
pub use report::{
    AnalysisReport, EffortLevel, ImpactLevel, RevisionItem, Score, ScoreCard,
};
