use serde::{Deserialize, Serialize};

/// Manuscript lifecycle state machine
///
/// Design principle: This is a pure type state machine with only state
/// definitions and transition validation logic. Runtime behaviors like
/// payment gating and per-record transition locking are handled by the
/// application layer (iw-app).
///
/// State transitions:
///
/// ```text
/// AwaitingWisdom ──→ UnderScrutiny ──→ InsightsUnveiled
///       ▲                 │                  │
///       └── analysis failed                  │
///                         ▲── re-analysis ───┘
/// ```
///
/// Transitions are monotonic forward; the only reversals are an explicit
/// re-analysis and the revert of a failed analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManuscriptStatus {
    /// Uploaded, not yet paid for or analyzed
    AwaitingWisdom,

    /// Analysis in flight
    UnderScrutiny,

    /// Analysis complete, report attached
    InsightsUnveiled,
}

impl ManuscriptStatus {
    /// Wire/string form, also the key the bookshelf `Status` sort orders by.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingWisdom => "awaiting-wisdom",
            Self::UnderScrutiny => "under-scrutiny",
            Self::InsightsUnveiled => "insights-unveiled",
        }
    }

    /// Check if analysis is currently in flight
    pub fn is_active(self) -> bool {
        self == Self::UnderScrutiny
    }

    /// Check if at least the current run has completed
    pub fn is_complete(self) -> bool {
        self == Self::InsightsUnveiled
    }

    /// Start the first analysis run
    pub fn begin_analysis(self) -> Option<Self> {
        match self {
            Self::AwaitingWisdom => Some(Self::UnderScrutiny),
            _ => None,
        }
    }

    /// Transition after the engine returns a report
    pub fn on_analysis_complete(self) -> Option<Self> {
        match self {
            Self::UnderScrutiny => Some(Self::InsightsUnveiled),
            _ => None,
        }
    }

    /// Transition after the engine fails; the run is abandoned
    pub fn on_analysis_failed(self) -> Option<Self> {
        match self {
            Self::UnderScrutiny => Some(Self::AwaitingWisdom),
            _ => None,
        }
    }

    /// Start another run on an already analyzed manuscript
    pub fn start_reanalysis(self) -> Option<Self> {
        match self {
            Self::InsightsUnveiled => Some(Self::UnderScrutiny),
            _ => None,
        }
    }
}

impl Default for ManuscriptStatus {
    fn default() -> Self {
        Self::AwaitingWisdom
    }
}

impl std::fmt::Display for ManuscriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
