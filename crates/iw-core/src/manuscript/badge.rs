//! Presentation mapping for manuscript status.
//!
//! Kept outside the entity and the state machine: badge styling is a
//! front-end concern, the lifecycle does not know about it.

use crate::manuscript::ManuscriptStatus;

/// Tone token the front-end maps to its color system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Amber,
    Violet,
    Emerald,
}

/// Badge copy and tone for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

/// Pure status → badge mapping.
pub fn status_badge(status: ManuscriptStatus) -> StatusBadge {
    match status {
        ManuscriptStatus::AwaitingWisdom => StatusBadge {
            label: "Awaiting wisdom",
            tone: BadgeTone::Amber,
        },
        ManuscriptStatus::UnderScrutiny => StatusBadge {
            label: "Under scrutiny",
            tone: BadgeTone::Violet,
        },
        ManuscriptStatus::InsightsUnveiled => StatusBadge {
            label: "Insights unveiled",
            tone: BadgeTone::Emerald,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_status_has_a_distinct_tone() {
        let tones = [
            status_badge(ManuscriptStatus::AwaitingWisdom).tone,
            status_badge(ManuscriptStatus::UnderScrutiny).tone,
            status_badge(ManuscriptStatus::InsightsUnveiled).tone,
        ];
        assert_ne!(tones[0], tones[1]);
        assert_ne!(tones[1], tones[2]);
        assert_ne!(tones[0], tones[2]);
    }
}
