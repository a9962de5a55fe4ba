use serde::{Deserialize, Serialize};

/// Subscription tier.
///
/// 订阅档位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Free,
    Pro,
    Premium,
}

impl PlanId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How many times a plan may re-run analysis on an already analyzed manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReanalysisAllowance {
    Disallowed,
    Limited(u32),
    Unlimited,
}

impl ReanalysisAllowance {
    /// Whether another re-analysis is permitted after `used` prior runs.
    pub fn permits(self, used: u32) -> bool {
        match self {
            Self::Disallowed => false,
            Self::Limited(max) => used < max,
            Self::Unlimited => true,
        }
    }
}

/// Everything a plan entitles the owner to.
///
/// Every gate in the product reads from this table; no other module encodes
/// entitlement constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanFeatures {
    pub id: PlanId,
    /// Words analyzed before the engine truncates.
    pub word_limit: u64,
    /// One-off price of an analysis session.
    pub price_usd_cents: u32,
    pub pacing_heatmap: bool,
    pub character_network: bool,
    pub theme_chart: bool,
    /// Revision roadmap items visible in the studio.
    pub roadmap_items: usize,
    pub reanalysis: ReanalysisAllowance,
}

impl PlanFeatures {
    pub fn is_paid(&self) -> bool {
        self.price_usd_cents > 0
    }
}

const CATALOG: [PlanFeatures; 3] = [
    PlanFeatures {
        id: PlanId::Free,
        word_limit: 50_000,
        price_usd_cents: 0,
        pacing_heatmap: false,
        character_network: false,
        theme_chart: false,
        roadmap_items: 3,
        reanalysis: ReanalysisAllowance::Disallowed,
    },
    PlanFeatures {
        id: PlanId::Pro,
        word_limit: 120_000,
        price_usd_cents: 4_900,
        pacing_heatmap: true,
        character_network: false,
        theme_chart: true,
        roadmap_items: 10,
        reanalysis: ReanalysisAllowance::Limited(1),
    },
    PlanFeatures {
        id: PlanId::Premium,
        word_limit: 250_000,
        price_usd_cents: 9_900,
        pacing_heatmap: true,
        character_network: true,
        theme_chart: true,
        roadmap_items: 25,
        reanalysis: ReanalysisAllowance::Unlimited,
    },
];

/// Static plan catalog.
///
/// 静态套餐目录。
pub struct PlanCatalog;

impl PlanCatalog {
    pub fn get(id: PlanId) -> &'static PlanFeatures {
        match id {
            PlanId::Free => &CATALOG[0],
            PlanId::Pro => &CATALOG[1],
            PlanId::Premium => &CATALOG[2],
        }
    }

    pub fn all() -> &'static [PlanFeatures] {
        &CATALOG
    }
}
