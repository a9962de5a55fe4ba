//! Plan catalog and entitlement gating.

mod catalog;

pub use catalog::{PlanCatalog, PlanFeatures, PlanId, ReanalysisAllowance};
