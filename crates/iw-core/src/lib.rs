//! # iw-core
//!
//! Core domain models and business logic for Inkwise.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the manuscript lifecycle, the plan catalog, bookshelf
//! queries, the upload wizard state machine, report access tokens, and the
//! port traits the collaborators stand behind.

// Public module exports
pub mod bookshelf;
pub mod config;
pub mod ids;
pub mod manuscript;
pub mod plan;
pub mod ports;
pub mod report;
pub mod session;

// Re-export commonly used types at the crate root
pub use config::StudioConfig;
pub use ids::{AnalysisId, ManuscriptId, SessionId, TransactionId};
pub use manuscript::{LifecycleError, Manuscript, ManuscriptStatus};
pub use plan::{PlanCatalog, PlanFeatures, PlanId};
pub use report::{AnalysisReport, ReportAccessError, ReportAccessToken};
pub use session::{UploadSession, UploadStateMachine};
