//! # iw-infra
//!
//! Infrastructure adapters for Inkwise: in-memory stores, the system clock,
//! settings loading, and the three simulated collaborators (file intake,
//! analysis engine, payment processor) the product ships instead of a
//! backend.

pub mod analysis;
pub mod intake;
pub mod memory;
pub mod payment;
pub mod settings;
pub mod time;

pub use analysis::SimulatedAnalysisEngine;
pub use intake::SimulatedFileIntake;
pub use memory::{MemoryManuscriptStore, MemoryReportStore};
pub use payment::SimulatedPaymentProcessor;
pub use settings::TomlSettings;
pub use time::SystemClock;
