//! Configuration domain models.

mod app_config;

pub use app_config::{ReportLinkConfig, SimulationConfig, StudioConfig, UploadConfig};
