//! Studio configuration domain model

use serde::{Deserialize, Serialize};

/// Studio configuration
///
/// Only the knobs the application layer consults live here; presentation
/// settings stay with the front-end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Upload acceptance limits
    pub upload: UploadConfig,

    /// Report link settings
    pub report_link: ReportLinkConfig,

    /// Pacing of the simulated collaborators
    pub simulation: SimulationConfig,
}

/// Upload acceptance limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Hard ceiling on accepted file size, in bytes
    pub max_file_size_bytes: u64,
}

/// Report link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLinkConfig {
    /// Days a freshly issued report link stays valid
    pub ttl_days: i64,
}

/// Pacing of the simulated collaborators
///
/// The product ships with mocked intake, analysis and payment services;
/// these delays keep the UI choreography believable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub intake_delay_ms: u64,
    pub analysis_delay_ms: u64,
    pub payment_delay_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Default for ReportLinkConfig {
    fn default() -> Self {
        Self { ttl_days: 7 }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            intake_delay_ms: 400,
            analysis_delay_ms: 2_500,
            payment_delay_ms: 900,
        }
    }
}
