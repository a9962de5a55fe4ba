use std::path::Path;

use anyhow::Context;
use tracing::warn;

use iw_core::StudioConfig;

/// TOML-backed studio settings.
///
/// Every field is optional in the file; anything missing falls back to the
/// shipped defaults.
pub struct TomlSettings;

impl TomlSettings {
    pub fn parse(content: &str) -> anyhow::Result<StudioConfig> {
        toml::from_str(content).context("invalid studio settings")
    }

    pub fn load(path: &Path) -> anyhow::Result<StudioConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::parse(&content)
    }

    /// Missing or broken settings never block startup.
    pub fn load_or_default(path: &Path) -> StudioConfig {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "falling back to default settings");
                StudioConfig::default()
            }
        }
    }
}
