//! fleetgate.toml parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// On-disk configuration for a fleetgate process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub checker: Option<CheckerConfig>,
    pub telemetry: Option<TelemetryConfig>,
}

/// Where the update checker finds its inputs.
///
/// The `interval` is transported for whatever scheduler drives the
/// checker; nothing in this workspace sleeps on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Path to the fetched requirement document (JSON).
    pub requirement_path: String,
    /// Path to the node's hex-encoded identity.
    pub identity_path: Option<String>,
    /// Poll interval, e.g. "15m".
    pub interval: Option<String>,
}

impl ProcessConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProcessConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
