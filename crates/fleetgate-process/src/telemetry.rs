//! Structured-log bootstrap.

use serde::{Deserialize, Serialize};

/// Log output configuration for a fleetgate process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Fallback filter directive when RUST_LOG is unset.
    pub filter: Option<String>,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

/// Initialize the global tracing subscriber.
///
/// RUST_LOG wins when set; otherwise the configured filter applies, and
/// failing that a default that keeps fleetgate crates at debug.
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let fallback = config.filter.as_deref().unwrap_or("info,fleetgate=debug");
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(fallback)?,
    };

    if config.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}
