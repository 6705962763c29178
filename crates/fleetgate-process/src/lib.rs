//! Fleetgate process wiring.
//!
//! Thin bootstrap around third-party frameworks: structured-log
//! initialization and `fleetgate.toml` loading. No decision logic lives
//! here — that stays in `fleetgate-version`.

pub mod config;
pub mod telemetry;

pub use config::{CheckerConfig, ProcessConfig};
pub use telemetry::{TelemetryConfig, init as init_telemetry};
