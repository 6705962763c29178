//! Error types for version policy evaluation.

use thiserror::Error;

/// Result type alias for version policy operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors that can occur while evaluating a requirement document.
#[derive(Debug, Error)]
pub enum VersionError {
    /// A version string is not valid semantic-version syntax.
    #[error("invalid semantic version: {0}")]
    Parse(String),

    /// A hex-encoded rollout seed or cursor is malformed.
    #[error("invalid rollout value: {0}")]
    Decode(String),

    /// The keyed hash primitive failed. HMAC-SHA256 accepts keys of any
    /// length, so this variant is not reachable in normal operation; it
    /// exists so the gate reports the fault instead of panicking.
    #[error("rollout hash failed: {0}")]
    Hash(String),
}
