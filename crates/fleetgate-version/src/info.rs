//! Build metadata captured at compile time.
//!
//! The binary's version, commit, and build timestamp are baked in through
//! `FLEETGATE_BUILD_*` environment variables at compile time and surfaced
//! as one immutable value, constructed at process startup and handed to
//! whichever collaborators need it.

use std::fmt;

use serde::Serialize;

use crate::error::{VersionError, VersionResult};
use crate::version::SemVer;

/// Versioning information for a running binary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BuildInfo {
    /// Build time, unix seconds; 0 when unknown.
    pub timestamp: u64,
    /// Git commit the binary was built from.
    pub commit: String,
    /// Semantic version of the build.
    pub version: SemVer,
    /// Whether this is a release build.
    pub release: bool,
    /// Whether the working tree was dirty at build time.
    pub modified: bool,
}

impl BuildInfo {
    /// Capture the values baked in at compile time.
    ///
    /// With no `FLEETGATE_BUILD_*` variables set (a plain development
    /// build) this is the zero value. Malformed values are errors for the
    /// caller to surface, not a startup panic.
    pub fn from_build_env() -> VersionResult<Self> {
        Self::from_parts(
            option_env!("FLEETGATE_BUILD_TIMESTAMP"),
            option_env!("FLEETGATE_BUILD_COMMIT"),
            option_env!("FLEETGATE_BUILD_VERSION"),
            option_env!("FLEETGATE_BUILD_RELEASE"),
        )
    }

    fn from_parts(
        timestamp: Option<&str>,
        commit: Option<&str>,
        version: Option<&str>,
        release: Option<&str>,
    ) -> VersionResult<Self> {
        if timestamp.is_none() && commit.is_none() && version.is_none() && release.is_none() {
            return Ok(Self::default());
        }

        let timestamp = match timestamp {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|err| VersionError::Parse(format!("build timestamp {raw:?}: {err}")))?,
            None => 0,
        };
        let commit = commit.unwrap_or_default().to_string();
        let version = match version {
            Some(raw) => SemVer::parse(raw)?,
            None => SemVer::default(),
        };
        // A release build carries a full commit and timestamp.
        let release = matches!(release, Some(flag) if flag.eq_ignore_ascii_case("true"))
            && timestamp != 0
            && !commit.is_empty();
        let modified = commit.contains("dirty");

        Ok(Self {
            timestamp,
            commit,
            version,
            release,
            modified,
        })
    }

    /// True for a development build with no baked-in metadata.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Emit the build information as a structured log event.
    pub fn log(&self) {
        tracing::info!(
            version = %self.version,
            commit = %self.commit,
            timestamp = self.timestamp,
            release = self.release,
            modified = self.modified,
            "build info"
        );
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.release {
            writeln!(f, "Release build")?;
        } else {
            writeln!(f, "Development build")?;
        }
        if !self.version.is_zero() {
            writeln!(f, "Version: {}", self.version)?;
        }
        if self.timestamp != 0 {
            writeln!(f, "Build timestamp: {}", self.timestamp)?;
        }
        if !self.commit.is_empty() {
            writeln!(f, "Git commit: {}", self.commit)?;
        }
        if self.modified {
            writeln!(f, "Modified (dirty): true")?;
        }
        Ok(())
    }
}
