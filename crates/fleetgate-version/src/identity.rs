//! Opaque per-node identity.

use std::fmt;

use crate::error::{VersionError, VersionResult};

/// Stable, unique identity of a fleet node.
///
/// Produced by an identity collaborator (typically derived from the
/// node's keypair) and treated as opaque bytes here: the decision engine
/// only ever feeds it to the rollout gate's keyed hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId([u8; 32]);

impl NodeId {
    /// Identity length in bytes.
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse the hex form used at the wiring boundary (config files, CLI
    /// arguments). The core itself never derives or transmits identities.
    pub fn from_hex(text: &str) -> VersionResult<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|err| VersionError::Decode(format!("node identity: {err}")))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|rejected: Vec<u8>| {
            VersionError::Decode(format!(
                "node identity: expected {} bytes, got {}",
                Self::LEN,
                rejected.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for NodeId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
