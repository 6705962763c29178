//! Fleetgate version policy — the per-node upgrade decision engine.
//!
//! Each node in a fleet evaluates a published requirement document
//! (minimum version, suggested version, rollout gate) locally and
//! deterministically. No coordinator, no state between evaluations: the
//! decision is a pure function of the document, the node's current
//! version, and its stable identity, so millions of nodes can run the
//! same logic concurrently with no communication.
//!
//! # Components
//!
//! - **`version`** — tolerant semantic-version parsing and ordering
//! - **`rollout`** — 256-bit rollout cursors, percentage mapping, and the
//!   keyed-hash candidate gate
//! - **`decision`** — the three-step upgrade policy
//! - **`identity`** — opaque per-node identity
//! - **`info`** — immutable build metadata captured at compile time

pub mod decision;
pub mod error;
pub mod identity;
pub mod info;
pub mod rollout;
pub mod version;

pub use decision::{Decision, Evaluation, Release, Requirement, evaluate};
pub use error::{VersionError, VersionResult};
pub use identity::NodeId;
pub use info::BuildInfo;
pub use rollout::{
    Rollout, RolloutBytes, is_rollout_candidate, percentage_to_cursor,
    percentage_to_cursor_legacy,
};
pub use version::SemVer;
