//! The per-node upgrade decision.
//!
//! Three checks, strictly in order: already at or past the suggested
//! version; below the fleet minimum; otherwise gated by rollout
//! candidacy.

use serde::{Deserialize, Serialize};

use crate::error::VersionResult;
use crate::identity::NodeId;
use crate::rollout::{Rollout, is_rollout_candidate};
use crate::version::SemVer;

/// A published release: version string plus download locator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Release {
    pub version: String,
    #[serde(default)]
    pub url: String,
}

impl Release {
    /// Parse the version field.
    pub fn semver(&self) -> VersionResult<SemVer> {
        SemVer::parse(&self.version)
    }
}

/// The requirement document published for one process: the fleet floor,
/// the rollout target, and the current rollout stage. Constructed fresh
/// per poll, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirement {
    pub minimum: Release,
    pub suggested: Release,
    #[serde(default)]
    pub rollout: Rollout,
}

/// What the node should do about its running version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// Stay on the current version.
    NoUpdate,
    /// Upgrade to the suggested release at the node's convenience.
    ShouldUpdate(Release),
    /// Upgrade immediately; the current version is below the fleet floor.
    MustUpdate(Release),
}

/// A decision plus the reason collaborators log alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub decision: Decision,
    pub reason: &'static str,
}

/// Evaluate a requirement document for one node.
///
/// Pure and stateless: the result is a function of the three inputs
/// alone, recomputed from scratch on every call, safe from any number of
/// threads. Checks run strictly in order and the first match wins — in
/// particular a node below the minimum upgrades regardless of the
/// rollout stage. Version strings parse as the checks need them; a parse
/// failure aborts the evaluation with no decision.
pub fn evaluate(
    current: &SemVer,
    node: &NodeId,
    requirement: &Requirement,
) -> VersionResult<Evaluation> {
    let suggested = requirement.suggested.semver()?;
    if *current >= suggested {
        return Ok(Evaluation {
            decision: Decision::NoUpdate,
            reason: "version is up to date",
        });
    }

    let minimum = requirement.minimum.semver()?;
    if *current < minimum {
        return Ok(Evaluation {
            decision: Decision::MustUpdate(requirement.minimum.clone()),
            reason: "version is below minimum allowed",
        });
    }

    if is_rollout_candidate(node, &requirement.rollout)? {
        Ok(Evaluation {
            decision: Decision::ShouldUpdate(requirement.suggested.clone()),
            reason: "rollout candidate",
        })
    } else {
        Ok(Evaluation {
            decision: Decision::NoUpdate,
            reason: "rollout pending for this node",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollout::RolloutBytes;

    fn requirement(minimum: &str, suggested: &str, cursor: RolloutBytes) -> Requirement {
        Requirement {
            minimum: Release {
                version: minimum.to_string(),
                url: format!("https://releases.example.com/{minimum}"),
            },
            suggested: Release {
                version: suggested.to_string(),
                url: format!("https://releases.example.com/{suggested}"),
            },
            rollout: Rollout {
                seed: RolloutBytes([3; 32]),
                cursor,
            },
        }
    }

    fn node() -> NodeId {
        NodeId::new([0x5c; 32])
    }

    #[test]
    fn up_to_date_stays_put() {
        let req = requirement("v1.0.0", "v1.0.0", RolloutBytes::MAX);
        let eval = evaluate(&SemVer::parse("v1.0.0").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::NoUpdate);
        assert_eq!(eval.reason, "version is up to date");
    }

    #[test]
    fn ahead_of_suggested_stays_put() {
        let req = requirement("v1.0.0", "v1.1.0", RolloutBytes::MAX);
        let eval = evaluate(&SemVer::parse("v2.0.0").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::NoUpdate);
        assert_eq!(eval.reason, "version is up to date");
    }

    #[test]
    fn below_minimum_overrides_rollout() {
        // Zero cursor: the rollout would gate this node out, but the
        // floor check runs first.
        let req = requirement("v1.0.0", "v1.1.0", RolloutBytes::default());
        let eval = evaluate(&SemVer::parse("v0.9.0").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::MustUpdate(req.minimum.clone()));
        assert_eq!(eval.reason, "version is below minimum allowed");
    }

    #[test]
    fn full_rollout_candidate_should_update() {
        let req = requirement("v1.0.0", "v1.1.0", RolloutBytes::MAX);
        let eval = evaluate(&SemVer::parse("v1.0.0").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::ShouldUpdate(req.suggested.clone()));
        assert_eq!(eval.reason, "rollout candidate");
    }

    #[test]
    fn empty_rollout_defers() {
        let req = requirement("v1.0.0", "v1.1.0", RolloutBytes::default());
        let eval = evaluate(&SemVer::parse("v1.0.0").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::NoUpdate);
        assert_eq!(eval.reason, "rollout pending for this node");
    }

    #[test]
    fn prerelease_current_counts_as_older() {
        let req = requirement("v0.1.0", "v1.0.0", RolloutBytes::MAX);
        let eval = evaluate(&SemVer::parse("v1.0.0-rc.1").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::ShouldUpdate(req.suggested.clone()));
    }

    #[test]
    fn bad_suggested_version_aborts() {
        let mut req = requirement("v1.0.0", "v1.1.0", RolloutBytes::MAX);
        req.suggested.version = "1.x.0".to_string();
        assert!(evaluate(&SemVer::parse("v1.0.0").unwrap(), &node(), &req).is_err());
    }

    #[test]
    fn bad_minimum_version_aborts() {
        let req = requirement("1.x.0", "v1.1.0", RolloutBytes::MAX);
        assert!(evaluate(&SemVer::parse("v1.0.0").unwrap(), &node(), &req).is_err());
    }

    #[test]
    fn unused_minimum_never_parses() {
        // Parsing is lazy in check order: once the node is up to date the
        // minimum field is never touched.
        let req = requirement("garbage", "v1.0.0", RolloutBytes::MAX);
        let eval = evaluate(&SemVer::parse("v1.0.0").unwrap(), &node(), &req).unwrap();
        assert_eq!(eval.decision, Decision::NoUpdate);
    }

    #[test]
    fn decision_json_shape() {
        let eval = Evaluation {
            decision: Decision::MustUpdate(Release {
                version: "v1.0.0".into(),
                url: "https://releases.example.com/v1.0.0".into(),
            }),
            reason: "version is below minimum allowed",
        };
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["decision"]["action"], "must_update");
        assert_eq!(json["decision"]["version"], "v1.0.0");
        assert_eq!(json["reason"], "version is below minimum allowed");
    }
}
