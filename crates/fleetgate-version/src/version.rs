//! Tolerant semantic-version parsing and ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{VersionError, VersionResult};

/// A parsed semantic version.
///
/// Ordering follows SemVer 2.0 precedence: (major, minor, patch) compare
/// numerically; on a tie, a version without prerelease identifiers ranks
/// above any that has them, and prerelease identifiers compare pairwise
/// (numeric identifiers numerically, alphanumeric ones lexically, a
/// matching prefix sorting first). Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVer(semver::Version);

impl SemVer {
    /// Parse a version string.
    ///
    /// Accepts an optional leading `v`/`V` and surrounding whitespace, and
    /// defaults missing minor/patch components to 0 ("v1.4" parses as
    /// 1.4.0). A shortened version cannot carry prerelease or build
    /// metadata.
    pub fn parse(text: &str) -> VersionResult<Self> {
        let trimmed = text.trim();
        let rest = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let (core, suffix) = match rest.find(['-', '+']) {
            Some(at) => rest.split_at(at),
            None => (rest, ""),
        };

        let padded;
        let candidate = match core.matches('.').count() {
            dots @ (0 | 1) => {
                if !suffix.is_empty() {
                    return Err(VersionError::Parse(format!(
                        "{trimmed}: shortened version cannot carry prerelease or build metadata"
                    )));
                }
                padded = if dots == 0 {
                    format!("{core}.0.0")
                } else {
                    format!("{core}.0")
                };
                padded.as_str()
            }
            _ => rest,
        };

        let version = semver::Version::parse(candidate)
            .map_err(|err| VersionError::Parse(format!("{trimmed}: {err}")))?;
        Ok(Self(version))
    }

    /// True iff this is the zero version (0.0.0, no prerelease).
    pub fn is_zero(&self) -> bool {
        self.0 == semver::Version::new(0, 0, 0)
    }
}

impl Default for SemVer {
    fn default() -> Self {
        Self(semver::Version::new(0, 0, 0))
    }
}

impl fmt::Display for SemVer {
    /// Canonical form: `vMAJOR.MINOR.PATCH`, then `-` and the dot-joined
    /// prerelease identifiers when present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.0.major, self.0.minor, self.0.patch)?;
        if !self.0.pre.is_empty() {
            write!(f, "-{}", self.0.pre)?;
        }
        Ok(())
    }
}

impl FromStr for SemVer {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemVer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemVer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_prefixed() {
        assert_eq!(SemVer::parse("1.2.3").unwrap().to_string(), "v1.2.3");
        assert_eq!(SemVer::parse("v1.2.3").unwrap().to_string(), "v1.2.3");
        assert_eq!(SemVer::parse("V1.2.3").unwrap().to_string(), "v1.2.3");
        assert_eq!(SemVer::parse(" v1.2.3 ").unwrap().to_string(), "v1.2.3");
    }

    #[test]
    fn pads_missing_components() {
        assert_eq!(SemVer::parse("v2").unwrap(), SemVer::parse("2.0.0").unwrap());
        assert_eq!(SemVer::parse("1.4").unwrap(), SemVer::parse("1.4.0").unwrap());
    }

    #[test]
    fn parses_prerelease() {
        let v = SemVer::parse("v1.0.0-alpha.1").unwrap();
        assert_eq!(v.to_string(), "v1.0.0-alpha.1");
    }

    #[test]
    fn rejects_garbage() {
        assert!(SemVer::parse("").is_err());
        assert!(SemVer::parse("vx.y.z").is_err());
        assert!(SemVer::parse("1.two.3").is_err());
        assert!(SemVer::parse("1.2.3-").is_err());
        assert!(SemVer::parse("1.2.3.4").is_err());
    }

    #[test]
    fn rejects_short_version_with_metadata() {
        assert!(SemVer::parse("v1-alpha").is_err());
        assert!(SemVer::parse("1.2+build5").is_err());
    }

    #[test]
    fn ordering_chain() {
        let chain = ["v1.2.3", "v1.2.4", "v1.3.0", "v2.0.0"];
        for pair in chain.windows(2) {
            let lo = SemVer::parse(pair[0]).unwrap();
            let hi = SemVer::parse(pair[1]).unwrap();
            assert!(lo < hi, "{lo} should sort below {hi}");
        }
    }

    #[test]
    fn prerelease_sorts_below_release() {
        let alpha = SemVer::parse("v1.0.0-alpha").unwrap();
        let release = SemVer::parse("v1.0.0").unwrap();
        assert!(alpha < release);

        // Prefix sorts first; numeric identifiers compare numerically and
        // sort below alphanumeric ones.
        assert!(alpha < SemVer::parse("v1.0.0-alpha.1").unwrap());
        assert!(
            SemVer::parse("v1.0.0-alpha.9").unwrap() < SemVer::parse("v1.0.0-alpha.10").unwrap()
        );
        assert!(SemVer::parse("v1.0.0-1").unwrap() < SemVer::parse("v1.0.0-alpha").unwrap());
    }

    #[test]
    fn compare_is_a_total_order() {
        let versions: Vec<SemVer> = ["v1.0.0-alpha", "v1.0.0", "v1.2.3", "v2.0.0"]
            .iter()
            .map(|t| SemVer::parse(t).unwrap())
            .collect();
        for a in &versions {
            assert_eq!(a.cmp(a), std::cmp::Ordering::Equal);
            for b in &versions {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &versions {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn display_parse_round_trip() {
        for text in [
            "v0.0.0",
            "v1.2.3",
            "v10.20.30",
            "v1.0.0-alpha",
            "v1.0.0-alpha.1",
            "v1.0.0-rc.1.2",
        ] {
            let v = SemVer::parse(text).unwrap();
            assert_eq!(SemVer::parse(&v.to_string()).unwrap(), v);
            assert_eq!(v.to_string(), text);
        }
    }

    #[test]
    fn zero_check() {
        assert!(SemVer::default().is_zero());
        assert!(SemVer::parse("0.0.0").unwrap().is_zero());
        assert!(!SemVer::parse("0.0.1").unwrap().is_zero());
        assert!(!SemVer::parse("0.0.0-rc.1").unwrap().is_zero());
    }

    #[test]
    fn serde_uses_the_canonical_string() {
        let v = SemVer::parse("1.2.3-beta.2").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"v1.2.3-beta.2\"");
        let back: SemVer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
