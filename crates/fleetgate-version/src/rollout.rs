//! Rollout cursors and the keyed-hash candidate gate.
//!
//! A rollout stage is described by two 256-bit values: a `seed` keying
//! the candidate hash and a `cursor` bounding the rolled-out fraction of
//! the identity space. A node is a candidate when the HMAC-SHA256 digest
//! of its identity, keyed by the seed, sorts at or below the cursor.

use std::fmt;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use crate::error::{VersionError, VersionResult};
use crate::identity::NodeId;

type HmacSha256 = Hmac<Sha256>;

/// A 256-bit rollout value: a gate seed or a cursor threshold.
///
/// Ordered as a big-endian unsigned integer. The textual form is
/// lowercase hex, with the all-zero value written as the empty string —
/// an unset or zero-percent cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RolloutBytes(pub [u8; 32]);

impl RolloutBytes {
    /// The maximum value; the cursor of a fully rolled-out stage.
    pub const MAX: RolloutBytes = RolloutBytes([0xff; 32]);

    /// Hex form, or the empty string for the all-zero value.
    pub fn encode(&self) -> String {
        if self.is_zero() {
            String::new()
        } else {
            hex::encode(self.0)
        }
    }

    /// Decode the hex form; the empty string is the all-zero value.
    pub fn decode(text: &str) -> VersionResult<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        let bytes = hex::decode(text)
            .map_err(|err| VersionError::Decode(format!("{text:?}: {err}")))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|rejected: Vec<u8>| {
            VersionError::Decode(format!("expected 32 bytes, got {}", rejected.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for RolloutBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for RolloutBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for RolloutBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::decode(&text).map_err(serde::de::Error::custom)
    }
}

/// The rollout stage of a requirement document.
///
/// Seed and cursor are independent values; nothing relates them
/// numerically. An omitted field decodes to zero, which gates everyone
/// out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rollout {
    /// Keys the candidate hash, so each rollout shuffles the fleet into a
    /// fresh order.
    #[serde(default)]
    pub seed: RolloutBytes,
    /// Upper bound of the currently rolled-out fraction.
    #[serde(default)]
    pub cursor: RolloutBytes,
}

/// Cursor for a percentage, preserving four decimal digits.
///
/// Computes `(MAX / 1_000_000) * round(pct * 10_000)` in 256-bit integer
/// arithmetic. Dividing before multiplying keeps the intermediate inside
/// 256 bits, at the cost of 100% landing just below `MAX` (within
/// 1_000_000) — accepted truncation, relied on by published cursors.
/// Percentages outside [0, 100] are clamped.
pub fn percentage_to_cursor(pct: f64) -> RolloutBytes {
    let units = (pct * 10_000.0).round();
    if units.is_nan() || units <= 0.0 {
        return RolloutBytes::default();
    }
    let units = (units as u64).min(1_000_000);
    let per_unit = div_scalar(&RolloutBytes::MAX.0, 1_000_000);
    RolloutBytes(mul_scalar(&per_unit, units))
}

/// Cursor for an integral percentage: `floor((MAX * pct) / 100)`.
///
/// The historical mapping. It rounds differently from
/// [`percentage_to_cursor`] and cursors already published with it must
/// keep reproducing bit-for-bit, so the two stay separate operations.
pub fn percentage_to_cursor_legacy(pct: u64) -> RolloutBytes {
    let pct = pct.min(100);
    RolloutBytes(mul_div_scalar(&RolloutBytes::MAX.0, pct, 100))
}

/// Whether `node` falls inside the rollout stage.
///
/// The digest of the identity under the seed-keyed hash is compared to
/// the cursor as a big-endian 256-bit integer, inclusive. For a fixed
/// seed the digests spread uniformly over the value space, so across a
/// large fleet the candidate fraction converges to cursor / 2^256, and a
/// different seed reshuffles which nodes come first.
///
/// The error arm surfaces as [`VersionError::Hash`]; see the variant for
/// why it is unreachable in normal operation.
pub fn is_rollout_candidate(node: &NodeId, rollout: &Rollout) -> VersionResult<bool> {
    let mut mac = HmacSha256::new_from_slice(&rollout.seed.0)
        .map_err(|err| VersionError::Hash(err.to_string()))?;
    mac.update(node.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(digest.as_slice() <= rollout.cursor.0.as_slice())
}

// 256-bit helpers over big-endian u64 limbs. The two mappings only ever
// multiply and divide by small scalars, so a carry chain and a remainder
// chain cover all the arithmetic.

fn to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

fn from_limbs(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

/// `floor(value / divisor)`.
fn div_scalar(value: &[u8; 32], divisor: u64) -> [u8; 32] {
    let limbs = to_limbs(value);
    let mut quotient = [0u64; 4];
    let mut rem: u128 = 0;
    for i in 0..4 {
        let cur = (rem << 64) | u128::from(limbs[i]);
        quotient[i] = (cur / u128::from(divisor)) as u64;
        rem = cur % u128::from(divisor);
    }
    from_limbs(&quotient)
}

/// `value * factor`; the caller keeps the product inside 256 bits.
fn mul_scalar(value: &[u8; 32], factor: u64) -> [u8; 32] {
    let limbs = to_limbs(value);
    let mut product = [0u64; 4];
    let mut carry: u128 = 0;
    for i in (0..4).rev() {
        let cur = u128::from(limbs[i]) * u128::from(factor) + carry;
        product[i] = cur as u64;
        carry = cur >> 64;
    }
    debug_assert_eq!(carry, 0);
    from_limbs(&product)
}

/// `floor((value * factor) / divisor)` through a 320-bit intermediate;
/// the quotient fits 256 bits whenever `factor <= divisor`.
fn mul_div_scalar(value: &[u8; 32], factor: u64, divisor: u64) -> [u8; 32] {
    let limbs = to_limbs(value);
    let mut wide = [0u64; 5];
    let mut carry: u128 = 0;
    for i in (0..4).rev() {
        let cur = u128::from(limbs[i]) * u128::from(factor) + carry;
        wide[i + 1] = cur as u64;
        carry = cur >> 64;
    }
    wide[0] = carry as u64;

    let mut quotient = [0u64; 5];
    let mut rem: u128 = 0;
    for i in 0..5 {
        let cur = (rem << 64) | u128::from(wide[i]);
        quotient[i] = (cur / u128::from(divisor)) as u64;
        rem = cur % u128::from(divisor);
    }
    debug_assert_eq!(quotient[0], 0);
    from_limbs(&[quotient[1], quotient[2], quotient[3], quotient[4]])
}
