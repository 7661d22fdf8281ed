// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! ULP distance and bit-level difference descriptors for `f64`.
//!
//! This is the only place that reinterprets float bit patterns.

use core::fmt;

/// Distance returned when either operand is NaN ("incomparable").
pub const INCOMPARABLE: i64 = i64::MAX;

const SIGN_BIT: u64 = 1 << 63;

/// Sign and biased exponent: the top 12 bits of a binary64 pattern.
const SIGN_EXPONENT_MASK: u64 = 0xfff0_0000_0000_0000;

/// Maps a bit pattern onto a signed integer line that is monotonic in the
/// float's value; `+0.0` and `-0.0` both map to 0.
fn ordered(bits: u64) -> i64 {
    let magnitude = (bits & !SIGN_BIT) as i64;
    if bits & SIGN_BIT == 0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Signed ULP distance from `y` to `x`.
///
/// Positive when `x` lies above `y`, negative when below; the magnitude is
/// the number of representable doubles between them. Across a sign change
/// the distance bridges through zero, so `ulp_distance(0.0, -0.0) == 0`.
///
/// If either operand is NaN the result is [`INCOMPARABLE`]. The result is
/// clamped to `±i64::MAX`, which only matters for distances spanning
/// infinities of opposite sign.
pub fn ulp_distance(x: f64, y: f64) -> i64 {
    if x.is_nan() || y.is_nan() {
        return INCOMPARABLE;
    }
    ordered(x.to_bits())
        .saturating_sub(ordered(y.to_bits()))
        .max(-i64::MAX)
}

/// Unsigned ULP distance between `x` and `y` ([`INCOMPARABLE`] for NaN).
pub fn ulp_magnitude(x: f64, y: f64) -> i64 {
    ulp_distance(x, y).abs()
}

/// How two bit patterns differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BitDifference {
    /// Sign or exponent bits differ.
    ExponentOrSign,
    /// Same sign and exponent; the mantissas differ in the low `bits` bits.
    Mantissa {
        /// Bit length of `|bits(old) - bits(new)|`.
        bits: u32,
    },
}

impl BitDifference {
    /// Describes how the bit patterns of `old` and `new` differ.
    pub fn between(old: f64, new: f64) -> Self {
        let (a, b) = (old.to_bits(), new.to_bits());
        if (a ^ b) & SIGN_EXPONENT_MASK != 0 {
            return BitDifference::ExponentOrSign;
        }
        let d = a.wrapping_sub(b) as i64;
        let d = d.unsigned_abs();
        BitDifference::Mantissa {
            bits: (u64::BITS - d.leading_zeros()).max(1),
        }
    }
}

impl fmt::Display for BitDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitDifference::ExponentOrSign => f.pad("Exponents or signs differ !"),
            BitDifference::Mantissa { bits } => {
                f.pad(&format!("Mantissas differ in {bits:2} bits"))
            }
        }
    }
}
