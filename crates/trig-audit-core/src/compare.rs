// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Per-point comparison of the old and new implementations.
//!
//! A point is *interesting* for a function when the two implementations
//! disagree in any bit. Only interesting points are sent to the oracle, and
//! among those a point gets a verdict when one side is closer to the
//! accurate value by more than [`SIGNIFICANCE`] in relative terms.

use core::fmt;

use crate::function::Function;
use crate::ulp::{ulp_distance, ulp_magnitude, BitDifference};

/// Relative threshold for a verdict. Positive and close to zero.
pub const SIGNIFICANCE: f64 = 1e-7;

/// Whether old and new differ at the bit level (ULP distance non-zero).
pub fn is_interesting(old: f64, new: f64) -> bool {
    ulp_distance(old, new) != 0
}

/// Outcome of a significant difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verdict {
    /// The new value is closer to the accurate value.
    Better,
    /// The new value is further from the accurate value.
    Worse,
}

impl Verdict {
    /// Classifies `old` and `new` against `accurate`.
    ///
    /// Returns `None` when neither side wins by more than [`SIGNIFICANCE`].
    /// A NaN `accurate` makes both distances incomparable and never yields a
    /// verdict.
    pub fn classify(old: f64, new: f64, accurate: f64) -> Option<Self> {
        let ac_old = ulp_magnitude(old, accurate);
        let ac_new = ulp_magnitude(new, accurate);
        if (ac_old - ac_new) as f64 / ac_new as f64 > SIGNIFICANCE {
            return Some(Verdict::Better);
        }
        if (ac_new - ac_old) as f64 / ac_old as f64 > SIGNIFICANCE {
            return Some(Verdict::Worse);
        }
        None
    }

    /// Report label.
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Better => "better",
            Verdict::Worse => "worse",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A point where old and new differ significantly, emitted during a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Finding {
    /// Which side is closer to the accurate value.
    pub verdict: Verdict,
    /// Input point.
    pub x: f64,
    /// Function evaluated at `x`.
    pub function: Function,
    /// Bit-level shape of the old/new difference.
    pub about: BitDifference,
    /// Signed ULP distance from new to old.
    pub distance: i64,
    /// Platform value.
    pub old: f64,
    /// Kernel value.
    pub new: f64,
    /// Oracle value (NaN when the oracle was unavailable).
    pub accurate: f64,
}

impl Finding {
    /// Builds a finding for an interesting point, or `None` when the point
    /// does not earn a verdict.
    pub fn assess(function: Function, x: f64, old: f64, new: f64, accurate: f64) -> Option<Self> {
        let verdict = Verdict::classify(old, new, accurate)?;
        Some(Self {
            verdict,
            x,
            function,
            about: BitDifference::between(old, new),
            distance: ulp_distance(old, new),
            old,
            new,
            accurate,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn ulps_above(x: f64, n: u64) -> f64 {
        f64::from_bits(x.to_bits() + n)
    }

    #[test]
    fn identical_bits_are_not_interesting() {
        assert!(!is_interesting(0.5, 0.5));
        assert!(!is_interesting(0.0, -0.0));
        assert!(is_interesting(0.5, 0.5_f64.next_up()));
        assert!(is_interesting(f64::NAN, f64::NAN));
    }

    #[test]
    fn closer_new_value_is_better() {
        let accurate = 0.75;
        let old = ulps_above(accurate, 4);
        let new = ulps_above(accurate, 1);
        assert_eq!(Verdict::classify(old, new, accurate), Some(Verdict::Better));
        assert_eq!(Verdict::classify(new, old, accurate), Some(Verdict::Worse));
    }

    #[test]
    fn exact_new_value_is_better() {
        let accurate = 0.75;
        let old = ulps_above(accurate, 1);
        assert_eq!(
            Verdict::classify(old, accurate, accurate),
            Some(Verdict::Better)
        );
    }

    #[test]
    fn equidistant_values_get_no_verdict() {
        let accurate = 0.75_f64;
        let old = ulps_above(accurate, 2);
        let new = f64::from_bits(accurate.to_bits() - 2);
        assert_eq!(Verdict::classify(old, new, accurate), None);
    }

    #[test]
    fn unavailable_oracle_disables_verdicts() {
        assert_eq!(Verdict::classify(0.5, 0.5_f64.next_up(), f64::NAN), None);
    }

    #[test]
    fn finding_carries_descriptor_and_distance() {
        let accurate = 0.75;
        let old = ulps_above(accurate, 9);
        let f = Finding::assess(Function::Cos, 2.0, old, accurate, accurate)
            .expect("exact kernel value must be better");
        assert_eq!(f.verdict, Verdict::Better);
        assert_eq!(f.distance, 9);
        assert_eq!(f.about, BitDifference::Mantissa { bits: 4 });
    }
}
