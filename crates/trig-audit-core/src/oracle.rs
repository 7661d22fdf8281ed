// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Source of "accurate" reference values.

use crate::function::Function;

/// Supplies accurate values for interesting points.
///
/// Implementations return NaN when no answer is available for a point; the
/// scoring math treats that as an incomparable distance instead of aborting
/// the sweep. One request is outstanding at a time, hence `&mut self`.
pub trait Oracle {
    /// Accurate value of `function` at `x`, or NaN if unavailable.
    fn accurate(&mut self, function: Function, x: f64) -> f64;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    fn accurate(&mut self, function: Function, x: f64) -> f64 {
        (**self).accurate(function, x)
    }
}

/// Reference values from the pure-Rust `libm` crate.
///
/// Not an arbitrary-precision oracle: it stands in for one in dry runs and
/// tests. One-minus-cosine uses `2·sin²(x/2)` to avoid cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibmOracle;

impl Oracle for LibmOracle {
    fn accurate(&mut self, function: Function, x: f64) -> f64 {
        match function {
            Function::Sin => libm::sin(x),
            Function::Cos => libm::cos(x),
            Function::Omc => {
                let s = libm::sin(0.5 * x);
                2.0 * s * s
            }
        }
    }
}
