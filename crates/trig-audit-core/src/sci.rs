// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! C-style scientific rendering (`%W.Pe`) for doubles.
//!
//! Rust's `{:e}` writes `3.3e0`; the oracle protocol and the text report use
//! the C layout `3.30e+00` (explicit exponent sign, at least two exponent
//! digits).

use core::fmt;

/// Width and precision of the `%27.20e` layout (21 significant digits).
pub const REPORT_WIDTH: usize = 27;
/// Digits after the decimal point in the `%27.20e` layout.
pub const REPORT_PRECISION: usize = 20;

/// Display adapter rendering a double as C's `%W.Pe`.
#[derive(Debug, Clone, Copy)]
pub struct Sci {
    value: f64,
    width: usize,
    precision: usize,
}

impl Sci {
    /// `%27.20e`, the layout used by both the oracle requests and the report.
    pub const fn report(value: f64) -> Self {
        Self {
            value,
            width: REPORT_WIDTH,
            precision: REPORT_PRECISION,
        }
    }

    /// Arbitrary `%{width}.{precision}e`.
    pub const fn new(value: f64, width: usize, precision: usize) -> Self {
        Self {
            value,
            width,
            precision,
        }
    }
}

impl fmt::Display for Sci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        let text = if v.is_nan() {
            "nan".to_owned()
        } else if v.is_infinite() {
            if v < 0.0 { "-inf" } else { "inf" }.to_owned()
        } else {
            let rust = format!("{:.*e}", self.precision, v);
            match rust.split_once('e') {
                Some((mantissa, exp)) => {
                    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
                    let sign = if exp < 0 { '-' } else { '+' };
                    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
                }
                None => rust,
            }
        };
        write!(f, "{text:>width$}", width = self.width)
    }
}
