// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Simultaneous sine, cosine and one-minus-cosine for `f64`.
//!
//! The kernel is derived from the Cephes `sin`/`cos` pair (Stephen L.
//! Moshier) with the polynomials left untouched. The goal is an accurate
//! `1 - cos(x)`; sine and cosine fall out of the same reduction.
//!
//! Strategy:
//! - octant reduction by `4/π`, rounding odd octants up so reduction zeros
//!   land on the true zeros of sine and cosine
//! - Cody–Waite style reduction with a three-term split of `π/4`
//! - two degree-6 minimax polynomials in `z²`: one for `sin(z) - z`, one for
//!   `1 - cos(z)`
//! - quadrant reassembly that derives `cos`/`omc` from each other instead of
//!   recomputing either
//!
//! Every step is plain IEEE-754 arithmetic in a fixed order (Rust never
//! contracts into FMA), so the output is bit-reproducible.
//!
//! The reduction is not correct for arguments of huge magnitude; that needs
//! Payne–Hanek style reduction.

use crate::function::SinCosOmc;

const FOUR_OVER_PI: f64 = 1.27323954473516268615;

/// `π/4` split into three decreasing parts for extended-precision reduction.
const DP1: f64 = 7.85398125648498535156E-1;
const DP2: f64 = 3.77489470793079817668E-8;
const DP3: f64 = 2.69515142907905952645E-15;

/// Coefficients of `(sin(z) - z) / z³` in `z²`, highest degree first.
const SIN_COEF: [f64; 6] = [
    1.58962301576546568060E-10,
    -2.50507477628578072866E-8,
    2.75573136213857245213E-6,
    -1.98412698295895385996E-4,
    8.33333333332211858878E-3,
    -1.66666666666666307295E-1,
];

/// Coefficients of `(z²/2 - (1 - cos(z))) / z⁴` in `z²`, highest degree first.
const COS_COEF: [f64; 6] = [
    -1.13585365213876817300E-11,
    2.08757008419747316778E-9,
    -2.75573141792967388112E-7,
    2.48015872888517045348E-5,
    -1.38888888888730564116E-3,
    4.16666666666665929218E-2,
];

#[inline]
fn horner(coef: &[f64; 6], zz: f64) -> f64 {
    ((((coef[0] * zz + coef[1]) * zz + coef[2]) * zz + coef[3]) * zz + coef[4]) * zz + coef[5]
}

/// Returns `sin(x)`, `cos(x)` and `1 - cos(x)` in one evaluation.
///
/// - `±0.0` yields `sin = ±0.0`, `cos = 1`, `omc = 0`.
/// - NaN propagates to all three outputs.
/// - `±∞` yields `x - x` (a quiet NaN) in all three outputs.
pub fn sin_cos_omc(x: f64) -> SinCosOmc {
    if x == 0.0 {
        return SinCosOmc {
            sin: x,
            cos: 1.0,
            omc: 0.0,
        };
    }
    if x.is_nan() {
        return SinCosOmc {
            sin: x,
            cos: x,
            omc: x,
        };
    }
    if x.is_infinite() {
        let nan = x - x;
        return SinCosOmc {
            sin: nan,
            cos: nan,
            omc: nan,
        };
    }

    let mut negate_sin = x.is_sign_negative();
    let x = x.abs();

    let mut j = (x * FOUR_OVER_PI) as i64;
    let mut y = j as f64;
    // Map zeros to origin.
    if j & 1 == 1 {
        j += 1;
        y += 1.0;
    }
    // Octant modulo one turn.
    j &= 7;
    let mut negate_cos = false;
    // Reflect in the x axis.
    if j > 3 {
        negate_sin = !negate_sin;
        negate_cos = !negate_cos;
        j -= 4;
    }
    if j > 1 {
        negate_cos = !negate_cos;
    }

    let z = ((x - y * DP1) - y * DP2) - y * DP3;
    let zz = z * z;
    let mut sin = z + zz * z * horner(&SIN_COEF, zz);
    let mut omc = 0.5 * zz - zz * zz * horner(&COS_COEF, zz);
    let cos;

    if j == 1 || j == 2 {
        if negate_cos {
            sin = -sin;
        }
        cos = sin;
        sin = 1.0 - omc;
        omc = 1.0 - cos;
    } else if negate_cos {
        cos = omc - 1.0;
        omc = 1.0 - cos;
    } else {
        cos = 1.0 - omc;
    }

    if negate_sin {
        sin = -sin;
    }
    SinCosOmc { sin, cos, omc }
}
