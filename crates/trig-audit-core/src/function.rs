// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! The audited function set and the two implementations being compared.

use core::fmt;
use core::ops::Index;

use crate::kernel;

/// One of the three audited functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// One minus cosine.
    Omc,
}

impl Function {
    /// Every audited function, in report order.
    pub const ALL: [Function; 3] = [Function::Sin, Function::Cos, Function::Omc];

    /// Number of audited functions.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable index into per-function tables.
    pub const fn index(self) -> usize {
        match self {
            Function::Sin => 0,
            Function::Cos => 1,
            Function::Omc => 2,
        }
    }

    /// Short name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Omc => "omc",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Sine, cosine and one-minus-cosine at a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinCosOmc {
    /// `sin(x)`.
    pub sin: f64,
    /// `cos(x)`.
    pub cos: f64,
    /// `1 - cos(x)`.
    pub omc: f64,
}

impl Index<Function> for SinCosOmc {
    type Output = f64;

    fn index(&self, function: Function) -> &f64 {
        match function {
            Function::Sin => &self.sin,
            Function::Cos => &self.cos,
            Function::Omc => &self.omc,
        }
    }
}

/// Something that produces all three function values for an input.
pub trait Implementation {
    /// Evaluates sine, cosine and one-minus-cosine at `x`.
    fn evaluate(&self, x: f64) -> SinCosOmc;
}

/// The platform math library: `f64::sin`, `f64::cos`, and `1 - cos` by
/// plain subtraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Platform;

impl Implementation for Platform {
    fn evaluate(&self, x: f64) -> SinCosOmc {
        let cos = x.cos();
        SinCosOmc {
            sin: x.sin(),
            cos,
            omc: 1.0 - cos,
        }
    }
}

/// The candidate kernel from [`crate::kernel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Kernel;

impl Implementation for Kernel {
    fn evaluate(&self, x: f64) -> SinCosOmc {
        kernel::sin_cos_omc(x)
    }
}
