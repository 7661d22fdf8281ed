// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Ranges of consecutive doubles and the sweep that fills them.

use core::f64::consts::PI;

use crate::compare::{is_interesting, Finding};
use crate::function::{Function, Implementation};
use crate::oracle::Oracle;

/// Number of consecutive representable doubles checked per range.
pub const POINTS_IN_ONE_RANGE: usize = 32;

/// Old, new and (for interesting points) accurate values of one function at
/// one point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FunctionValue {
    /// Platform value.
    pub old: f64,
    /// Kernel value.
    pub new: f64,
    /// Oracle value; only fetched when `old` and `new` differ in some bit.
    pub accurate: Option<f64>,
}

/// A block of [`POINTS_IN_ONE_RANGE`] successive doubles.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    /// First point and one-past-last point, both reached by `next_up`.
    pub limits: [f64; 2],
    /// Values indexed by `[point][function.index()]`.
    pub values: [[FunctionValue; Function::COUNT]; POINTS_IN_ONE_RANGE],
}

impl Range {
    /// Evaluates both implementations at every point of the range starting
    /// at `start`, asks `oracle` for the accurate value of each interesting
    /// function value, and hands every significant difference to `sink` as
    /// soon as it is found.
    pub fn sweep<O, N, R, S>(start: f64, old: &O, new: &N, oracle: &mut R, sink: &mut S) -> Self
    where
        O: Implementation + ?Sized,
        N: Implementation + ?Sized,
        R: Oracle + ?Sized,
        S: FnMut(Finding),
    {
        let mut values = [[FunctionValue::default(); Function::COUNT]; POINTS_IN_ONE_RANGE];
        let mut x = start;
        for point in &mut values {
            let a = old.evaluate(x);
            let b = new.evaluate(x);
            for function in Function::ALL {
                let slot = &mut point[function.index()];
                slot.old = a[function];
                slot.new = b[function];
                if is_interesting(slot.old, slot.new) {
                    let accurate = oracle.accurate(function, x);
                    slot.accurate = Some(accurate);
                    if let Some(finding) =
                        Finding::assess(function, x, slot.old, slot.new, accurate)
                    {
                        sink(finding);
                    }
                }
            }
            x = x.next_up();
        }
        Self {
            limits: [start, x],
            values,
        }
    }

    /// Values of `function` at every point of the range, in order.
    pub fn column(&self, function: Function) -> impl Iterator<Item = &FunctionValue> + '_ {
        self.values.iter().map(move |point| &point[function.index()])
    }
}

/// Where ranges start: `start + step·i` for `i` in `0..ranges`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepPlan {
    /// Start of the first range.
    pub start: f64,
    /// Spacing between range starts.
    pub step: f64,
    /// Number of ranges.
    pub ranges: usize,
}

impl SweepPlan {
    /// Ranges spread over roughly `[-4π, 4π]`, one every 1/32.
    pub fn symmetric_four_pi() -> Self {
        const FOUR_PI: f64 = 4.0 * PI;
        const STEP: f64 = 0.03125;
        let half = ((FOUR_PI + 0.5) / STEP + 0.5) as usize;
        Self {
            start: -FOUR_PI,
            step: STEP,
            ranges: 2 * half + 1,
        }
    }

    /// Start of range `i`.
    pub fn range_start(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self::symmetric_four_pi()
    }
}

/// The ranges collected by one run.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    ranges: Vec<Range>,
}

impl Sweep {
    /// Runs every range of `plan`, streaming findings to `sink`.
    pub fn run<O, N, R, S>(plan: &SweepPlan, old: &O, new: &N, oracle: &mut R, mut sink: S) -> Self
    where
        O: Implementation + ?Sized,
        N: Implementation + ?Sized,
        R: Oracle + ?Sized,
        S: FnMut(Finding),
    {
        let ranges = (0..plan.ranges)
            .map(|i| Range::sweep(plan.range_start(i), old, new, &mut *oracle, &mut sink))
            .collect();
        Self { ranges }
    }

    /// Wraps already collected ranges.
    pub fn from_ranges(ranges: Vec<Range>) -> Self {
        Self { ranges }
    }

    /// Collected ranges, in sweep order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}
