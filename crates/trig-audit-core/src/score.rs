// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Improvement scores and per-range statistics.
//!
//! For a changed point the *iscore* is `|ulp(old, accurate)| - |ulp(new,
//! accurate)|`: positive when the new value is closer. The *fscore* divides
//! it by the new value's distance, giving a relative improvement.
//!
//! Each range with at least one scored point produces a [`RangeReport`] with
//! separate [`MicroReport`]s for improvements and worsenings.

use crate::function::Function;
use crate::range::{FunctionValue, Range, Sweep};
use crate::ulp::ulp_magnitude;

/// Absolute and relative improvement of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    /// ULP improvement (positive: new is closer).
    pub iscore: i64,
    /// `iscore` relative to the new value's ULP distance.
    pub fscore: f64,
}

impl Scores {
    /// Scores a point against its accurate value.
    pub fn of(old: f64, new: f64, accurate: f64) -> Self {
        let ac_old = ulp_magnitude(old, accurate);
        let ac_new = ulp_magnitude(new, accurate);
        let iscore = ac_old - ac_new;
        Self {
            iscore,
            fscore: iscore as f64 / ac_new as f64,
        }
    }

    /// Scores a recorded value, or `None` when it does not count: old and
    /// new compare equal, or no accurate value was fetched for it.
    pub fn of_value(value: &FunctionValue) -> Option<Self> {
        if value.old == value.new {
            return None;
        }
        let accurate = value.accurate?;
        Some(Self::of(value.old, value.new, accurate))
    }
}

/// Statistics for the improving (or worsening) points of one range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MicroReport {
    /// Number of points.
    pub count: u32,
    /// Most extreme iscore seen.
    pub max: i64,
    /// Largest fscore by magnitude, sign kept.
    pub max_score: f64,
    /// Quadratic mean of the fscores once finalized; running sum of squares
    /// before that. NaN for an empty bucket.
    pub mean_square: f64,
}

impl MicroReport {
    /// Adds one point.
    ///
    /// The iscore extreme uses a sign-aware rule: a non-negative score
    /// replaces a smaller running value, and a non-positive score replaces
    /// the running value when it is not above it. The fscore extreme compares
    /// magnitudes with strict `<`, so the first of equal magnitudes wins.
    pub fn update(&mut self, iscore: i64, fscore: f64) {
        self.count += 1;
        self.mean_square += fscore * fscore;
        if (0 <= iscore && self.max < iscore) || (iscore <= 0 && iscore <= self.max) {
            self.max = iscore;
        }
        if self.max_score.copysign(1.0) < fscore.copysign(1.0) {
            self.max_score = fscore;
        }
    }

    fn finalize(&mut self) {
        self.mean_square = (self.mean_square / f64::from(self.count)).sqrt();
    }
}

/// Statistics of one function over one range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeReport {
    /// Limits of the source range.
    pub limits: [f64; 2],
    /// Points where the new value is closer.
    pub improvements: MicroReport,
    /// Points where the new value is further.
    pub worsenings: MicroReport,
    /// Arithmetic mean of the fscores of all scored points.
    pub mean_relative: f64,
}

impl RangeReport {
    /// Builds the report for `function` over `range`, or `None` when no
    /// point of the range has a non-zero iscore.
    pub fn build(range: &Range, function: Function) -> Option<Self> {
        let mut report = Self {
            limits: range.limits,
            improvements: MicroReport::default(),
            worsenings: MicroReport::default(),
            mean_relative: 0.0,
        };
        let mut any = false;
        for s in range.column(function).filter_map(Scores::of_value) {
            if s.iscore == 0 {
                continue;
            }
            any = true;
            if s.iscore > 0 {
                report.improvements.update(s.iscore, s.fscore);
            } else {
                report.worsenings.update(s.iscore, s.fscore);
            }
            report.mean_relative += s.fscore;
        }
        if !any {
            return None;
        }
        report.improvements.finalize();
        report.worsenings.finalize();
        report.mean_relative /= f64::from(report.improvements.count + report.worsenings.count);
        Some(report)
    }
}

/// Range reports for every function, in sweep order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionReports {
    by_function: [Vec<RangeReport>; Function::COUNT],
}

impl FunctionReports {
    /// Aggregates every range of a finished sweep in one pass.
    pub fn aggregate(sweep: &Sweep) -> Self {
        let mut by_function: [Vec<RangeReport>; Function::COUNT] = Default::default();
        for range in sweep.ranges() {
            for function in Function::ALL {
                if let Some(report) = RangeReport::build(range, function) {
                    by_function[function.index()].push(report);
                }
            }
        }
        Self { by_function }
    }

    /// Reports for one function; empty when old and new never differed.
    pub fn get(&self, function: Function) -> &[RangeReport] {
        &self.by_function[function.index()]
    }

    /// `(function, reports)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Function, &[RangeReport])> + '_ {
        Function::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_max_prefers_larger_positive_scores() {
        let mut r = MicroReport::default();
        r.update(3, 0.5);
        r.update(7, 0.25);
        r.update(5, 2.0);
        assert_eq!(r.count, 3);
        assert_eq!(r.max, 7);
        assert_eq!(r.max_score, 2.0);
    }

    #[test]
    fn running_max_tracks_most_negative_score() {
        let mut r = MicroReport::default();
        r.update(-2, -0.5);
        r.update(-6, -0.25);
        r.update(-4, -0.75);
        assert_eq!(r.max, -6);
        assert_eq!(r.max_score, -0.75);
    }

    #[test]
    fn max_score_compares_magnitudes() {
        let mut r = MicroReport::default();
        r.update(1, 0.5);
        r.update(-1, -0.5);
        assert_eq!(r.max_score, 0.5);
        r.update(-1, -0.6);
        assert_eq!(r.max_score, -0.6);
    }

    #[test]
    fn scores_of_unchanged_value_are_skipped() {
        let v = FunctionValue {
            old: 0.5,
            new: 0.5,
            accurate: Some(0.5),
        };
        assert_eq!(Scores::of_value(&v), None);
        let v = FunctionValue {
            old: 0.5,
            new: 0.5_f64.next_up(),
            accurate: None,
        };
        assert_eq!(Scores::of_value(&v), None);
    }

    #[test]
    fn nan_accurate_scores_zero() {
        let s = Scores::of(0.5, 0.5_f64.next_up(), f64::NAN);
        assert_eq!(s.iscore, 0);
    }
}
