// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! trig-audit-core: accuracy audit of a sine/cosine/one-minus-cosine kernel.
//!
//! The crate compares the platform math library ("old") with the kernel in
//! [`kernel`] ("new") over ranges of consecutive doubles, measures both
//! against an [`Oracle`] in ULPs, and aggregates the differences into
//! per-range reports. Talking to an actual high-precision evaluator lives in
//! `trig-audit-fricas`.
#![forbid(unsafe_code)]

mod compare;
mod function;
pub mod kernel;
mod oracle;
mod range;
mod sci;
mod score;
mod ulp;

/// Per-point classification of old/new differences.
pub use compare::{is_interesting, Finding, Verdict, SIGNIFICANCE};
/// Audited functions and the implementations under comparison.
pub use function::{Function, Implementation, Kernel, Platform, SinCosOmc};
/// Reference value sources.
pub use oracle::{LibmOracle, Oracle};
/// Ranges of consecutive doubles and the sweep driver.
pub use range::{FunctionValue, Range, Sweep, SweepPlan, POINTS_IN_ONE_RANGE};
/// C-style `%W.Pe` rendering shared by the oracle protocol and reports.
pub use sci::{Sci, REPORT_PRECISION, REPORT_WIDTH};
/// Scores and per-range statistics.
pub use score::{FunctionReports, MicroReport, RangeReport, Scores};
/// ULP distance and bit-difference descriptors.
pub use ulp::{ulp_distance, ulp_magnitude, BitDifference, INCOMPARABLE};
