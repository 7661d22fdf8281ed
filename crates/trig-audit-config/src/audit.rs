// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved settings for an audit run.

use serde::{Deserialize, Serialize};
use trig_audit_core::SweepPlan;
use trig_audit_fricas::FricasConfig;

/// Everything a run needs besides command-line overrides.
///
/// Missing fields fall back to their defaults, so a partial file such as
/// `{"sweep": {"ranges": 4}}` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// How to start and query the evaluator.
    pub fricas: FricasConfig,
    /// Where the ranges start.
    pub sweep: SweepPlan,
}

impl AuditConfig {
    /// Store key for the document.
    pub const KEY: &'static str = "audit";
}
