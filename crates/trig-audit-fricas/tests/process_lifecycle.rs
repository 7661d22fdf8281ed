// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used)]
#![cfg(unix)]

use trig_audit_fricas::{FricasConfig, FricasProcess, SpawnError};

#[test]
fn missing_program_is_a_spawn_error() {
    let config = FricasConfig {
        program: "trig-audit-no-such-evaluator".to_owned(),
        ..FricasConfig::default()
    };
    let err = FricasProcess::spawn(&config).expect_err("program does not exist");
    assert!(matches!(err, SpawnError::Spawn { .. }), "{err}");
}

#[test]
fn short_banner_is_a_spawn_error() {
    // `true` ignores its arguments and exits without output.
    let config = FricasConfig {
        program: "true".to_owned(),
        ..FricasConfig::default()
    };
    let err = FricasProcess::spawn(&config).expect_err("no banner");
    assert!(matches!(err, SpawnError::Banner { lines: 17, .. }), "{err}");
}
