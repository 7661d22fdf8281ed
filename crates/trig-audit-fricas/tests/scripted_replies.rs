// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::{self, Cursor, Write};

use trig_audit_core::Function;
use trig_audit_fricas::{EvalError, FricasConfig, OracleClient, RequestTemplate};

fn sin_template() -> RequestTemplate {
    FricasConfig::default().template(Function::Sin)
}

fn scripted(reply: &str) -> OracleClient<Vec<u8>, Cursor<Vec<u8>>> {
    OracleClient::new(Vec::new(), Cursor::new(reply.as_bytes().to_vec()))
}

/// A writer whose every write fails, as a closed pipe would.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}

#[test]
fn positive_reply_parses() {
    let mut client = scripted("(1)  0.33000000000000000000000E1\n");
    assert_eq!(client.evaluate(&sin_template(), 3.3), 3.3);
}

#[test]
fn negative_reply_with_stray_space_parses() {
    let mut client = scripted("(1)  - 0.33000000000000000000000E1\n");
    assert_eq!(client.evaluate(&sin_template(), -3.3), -3.3);
}

#[test]
fn request_line_is_written_and_flushed() {
    let mut client = scripted("(7)  0.5E0\n");
    assert_eq!(client.evaluate(&sin_template(), 0.5), 0.5);
    let (written, _) = client.into_parts();
    assert_eq!(
        String::from_utf8(written).expect("utf8 request"),
        "cnf_sin( 5.00000000000000000000e-01)$CNF\n"
    );
}

#[test]
fn consecutive_replies_stay_in_step() {
    let mut client = scripted("(12)  0.1E1\n(13)  - 0.2E1\n(14)  0.3E1\n");
    let t = sin_template();
    assert_eq!(client.evaluate(&t, 1.0), 1.0);
    assert_eq!(client.evaluate(&t, 2.0), -2.0);
    assert_eq!(client.evaluate(&t, 3.0), 3.0);
}

#[test]
fn truncated_streams_yield_nan() {
    for reply in ["", "(1", "(1)", "(1) ", "(1)  0.33E1"] {
        let mut client = scripted(reply);
        assert!(client.evaluate(&sin_template(), 3.3).is_nan(), "{reply:?}");
    }
}

#[test]
fn truncated_streams_report_eof() {
    let mut client = scripted("(1)");
    assert!(matches!(
        client.try_evaluate(&sin_template(), 3.3),
        Err(EvalError::Eof(_))
    ));
}

#[test]
fn malformed_value_yields_nan_and_keeps_channel_usable() {
    let mut client = scripted("(1)  Cannot find a definition\n(2)  0.25E0\n");
    let t = sin_template();
    assert!(client.evaluate(&t, 1.0).is_nan());
    assert_eq!(client.evaluate(&t, 1.0), 0.25);
}

#[test]
fn failed_request_yields_nan() {
    let mut client = OracleClient::new(BrokenPipe, Cursor::new(b"(1)  0.1E1\n".to_vec()));
    assert!(matches!(
        client.try_evaluate(&sin_template(), 1.0),
        Err(EvalError::Request(_))
    ));
    assert!(client.evaluate(&sin_template(), 1.0).is_nan());
}

#[test]
fn banner_lines_are_discarded_before_first_reply() {
    let mut banner = String::new();
    for i in 0..17 {
        banner.push_str(&format!("FriCAS banner line {i} (with parens)\n"));
    }
    banner.push_str("(1)  0.75E0\n");
    let mut client = scripted(&banner);
    client.skip_banner(17).expect("banner present");
    assert_eq!(client.evaluate(&sin_template(), 0.75), 0.75);
}
