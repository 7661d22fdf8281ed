// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Request/reply engine for the evaluator's text protocol.
//!
//! Replies look like this (note the space after the minus sign):
//!
//! ```text
//! (13)  0.330000000000000000000E1
//! (1)  - 0.330000000000000000000E1
//! ```
//!
//! The client skips up to and including `)`, drops two more bytes, and
//! parses the rest of the line.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::config::RequestTemplate;
use crate::error::EvalError;

/// Protocol client over a request writer and a reply reader.
///
/// Strictly one request in flight: `evaluate` writes a request and consumes
/// its whole reply before returning.
#[derive(Debug)]
pub struct OracleClient<W, R> {
    writer: W,
    reader: R,
}

impl<W: Write, R: BufRead> OracleClient<W, R> {
    /// Wraps an already connected pair of streams.
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    /// Reads and drops `lines` newline-terminated lines.
    pub fn skip_banner(&mut self, lines: usize) -> io::Result<()> {
        let mut buf = Vec::new();
        for _ in 0..lines {
            buf.clear();
            self.reader.read_until(b'\n', &mut buf)?;
            if buf.last() != Some(&b'\n') {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
        }
        Ok(())
    }

    /// Evaluates `template` at `x`, returning NaN when no value could be
    /// obtained. The failure is logged and the channel stays open.
    pub fn evaluate(&mut self, template: &RequestTemplate, x: f64) -> f64 {
        match self.try_evaluate(template, x) {
            Ok(v) => v,
            Err(err) => {
                warn!(function = %template.function, x, error = %err, "oracle unavailable for point");
                f64::NAN
            }
        }
    }

    /// Evaluates `template` at `x`.
    pub fn try_evaluate(&mut self, template: &RequestTemplate, x: f64) -> Result<f64, EvalError> {
        self.writer
            .write_all(template.render(x).as_bytes())
            .map_err(EvalError::Request)?;
        self.writer.flush().map_err(EvalError::Request)?;

        // Statement number, e.g. "(13)".
        let mut prefix = Vec::new();
        self.reader
            .read_until(b')', &mut prefix)
            .map_err(EvalError::Reply)?;
        if prefix.last() != Some(&b')') {
            return Err(EvalError::Eof("statement number"));
        }

        let mut gap = [0_u8; 2];
        self.reader.read_exact(&mut gap).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                EvalError::Eof("value")
            } else {
                EvalError::Reply(e)
            }
        })?;

        let mut line = Vec::new();
        self.reader
            .read_until(b'\n', &mut line)
            .map_err(EvalError::Reply)?;
        if line.last() != Some(&b'\n') {
            return Err(EvalError::Eof("end of value line"));
        }
        parse_value(&line)
    }

    /// Releases the streams.
    pub fn into_parts(self) -> (W, R) {
        (self.writer, self.reader)
    }
}

/// Parses a reply value line, accepting the longest leading decimal
/// literal. `"- 0.5E1"` is read as `-0.5E1`.
pub fn parse_value(line: &[u8]) -> Result<f64, EvalError> {
    let text = String::from_utf8_lossy(line);
    let trimmed = text.trim();
    let owned;
    let text = match trimmed.strip_prefix("- ") {
        Some(rest) => {
            owned = format!("-{rest}");
            owned.as_str()
        }
        None => trimmed,
    };

    let candidate_len = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let candidate = &text[..candidate_len];
    (1..=candidate.len())
        .rev()
        .find_map(|n| candidate[..n].parse::<f64>().ok())
        .ok_or_else(|| EvalError::Unparsable(trimmed.to_owned()))
}
