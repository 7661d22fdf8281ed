// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for the FriCAS oracle.

use std::io;

use thiserror::Error;

/// The evaluator could not be brought up. Fatal for a run.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The process could not be started (missing from `PATH`, not executable).
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// Program that was started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The child was started without one of its standard streams.
    #[error("evaluator {0} pipe unavailable")]
    MissingPipe(&'static str),
    /// The startup banner ended early or could not be read.
    #[error("failed to discard {lines} startup lines: {source}")]
    Banner {
        /// Number of lines that were expected.
        lines: usize,
        /// Underlying read error (`UnexpectedEof` when the stream ended).
        #[source]
        source: io::Error,
    },
}

/// A single request produced no value. Absorbed into NaN by
/// [`crate::OracleClient::evaluate`].
#[derive(Debug, Error)]
pub enum EvalError {
    /// Writing or flushing the request failed.
    #[error("request failed: {0}")]
    Request(#[source] io::Error),
    /// Reading the reply failed.
    #[error("reply read failed: {0}")]
    Reply(#[source] io::Error),
    /// The reply stream ended before the named part of the reply.
    #[error("reply stream ended before {0}")]
    Eof(&'static str),
    /// The value line does not start with a decimal floating-point literal.
    #[error("unparsable value line {0:?}")]
    Unparsable(String),
}

/// Closing the evaluator's pipes failed. Reported, not fatal: results
/// gathered so far remain valid.
#[derive(Debug, Error)]
#[error("failed to close evaluator pipes: {source}")]
pub struct CloseError {
    /// First failure hit while closing.
    #[from]
    pub source: io::Error,
}
