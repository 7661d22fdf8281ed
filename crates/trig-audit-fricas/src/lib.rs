// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! FriCAS as an accuracy oracle.
//!
//! [`FricasProcess`] starts `fricas` with a fixed session setup (no history,
//! no prompts, 32768-bit `Float`, 21-digit output), drops the startup banner
//! and then serves one request per interesting point over the child's
//! stdin/stdout. [`OracleClient`] holds the protocol itself and works over
//! any writer/reader pair, which is how the tests drive it with scripted
//! replies.
//!
//! Per-request failures never abort a sweep: they come back as NaN and are
//! logged. Only startup failures are errors.
#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod process;

pub use client::{parse_value, OracleClient};
pub use config::{FricasConfig, RequestNames, RequestTemplate};
pub use error::{CloseError, EvalError, SpawnError};
pub use process::FricasProcess;
