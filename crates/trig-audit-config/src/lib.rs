// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! trig-audit-config: persisted settings for audit runs.
//!
//! A [`ConfigService`] serializes values as JSON and hands the bytes to a
//! [`ConfigStore`]; [`FsConfigStore`] keeps them as `<key>.json` files under
//! the platform config directory. [`AuditConfig`] is the document the CLI
//! loads and saves.
#![forbid(unsafe_code)]

mod audit;
mod fs;
mod service;

pub use audit::AuditConfig;
pub use fs::FsConfigStore;
pub use service::{ConfigError, ConfigService, ConfigStore};
