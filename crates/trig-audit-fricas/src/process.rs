// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The spawned FriCAS process.

use std::io::{BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, info, warn};
use trig_audit_core::{Function, Oracle};

use crate::client::OracleClient;
use crate::config::{FricasConfig, RequestTemplate};
use crate::error::{CloseError, SpawnError};

type PipeClient = OracleClient<BufWriter<ChildStdin>, BufReader<ChildStdout>>;

/// A running evaluator with its request templates.
///
/// Release it with [`FricasProcess::close`]; dropping it leaves the child
/// running until its stdin closes.
#[derive(Debug)]
pub struct FricasProcess {
    child: Child,
    client: PipeClient,
    templates: [RequestTemplate; Function::COUNT],
}

impl FricasProcess {
    /// Spawns the evaluator, configures the session and discards the banner.
    pub fn spawn(config: &FricasConfig) -> Result<Self, SpawnError> {
        let mut cmd = Command::new(&config.program);
        cmd.arg("-nosman");
        for eval in config.startup_commands() {
            cmd.arg("-eval").arg(eval);
        }
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| SpawnError::Spawn {
                program: config.program.clone(),
                source,
            })?;
        info!(program = %config.program, pid = child.id(), bits = config.bits, "spawned evaluator");

        let Some(stdin) = child.stdin.take() else {
            reap(&mut child);
            return Err(SpawnError::MissingPipe("stdin"));
        };
        let Some(stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(SpawnError::MissingPipe("stdout"));
        };
        let mut client = OracleClient::new(BufWriter::new(stdin), BufReader::new(stdout));

        if let Err(source) = client.skip_banner(config.startup_lines) {
            reap(&mut child);
            return Err(SpawnError::Banner {
                lines: config.startup_lines,
                source,
            });
        }
        debug!(lines = config.startup_lines, "discarded evaluator banner");

        Ok(Self {
            child,
            client,
            templates: Function::ALL.map(|f| config.template(f)),
        })
    }

    /// Closes both pipes and reaps the child.
    ///
    /// Fails if either pipe fails to close, without saying which.
    pub fn close(self) -> Result<(), CloseError> {
        let Self {
            mut child, client, ..
        } = self;
        let (mut writer, reader) = client.into_parts();
        let flushed = writer.flush();
        drop(writer);
        drop(reader);
        reap(&mut child);
        flushed?;
        Ok(())
    }
}

impl Oracle for FricasProcess {
    fn accurate(&mut self, function: Function, x: f64) -> f64 {
        self.client.evaluate(&self.templates[function.index()], x)
    }
}

/// Terminates the child if it is still running and waits for it.
fn reap(child: &mut Child) {
    match child.try_wait() {
        Ok(Some(status)) => debug!(%status, "evaluator exited"),
        Ok(None) => {
            if let Err(err) = child.kill() {
                warn!(error = %err, "failed to kill evaluator");
            }
            if let Err(err) = child.wait() {
                warn!(error = %err, "failed to reap evaluator");
            }
        }
        Err(err) => warn!(error = %err, "failed to query evaluator status"),
    }
}
