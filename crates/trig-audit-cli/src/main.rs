// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! trig-audit: compares the platform sine/cosine with the combined
//! sin/cos/omc kernel over ranges of consecutive doubles.
//!
//! Significant per-point differences are streamed as they are found; the
//! per-range statistics follow once the sweep is done. Logs go to stderr so
//! stdout carries only the report.

mod report;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use trig_audit_config::{AuditConfig, ConfigService, FsConfigStore};
use trig_audit_core::{
    Finding, FunctionReports, Kernel, LibmOracle, Oracle, Platform, Range, Sweep, SweepPlan,
};
use trig_audit_fricas::FricasProcess;

/// Where accurate values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OracleKind {
    /// A FriCAS subprocess at high precision.
    Fricas,
    /// The pure-Rust libm (dry runs).
    Libm,
}

/// Report layout on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Finding lines followed by per-range blocks.
    Text,
    /// Findings and range reports as tables.
    Table,
    /// One JSON document.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "trig-audit", version, about, long_about = None)]
struct Args {
    /// Source of accurate values.
    #[arg(long, value_enum, default_value_t = OracleKind::Fricas)]
    oracle: OracleKind,

    /// Start of the first range.
    #[arg(long, allow_hyphen_values = true)]
    start: Option<f64>,

    /// Spacing between range starts.
    #[arg(long)]
    step: Option<f64>,

    /// Number of ranges to check.
    #[arg(long)]
    ranges: Option<usize>,

    /// Evaluator program.
    #[arg(long)]
    fricas: Option<String>,

    /// Directory holding the compiled request package.
    #[arg(long)]
    lib_dir: Option<PathBuf>,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Read and write saved settings here instead of the user config dir.
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Persist the effective settings (after flag overrides).
    #[arg(long)]
    save_config: bool,

    /// More log output (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Errors only.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn apply(&self, config: &mut AuditConfig) {
        if let Some(start) = self.start {
            config.sweep.start = start;
        }
        if let Some(step) = self.step {
            config.sweep.step = step;
        }
        if let Some(ranges) = self.ranges {
            config.sweep.ranges = ranges;
        }
        if let Some(program) = &self.fricas {
            config.fricas.program.clone_from(program);
        }
        if let Some(dir) = &self.lib_dir {
            config.fricas.lib_dir = Some(dir.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let service = open_config(args.config_dir.as_deref())?;
    let mut config = match &service {
        Some(service) => service
            .load_or_default::<AuditConfig>(AuditConfig::KEY)
            .context("loading saved settings")?,
        None => AuditConfig::default(),
    };
    args.apply(&mut config);

    if args.save_config {
        let service = service.ok_or_else(|| anyhow!("no config directory to save into"))?;
        service
            .save(AuditConfig::KEY, &config)
            .context("saving settings")?;
        info!(path = %service.store().path_for(AuditConfig::KEY).display(), "saved settings");
    }

    let plan = config.sweep;
    info!(start = plan.start, step = plan.step, ranges = plan.ranges, oracle = ?args.oracle, "starting sweep");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut findings = Vec::new();

    let sweep = match args.oracle {
        OracleKind::Libm => run_sweep(&plan, &mut LibmOracle, args.format, &mut out, &mut findings)?,
        OracleKind::Fricas => {
            let mut process = FricasProcess::spawn(&config.fricas)
                .with_context(|| format!("failed to use {}", config.fricas.program))?;
            let swept = run_sweep(&plan, &mut process, args.format, &mut out, &mut findings);
            if let Err(err) = process.close() {
                warn!(error = %err, "failed to close evaluator pipes");
            }
            swept?
        }
    };

    let reports = FunctionReports::aggregate(&sweep);
    let written = match args.format {
        Format::Text => report::write_text(&mut out, &reports),
        Format::Table => report::write_table(&mut out, &findings, &reports),
        Format::Json => report::write_json(&mut out, &findings, &reports),
    };
    written.context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}

/// Opens the settings store. Without an explicit directory a missing
/// platform config dir only costs persistence.
fn open_config(dir: Option<&Path>) -> Result<Option<ConfigService<FsConfigStore>>> {
    match dir {
        Some(dir) => {
            let store = FsConfigStore::at(dir)
                .with_context(|| format!("opening config dir {}", dir.display()))?;
            Ok(Some(ConfigService::new(store)))
        }
        None => match FsConfigStore::new() {
            Ok(store) => Ok(Some(ConfigService::new(store))),
            Err(err) => {
                warn!(error = %err, "config store unavailable; using defaults");
                Ok(None)
            }
        },
    }
}

/// Runs the sweep. In text mode findings go straight to `out`, and a failed
/// write stops the sweep at the end of the current range; otherwise they
/// are collected for the final report.
fn run_sweep<R: Oracle>(
    plan: &SweepPlan,
    oracle: &mut R,
    format: Format,
    out: &mut impl Write,
    findings: &mut Vec<Finding>,
) -> Result<Sweep> {
    let mut ranges = Vec::with_capacity(plan.ranges);
    let mut failed = None;
    for i in 0..plan.ranges {
        let mut sink = |finding: Finding| {
            if format != Format::Text {
                findings.push(finding);
            } else if failed.is_none() {
                failed = report::write_finding(&mut *out, &finding).err();
            }
        };
        ranges.push(Range::sweep(
            plan.range_start(i),
            &Platform,
            &Kernel,
            &mut *oracle,
            &mut sink,
        ));
        if let Some(err) = failed.take() {
            return Err(err).context("writing findings");
        }
    }
    Ok(Sweep::from_ranges(ranges))
}
