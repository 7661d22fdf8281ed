// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Report rendering: the classic text layout, tables and JSON.

use std::io::{self, Write};

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use trig_audit_core::{
    Finding, Function, FunctionReports, MicroReport, RangeReport, Sci, POINTS_IN_ONE_RANGE,
};

/// One finding line:
/// `verdict x function: about distance old new accurate`.
pub fn write_finding<W: Write>(out: &mut W, f: &Finding) -> io::Result<()> {
    writeln!(
        out,
        "{:<6} {} {:>3}: {:>30} {:>22} {} {} {}",
        f.verdict,
        Sci::report(f.x),
        f.function,
        f.about,
        f.distance,
        Sci::report(f.old),
        Sci::report(f.new),
        Sci::report(f.accurate),
    )
}

/// Per-range blocks for every function.
///
/// Each block is the range limits, one line per bucket (improvements then
/// worsenings: count, extreme iscore, extreme fscore, quadratic mean) and
/// the mean relative improvement.
pub fn write_text<W: Write>(out: &mut W, reports: &FunctionReports) -> io::Result<()> {
    write!(out, "\n\nPointsInOneRange: {POINTS_IN_ONE_RANGE:5}\n\n\n")?;
    for (function, ranges) in reports.iter() {
        writeln!(out, "{function:>3}:")?;
        for r in ranges {
            writeln!(out, "{} {}", Sci::report(r.limits[0]), Sci::report(r.limits[1]))?;
            write_bucket(out, &r.improvements)?;
            write_bucket(out, &r.worsenings)?;
            write!(out, "{}\n\n", Sci::report(r.mean_relative))?;
        }
        write!(out, "\n\n")?;
    }
    Ok(())
}

fn write_bucket<W: Write>(out: &mut W, m: &MicroReport) -> io::Result<()> {
    writeln!(
        out,
        "{:7} {:22} {} {}",
        m.count,
        m.max,
        Sci::report(m.max_score),
        Sci::report(m.mean_square)
    )
}

/// Findings, then one table per function.
pub fn write_table<W: Write>(
    out: &mut W,
    findings: &[Finding],
    reports: &FunctionReports,
) -> io::Result<()> {
    if !findings.is_empty() {
        let mut table = new_table([
            "verdict", "x", "fn", "about", "ulps", "old", "new", "accurate",
        ]);
        for f in findings {
            table.add_row(vec![
                f.verdict.to_string(),
                short(f.x),
                f.function.to_string(),
                f.about.to_string(),
                f.distance.to_string(),
                short(f.old),
                short(f.new),
                short(f.accurate),
            ]);
        }
        writeln!(out, "{table}")?;
    }

    for (function, ranges) in reports.iter() {
        writeln!(out, "{function}: {} ranges", ranges.len())?;
        if ranges.is_empty() {
            continue;
        }
        let mut table = new_table([
            "from", "to", "better", "max", "max rel", "rms rel", "worse", "max", "max rel",
            "rms rel", "mean rel",
        ]);
        for r in ranges {
            let (i, w) = (&r.improvements, &r.worsenings);
            table.add_row(vec![
                short(r.limits[0]),
                short(r.limits[1]),
                i.count.to_string(),
                i.max.to_string(),
                short(i.max_score),
                short(i.mean_square),
                w.count.to_string(),
                w.max.to_string(),
                short(w.max_score),
                short(w.mean_square),
                short(r.mean_relative),
            ]);
        }
        writeln!(out, "{table}")?;
    }
    Ok(())
}

fn new_table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn short(v: f64) -> String {
    Sci::new(v, 0, 6).to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    points_in_one_range: usize,
    findings: &'a [Finding],
    functions: Vec<JsonFunction<'a>>,
}

#[derive(Serialize)]
struct JsonFunction<'a> {
    function: Function,
    ranges: &'a [RangeReport],
}

/// One pretty-printed document. Non-finite numbers (an empty bucket's
/// quadratic mean, an unavailable accurate value) become `null`.
pub fn write_json<W: Write>(
    out: &mut W,
    findings: &[Finding],
    reports: &FunctionReports,
) -> io::Result<()> {
    let doc = JsonReport {
        points_in_one_range: POINTS_IN_ONE_RANGE,
        findings,
        functions: reports
            .iter()
            .map(|(function, ranges)| JsonFunction { function, ranges })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
