//! CSV files for benchmark results.
//!
//! Per-search records (`results_15p.csv` by default):
//! - header: `state_id,heuristic,cost,expanded,time_secs`
//! - one row per (start board, heuristic); cost is -1 when unreachable
//!
//! Per-heuristic summary:
//! - header: `heuristic,solved,avg_cost,avg_expanded,avg_time`
//! - averages over solved trials, formatted to 2, 1 and 4 decimals

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::experiment::{HeuristicSummary, TrialRecord};
use crate::heuristics::Heuristic;
use crate::search::SearchOutcome;

pub const DEFAULT_RECORDS_CSV: &str = "results_15p.csv";

const RECORDS_HEADER: &str = "state_id,heuristic,cost,expanded,time_secs";
const SUMMARY_HEADER: &str = "heuristic,solved,avg_cost,avg_expanded,avg_time";

/// Saves one row per search.
pub fn save_records(path: &Path, records: &[TrialRecord]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_records(&mut file, records)?;
    file.flush()
}

/// Saves one row per heuristic.
pub fn save_summary(path: &Path, summaries: &[HeuristicSummary]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_summary(&mut file, summaries)?;
    file.flush()
}

fn write_records<W: Write>(out: &mut W, records: &[TrialRecord]) -> std::io::Result<()> {
    writeln!(out, "{RECORDS_HEADER}")?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{:.6}",
            record.state_id,
            record.heuristic.name(),
            record.outcome.reported_cost(),
            record.outcome.expanded,
            record.elapsed.as_secs_f64()
        )?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summaries: &[HeuristicSummary]) -> std::io::Result<()> {
    writeln!(out, "{SUMMARY_HEADER}")?;
    for summary in summaries {
        writeln!(
            out,
            "{},{},{:.2},{:.1},{:.4}",
            summary.heuristic.name(),
            summary.solved,
            summary.avg_cost,
            summary.avg_expanded,
            summary.avg_time.as_secs_f64()
        )?;
    }
    Ok(())
}

/// Loads records written by [`save_records`].
///
/// Returns `None` if the file is missing, has the wrong header or holds a
/// malformed row.
pub fn load_records(path: &Path) -> Option<Vec<TrialRecord>> {
    let file = File::open(path).ok()?;
    read_records(BufReader::new(file))
}

fn read_records<R: BufRead>(input: R) -> Option<Vec<TrialRecord>> {
    let mut lines = input.lines();
    let header = lines.next()?.ok()?;
    if header.trim() != RECORDS_HEADER {
        return None;
    }

    let mut records = Vec::new();
    for line in lines {
        let line = line.ok()?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record(&line)?);
    }
    Some(records)
}

fn parse_record(line: &str) -> Option<TrialRecord> {
    let mut fields = line.trim().split(',');

    let state_id = fields.next()?.parse().ok()?;
    let heuristic = Heuristic::from_name(fields.next()?)?;
    let cost: i64 = fields.next()?.parse().ok()?;
    let expanded = fields.next()?.parse().ok()?;
    let seconds: f64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    Some(TrialRecord {
        state_id,
        heuristic,
        outcome: SearchOutcome {
            cost: u32::try_from(cost).ok(),
            expanded,
        },
        elapsed: Duration::try_from_secs_f64(seconds).ok()?,
    })
}

/// Heuristics that appear in `records`, in first-seen order.
pub fn heuristics_in(records: &[TrialRecord]) -> Vec<Heuristic> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.heuristic) {
            seen.push(record.heuristic);
        }
    }
    seen
}
