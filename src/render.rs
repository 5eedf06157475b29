//! Text and JSON rendering of a [`Report`] for the command-line front end.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::types::{AvailabilityResult, LatencyResult, RawResult, Report, SeverityTier};

/// Short human-readable value for one raw result.
pub fn format_result(result: &RawResult) -> String {
    match result {
        RawResult::Latency(LatencyResult::Measured(ms)) => format!("{ms:.0}ms"),
        RawResult::Latency(LatencyResult::Absent) => "no reply".to_string(),
        RawResult::Latency(LatencyResult::Error) | RawResult::Availability(AvailabilityResult::Error) => {
            "error".to_string()
        }
        RawResult::Availability(AvailabilityResult::Answered(true)) => "up".to_string(),
        RawResult::Availability(AvailabilityResult::Answered(false)) => "down".to_string(),
    }
}

/// Plain-text report, one line per entry, aggregate last.
pub fn render_text(report: &Report, checked_at: DateTime<Utc>) -> String {
    let width = report
        .entries()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Pong! Checked {} endpoints", report.probe_count());
    for entry in report.entries() {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>9}  {}",
            entry.name,
            format_result(&entry.result),
            entry.tier,
        );
    }
    let _ = writeln!(out, "Checked at {}", checked_at.format("%Y-%m-%d %H:%M:%S UTC"));
    out
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    checked_at: DateTime<Utc>,
    headline: SeverityTier,
    worst: SeverityTier,
    average_ms: Option<f64>,
    report: &'a Report,
}

/// JSON report wrapped with the check time, the headline tier and the worst
/// probe tier.
pub fn render_json(report: &Report, checked_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonEnvelope {
        checked_at,
        headline: report.headline(),
        worst: report.worst(),
        average_ms: report.aggregate_latency(),
        report,
    })
}
