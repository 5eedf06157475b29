//! Report structure handed back to the caller for rendering.

use serde::Serialize;

use super::{AvailabilityResult, LatencyResult, SeverityTier};

/// What produced a report entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    Latency,
    Availability,
    /// The synthetic mean-latency entry.
    Aggregate,
}

/// Raw value carried by an entry, kept alongside its tier so the renderer
/// can show both.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RawResult {
    Latency(LatencyResult),
    Availability(AvailabilityResult),
}

/// One line of the report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    pub kind: ProbeKind,
    pub result: RawResult,
    pub tier: SeverityTier,
}

/// Outcome of one health-check invocation.
///
/// Probe entries keep the caller's order: latency probes first, then
/// availability probes. The aggregate entry is held apart so it is always
/// last in [`Report::entries`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    probes: Vec<ReportEntry>,
    aggregate: ReportEntry,
}

impl Report {
    pub(crate) fn new(probes: Vec<ReportEntry>, aggregate: ReportEntry) -> Self {
        Self { probes, aggregate }
    }

    /// All entries in report order, aggregate last.
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.probes.iter().chain(std::iter::once(&self.aggregate))
    }

    /// Probe entries only (aggregate excluded).
    pub fn probes(&self) -> &[ReportEntry] {
        &self.probes
    }

    pub fn aggregate(&self) -> &ReportEntry {
        &self.aggregate
    }

    /// Mean latency across measured probes, if any answered.
    pub fn aggregate_latency(&self) -> Option<f64> {
        match self.aggregate.result {
            RawResult::Latency(result) => result.value(),
            RawResult::Availability(_) => None,
        }
    }

    /// Number of probes checked.
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    /// Overall tier of the report, taken from the aggregate entry.
    pub fn headline(&self) -> SeverityTier {
        self.aggregate.tier
    }

    /// Worst tier among the probe entries, `Healthy` when there are none.
    pub fn worst(&self) -> SeverityTier {
        self.probes
            .iter()
            .map(|e| e.tier)
            .max()
            .unwrap_or(SeverityTier::Healthy)
    }
}
