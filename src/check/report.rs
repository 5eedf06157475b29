//! Report assembly: classify every raw result and append the aggregate.

use super::aggregate::aggregate_latency;
use super::classify::{classify_availability, classify_latency};
use super::executor::CheckResults;
use crate::config::defaults::AGGREGATE_ENTRY_NAME;
use crate::types::{LatencyResult, ProbeKind, RawResult, Report, ReportEntry};

/// Build the report for one batch.
///
/// Pure: the same results always produce the same report. Latency entries
/// come first, then availability entries, each in input order; the
/// aggregate entry goes last and is classified like any latency value.
pub fn build_report(results: &CheckResults) -> Report {
    let latency_entries = results.latency.iter().map(|r| ReportEntry {
        name: r.name.clone(),
        kind: ProbeKind::Latency,
        result: RawResult::Latency(r.result),
        tier: classify_latency(r.result),
    });

    let availability_entries = results.availability.iter().map(|r| ReportEntry {
        name: r.name.clone(),
        kind: ProbeKind::Availability,
        result: RawResult::Availability(r.result),
        tier: classify_availability(r.result),
    });

    let probes: Vec<ReportEntry> = latency_entries.chain(availability_entries).collect();

    let average = LatencyResult::from_reading(aggregate_latency(results.latency.iter().map(|r| &r.result)));
    let aggregate = ReportEntry {
        name: AGGREGATE_ENTRY_NAME.to_string(),
        kind: ProbeKind::Aggregate,
        result: RawResult::Latency(average),
        tier: classify_latency(average),
    };

    Report::new(probes, aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::executor::NamedResult;
    use crate::types::{AvailabilityResult, SeverityTier};

    fn scenario() -> CheckResults {
        CheckResults {
            latency: vec![
                NamedResult::new("A", LatencyResult::Measured(20.0)),
                NamedResult::new("B", LatencyResult::Measured(400.0)),
            ],
            availability: vec![NamedResult::new("C", AvailabilityResult::Answered(true))],
        }
    }

    #[test]
    fn test_report_order_and_tiers() {
        let report = build_report(&scenario());
        let summary: Vec<(&str, ProbeKind, SeverityTier)> = report
            .entries()
            .map(|e| (e.name.as_str(), e.kind, e.tier))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("A", ProbeKind::Latency, SeverityTier::Healthy),
                ("B", ProbeKind::Latency, SeverityTier::Unhealthy),
                ("C", ProbeKind::Availability, SeverityTier::Healthy),
                ("Average", ProbeKind::Aggregate, SeverityTier::Degraded),
            ]
        );
        assert_eq!(report.aggregate_latency(), Some(210.0));
        assert_eq!(report.probe_count(), 3);
        assert_eq!(report.headline(), SeverityTier::Degraded);
        assert_eq!(report.worst(), SeverityTier::Unhealthy);
    }

    #[test]
    fn test_building_twice_is_identical() {
        let results = scenario();
        assert_eq!(build_report(&results), build_report(&results));
    }

    #[test]
    fn test_all_failed_report_is_complete() {
        let results = CheckResults {
            latency: vec![
                NamedResult::new("x", LatencyResult::Error),
                NamedResult::new("y", LatencyResult::Absent),
            ],
            availability: vec![NamedResult::new("z", AvailabilityResult::Error)],
        };
        let report = build_report(&results);

        let tiers: Vec<SeverityTier> = report.entries().map(|e| e.tier).collect();
        assert_eq!(
            tiers,
            vec![
                SeverityTier::Error,
                SeverityTier::Unknown,
                SeverityTier::Error,
                SeverityTier::Unknown,
            ]
        );
        assert_eq!(report.aggregate_latency(), None);
        assert_eq!(report.aggregate().result, RawResult::Latency(LatencyResult::Absent));
    }

    #[test]
    fn test_huge_readings_keep_a_numeric_aggregate() {
        let results = CheckResults {
            latency: vec![
                NamedResult::new("x", LatencyResult::Measured(1e308)),
                NamedResult::new("y", LatencyResult::Measured(1e308)),
            ],
            availability: vec![],
        };
        let report = build_report(&results);

        assert_eq!(report.aggregate_latency(), Some(1e308));
        assert_eq!(report.aggregate().tier, SeverityTier::Unhealthy);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let results = CheckResults {
            latency: vec![
                NamedResult::new("dup", LatencyResult::Measured(10.0)),
                NamedResult::new("dup", LatencyResult::Measured(30.0)),
            ],
            availability: vec![],
        };
        let report = build_report(&results);
        assert_eq!(report.probe_count(), 2);
        assert_eq!(report.aggregate_latency(), Some(20.0));
    }
}
