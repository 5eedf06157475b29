//! Result classification against the fixed latency thresholds.

use crate::config::defaults::{DEGRADED_MAX_LATENCY_MS, HEALTHY_MAX_LATENCY_MS};
use crate::types::{AvailabilityResult, LatencyResult, SeverityTier};

/// Map a latency result to its tier.
///
/// | Result              | Tier      |
/// |---------------------|-----------|
/// | `Error`             | Error     |
/// | `Absent`            | Unknown   |
/// | `> 300 ms`          | Unhealthy |
/// | `> 100 ms, ≤ 300`   | Degraded  |
/// | `≤ 100 ms`          | Healthy   |
pub fn classify_latency(result: LatencyResult) -> SeverityTier {
    match result {
        LatencyResult::Error => SeverityTier::Error,
        LatencyResult::Absent => SeverityTier::Unknown,
        LatencyResult::Measured(ms) if ms > DEGRADED_MAX_LATENCY_MS => SeverityTier::Unhealthy,
        LatencyResult::Measured(ms) if ms > HEALTHY_MAX_LATENCY_MS => SeverityTier::Degraded,
        LatencyResult::Measured(_) => SeverityTier::Healthy,
    }
}

/// Up is healthy, down is unhealthy, no answer is an error.
pub fn classify_availability(result: AvailabilityResult) -> SeverityTier {
    match result {
        AvailabilityResult::Answered(true) => SeverityTier::Healthy,
        AvailabilityResult::Answered(false) => SeverityTier::Unhealthy,
        AvailabilityResult::Error => SeverityTier::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_tiers() {
        assert_eq!(classify_latency(LatencyResult::Measured(50.0)), SeverityTier::Healthy);
        assert_eq!(classify_latency(LatencyResult::Measured(150.0)), SeverityTier::Degraded);
        assert_eq!(classify_latency(LatencyResult::Measured(350.0)), SeverityTier::Unhealthy);
        assert_eq!(classify_latency(LatencyResult::Absent), SeverityTier::Unknown);
        assert_eq!(classify_latency(LatencyResult::Error), SeverityTier::Error);
    }

    #[test]
    fn test_latency_boundaries() {
        assert_eq!(classify_latency(LatencyResult::Measured(0.0)), SeverityTier::Healthy);
        assert_eq!(classify_latency(LatencyResult::Measured(100.0)), SeverityTier::Healthy);
        assert_eq!(classify_latency(LatencyResult::Measured(100.001)), SeverityTier::Degraded);
        assert_eq!(classify_latency(LatencyResult::Measured(300.0)), SeverityTier::Degraded);
        assert_eq!(classify_latency(LatencyResult::Measured(300.001)), SeverityTier::Unhealthy);
    }

    #[test]
    fn test_availability_tiers() {
        assert_eq!(classify_availability(AvailabilityResult::Answered(true)), SeverityTier::Healthy);
        assert_eq!(classify_availability(AvailabilityResult::Answered(false)), SeverityTier::Unhealthy);
        assert_eq!(classify_availability(AvailabilityResult::Error), SeverityTier::Error);
    }
}
