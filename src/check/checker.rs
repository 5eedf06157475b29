//! Health checker: the registered probe collections plus the single
//! on-demand `run` entry point.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::executor::{run_checks_with_parent, CheckError};
use super::report::build_report;
use crate::probe::{AvailabilityProbe, LatencyProbe};
use crate::types::Report;

/// Owns the probes for a health check. Holds no state between runs.
#[derive(Default, Clone)]
pub struct HealthChecker {
    latency: Vec<Arc<dyn LatencyProbe>>,
    availability: Vec<Arc<dyn AvailabilityProbe>>,
}

impl HealthChecker {
    pub fn new(
        latency: Vec<Arc<dyn LatencyProbe>>,
        availability: Vec<Arc<dyn AvailabilityProbe>>,
    ) -> Self {
        Self {
            latency,
            availability,
        }
    }

    pub fn register_latency<P: LatencyProbe + 'static>(&mut self, probe: P) {
        self.latency.push(Arc::new(probe));
    }

    pub fn register_availability<P: AvailabilityProbe + 'static>(&mut self, probe: P) {
        self.availability.push(Arc::new(probe));
    }

    pub fn latency_count(&self) -> usize {
        self.latency.len()
    }

    pub fn availability_count(&self) -> usize {
        self.availability.len()
    }

    /// Run every probe once under a shared `timeout` and build the report.
    pub async fn run(&self, timeout: Duration) -> Result<Report, CheckError> {
        self.run_with_parent(timeout, &CancellationToken::new()).await
    }

    /// Like [`run`](Self::run), ending early if `parent` is cancelled.
    pub async fn run_with_parent(
        &self,
        timeout: Duration,
        parent: &CancellationToken,
    ) -> Result<Report, CheckError> {
        info!(
            latency = self.latency.len(),
            availability = self.availability.len(),
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "Running health check"
        );
        let start = Instant::now();

        let results =
            run_checks_with_parent(&self.latency, &self.availability, timeout, parent).await?;
        let report = build_report(&results);

        info!(
            average_ms = ?report.aggregate_latency(),
            headline = %report.headline(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Health check complete"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for HealthChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let latency: Vec<&str> = self.latency.iter().map(|p| p.display_name()).collect();
        let availability: Vec<&str> = self.availability.iter().map(|p| p.display_name()).collect();
        f.debug_struct("HealthChecker")
            .field("latency", &latency)
            .field("availability", &availability)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{StaticAvailabilityProbe, StaticLatencyProbe};
    use crate::types::SeverityTier;

    #[tokio::test]
    async fn test_registered_probes_are_reported() {
        let mut checker = HealthChecker::default();
        checker.register_latency(StaticLatencyProbe::new("A", Some(20.0)));
        checker.register_availability(StaticAvailabilityProbe::new("C", false));
        assert_eq!(checker.latency_count(), 1);
        assert_eq!(checker.availability_count(), 1);

        let report = checker.run(Duration::from_secs(1)).await.unwrap();
        let tiers: Vec<SeverityTier> = report.entries().map(|e| e.tier).collect();
        assert_eq!(
            tiers,
            vec![SeverityTier::Healthy, SeverityTier::Unhealthy, SeverityTier::Healthy]
        );
    }

    #[tokio::test]
    async fn test_invalid_timeout_surfaces() {
        let checker = HealthChecker::default();
        assert!(matches!(
            checker.run(Duration::ZERO).await,
            Err(CheckError::InvalidTimeout(_))
        ));
    }
}
