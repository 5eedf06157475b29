//! Fan-out executor: every probe runs as its own task under one shared deadline.
//!
//! The deadline is a single [`CancellationToken`] cancelled by a timer task.
//! Each unit races its probe against that token; when the token wins, the
//! probe future is dropped inside the unit, so by the time the unit's task
//! finishes the probe has fully unwound. The executor then awaits every unit
//! before returning, which means no probe can be reported as timed out and
//! still be running in the background.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::probe::{AvailabilityProbe, LatencyProbe, ProbeError};
use crate::types::{AvailabilityResult, LatencyResult};

/// Precondition violations. Per-probe failures never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("invalid timeout {0:?}: must be greater than zero")]
    InvalidTimeout(Duration),
}

/// A raw result paired with the probe's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedResult<T> {
    pub name: String,
    pub result: T,
}

impl<T> NamedResult<T> {
    pub fn new(name: impl Into<String>, result: T) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }
}

/// Raw results of one batch, positionally aligned with the input probe lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckResults {
    pub latency: Vec<NamedResult<LatencyResult>>,
    pub availability: Vec<NamedResult<AvailabilityResult>>,
}

/// Run every probe concurrently and collect exactly one result per probe.
pub async fn run_checks(
    latency_probes: &[Arc<dyn LatencyProbe>],
    availability_probes: &[Arc<dyn AvailabilityProbe>],
    timeout: Duration,
) -> Result<CheckResults, CheckError> {
    run_checks_with_parent(
        latency_probes,
        availability_probes,
        timeout,
        &CancellationToken::new(),
    )
    .await
}

/// Same as [`run_checks`], but the shared deadline token is a child of
/// `parent`, so cancelling `parent` ends the batch early with the same
/// semantics as the deadline elapsing.
pub async fn run_checks_with_parent(
    latency_probes: &[Arc<dyn LatencyProbe>],
    availability_probes: &[Arc<dyn AvailabilityProbe>],
    timeout: Duration,
    parent: &CancellationToken,
) -> Result<CheckResults, CheckError> {
    if timeout.is_zero() {
        return Err(CheckError::InvalidTimeout(timeout));
    }

    let cancel = parent.child_token();
    let deadline = spawn_deadline(cancel.clone(), timeout);

    let latency_units: Vec<JoinHandle<LatencyResult>> = latency_probes
        .iter()
        .map(|probe| {
            let probe = Arc::clone(probe);
            let cancel = cancel.clone();
            tokio::spawn(async move { run_latency_unit(probe.as_ref(), cancel).await })
        })
        .collect();

    let availability_units: Vec<JoinHandle<AvailabilityResult>> = availability_probes
        .iter()
        .map(|probe| {
            let probe = Arc::clone(probe);
            let cancel = cancel.clone();
            tokio::spawn(async move { run_availability_unit(probe.as_ref(), cancel).await })
        })
        .collect();

    let (latency_joined, availability_joined) =
        tokio::join!(join_all(latency_units), join_all(availability_units));

    deadline.abort();
    // Batch is over; release anything a probe left watching the token.
    cancel.cancel();

    let latency = latency_probes
        .iter()
        .zip(latency_joined)
        .map(|(probe, joined)| {
            let result = joined.unwrap_or_else(|e| {
                warn!(probe = probe.display_name(), error = %e, "Latency probe task failed");
                LatencyResult::Error
            });
            NamedResult::new(probe.display_name(), result)
        })
        .collect();

    let availability = availability_probes
        .iter()
        .zip(availability_joined)
        .map(|(probe, joined)| {
            let result = joined.unwrap_or_else(|e| {
                warn!(probe = probe.display_name(), error = %e, "Availability probe task failed");
                AvailabilityResult::Error
            });
            NamedResult::new(probe.display_name(), result)
        })
        .collect();

    Ok(CheckResults {
        latency,
        availability,
    })
}

fn spawn_deadline(cancel: CancellationToken, timeout: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(timeout) => {
                debug!(
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    "Shared deadline elapsed"
                );
                cancel.cancel();
            }
        }
    })
}

async fn run_latency_unit(probe: &dyn LatencyProbe, cancel: CancellationToken) -> LatencyResult {
    // Biased toward the probe: a value that is ready when the deadline fires
    // still counts.
    let outcome = tokio::select! {
        biased;
        outcome = probe.latency(cancel.clone()) => outcome,
        _ = cancel.cancelled() => {
            debug!(probe = probe.display_name(), "Latency probe timed out");
            return LatencyResult::Absent;
        }
    };

    match outcome {
        Ok(reading) => {
            let result = LatencyResult::from_reading(reading);
            if result.is_error() {
                warn!(probe = probe.display_name(), ?reading, "Latency probe returned an invalid reading");
            }
            result
        }
        // Cancelled only counts as a timeout once the shared token has fired.
        Err(ProbeError::Cancelled) if cancel.is_cancelled() => {
            debug!(probe = probe.display_name(), "Latency probe observed cancellation");
            LatencyResult::Absent
        }
        Err(e) => {
            warn!(probe = probe.display_name(), error = %e, "Latency probe faulted");
            LatencyResult::Error
        }
    }
}

async fn run_availability_unit(
    probe: &dyn AvailabilityProbe,
    cancel: CancellationToken,
) -> AvailabilityResult {
    let outcome = tokio::select! {
        biased;
        outcome = probe.availability(cancel.clone()) => outcome,
        _ = cancel.cancelled() => {
            debug!(probe = probe.display_name(), "Availability probe timed out");
            return AvailabilityResult::Error;
        }
    };

    match outcome {
        Ok(up) => AvailabilityResult::Answered(up),
        Err(ProbeError::Cancelled) if cancel.is_cancelled() => {
            debug!(probe = probe.display_name(), "Availability probe observed cancellation");
            AvailabilityResult::Error
        }
        Err(e) => {
            warn!(probe = probe.display_name(), error = %e, "Availability probe faulted");
            AvailabilityResult::Error
        }
    }
}
