//! Fixed-value probes for dry runs and tests.

use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{AvailabilityProbe, LatencyProbe, ProbeError};

/// Reports a fixed latency, optionally after a delay.
#[derive(Debug, Clone)]
pub struct StaticLatencyProbe {
    name: String,
    value_ms: Option<f64>,
    delay: Duration,
}

impl StaticLatencyProbe {
    pub fn new(name: impl Into<String>, value_ms: Option<f64>) -> Self {
        Self {
            name: name.into(),
            value_ms,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LatencyProbe for StaticLatencyProbe {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn latency(&self, cancel: CancellationToken) -> Result<Option<f64>, ProbeError> {
        wait(self.delay, &cancel).await?;
        Ok(self.value_ms)
    }
}

/// Reports a fixed up/down answer, optionally after a delay.
#[derive(Debug, Clone)]
pub struct StaticAvailabilityProbe {
    name: String,
    up: bool,
    delay: Duration,
}

impl StaticAvailabilityProbe {
    pub fn new(name: impl Into<String>, up: bool) -> Self {
        Self {
            name: name.into(),
            up,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl AvailabilityProbe for StaticAvailabilityProbe {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn availability(&self, cancel: CancellationToken) -> Result<bool, ProbeError> {
        wait(self.delay, &cancel).await?;
        Ok(self.up)
    }
}

async fn wait(delay: Duration, cancel: &CancellationToken) -> Result<(), ProbeError> {
    if delay.is_zero() {
        return Ok(());
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProbeError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_latency_returns_value() {
        let probe = StaticLatencyProbe::new("fixed", Some(20.0));
        assert_eq!(probe.latency(CancellationToken::new()).await.unwrap(), Some(20.0));
        assert_eq!(probe.display_name(), "fixed");
    }

    #[tokio::test]
    async fn test_delayed_probe_observes_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let probe = StaticAvailabilityProbe::new("slow", true).with_delay(Duration::from_secs(60));
        assert!(matches!(
            probe.availability(cancel).await,
            Err(ProbeError::Cancelled)
        ));
    }
}
