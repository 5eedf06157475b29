//! Probe contracts and the concrete probes shipped with the CLI
//!
//! The core only depends on the two traits defined here:
//!
//! - [`LatencyProbe`]: yields a round-trip time in milliseconds (or nothing)
//! - [`AvailabilityProbe`]: yields up/down
//!
//! Both receive the batch's shared [`CancellationToken`]. Implementations
//! should return promptly once it fires, typically by racing their external
//! call against `cancel.cancelled()` and returning [`ProbeError::Cancelled`].

mod fixed;
mod http;
mod tcp;

pub use fixed::{StaticAvailabilityProbe, StaticLatencyProbe};
pub use http::HttpAvailabilityProbe;
pub use tcp::TcpLatencyProbe;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Faults a probe can raise. The executor converts every one of them into
/// report data; none reach the caller.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),

    /// The probe observed the shared cancellation signal and gave up.
    #[error("cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

/// A probe measuring round-trip latency.
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    /// Name shown in the report. Need not be unique.
    fn display_name(&self) -> &str;

    /// Measure latency in milliseconds.
    ///
    /// `Ok(None)` means the probe had no value to report.
    async fn latency(&self, cancel: CancellationToken) -> Result<Option<f64>, ProbeError>;
}

/// A probe reporting whether an endpoint is up.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Name shown in the report. Need not be unique.
    fn display_name(&self) -> &str;

    async fn availability(&self, cancel: CancellationToken) -> Result<bool, ProbeError>;
}
