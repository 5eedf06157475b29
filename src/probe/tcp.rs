//! TCP connect latency probe

use async_trait::async_trait;
use std::time::Instant;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{LatencyProbe, ProbeError};

/// Measures how long it takes to establish a TCP connection.
///
/// The connection is dropped as soon as it is established.
#[derive(Debug, Clone)]
pub struct TcpLatencyProbe {
    name: String,
    /// `host:port`
    address: String,
}

impl TcpLatencyProbe {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

#[async_trait]
impl LatencyProbe for TcpLatencyProbe {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn latency(&self, cancel: CancellationToken) -> Result<Option<f64>, ProbeError> {
        debug!(probe = %self.name, address = %self.address, "TCP probe connecting");
        let start = Instant::now();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(probe = %self.name, "TCP probe cancelled");
                Err(ProbeError::Cancelled)
            }
            result = TcpStream::connect(&self.address) => {
                let _stream = result?;
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                debug!(probe = %self.name, elapsed_ms, "TCP probe connected");
                Ok(Some(elapsed_ms))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_probe_measures_local_connect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let _accept = tokio::spawn(async move {
            while let Ok((_stream, _)) = listener.accept().await {}
        });

        let probe = TcpLatencyProbe::new("local", addr.to_string());
        let latency = probe.latency(CancellationToken::new()).await.expect("connect");
        let ms = latency.expect("measured");
        assert!(ms >= 0.0);
        assert!(ms < 5_000.0, "local connect took {ms}ms");
    }

    #[tokio::test]
    async fn test_tcp_probe_refused_is_io_error() {
        // Bind then drop so the port is known to be closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let probe = TcpLatencyProbe::new("closed", addr.to_string());
        match probe.latency(CancellationToken::new()).await {
            Err(ProbeError::Io(_)) => {}
            other => panic!("expected ProbeError::Io, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tcp_probe_honours_cancelled_token() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        // Non-routable address; only cancellation can end this quickly.
        let probe = TcpLatencyProbe::new("blackhole", "10.255.255.1:80");
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            probe.latency(cancel),
        )
        .await
        .expect("probe should return promptly");
        assert!(matches!(result, Err(ProbeError::Cancelled)));
    }
}
