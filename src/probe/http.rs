//! HTTP availability probe

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{AvailabilityProbe, ProbeError};

/// Reports an endpoint as up when `GET url` answers with a 2xx status.
///
/// Any other status is a clean "down"; failing to get a response at all is a
/// transport fault.
#[derive(Debug, Clone)]
pub struct HttpAvailabilityProbe {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl HttpAvailabilityProbe {
    /// `client` is cloned cheaply, so several probes can share its connection pool.
    pub fn with_client(name: impl Into<String>, url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl AvailabilityProbe for HttpAvailabilityProbe {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn availability(&self, cancel: CancellationToken) -> Result<bool, ProbeError> {
        debug!(probe = %self.name, url = %self.url, "HTTP probe requesting");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProbeError::Cancelled),
            response = self.client.get(&self.url).send() => response,
        };

        let status = response.map_err(|e| ProbeError::Transport(e.to_string()))?.status();
        debug!(probe = %self.name, status = status.as_u16(), "HTTP probe answered");
        Ok(status.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response per connection.
    async fn serve(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/health")
    }

    fn local_probe(name: &str, url: String) -> HttpAvailabilityProbe {
        // Keep local test traffic away from any proxy configured in the environment.
        let client = reqwest::Client::builder().no_proxy().build().expect("client");
        HttpAvailabilityProbe::with_client(name, url, client)
    }

    #[tokio::test]
    async fn test_http_probe_up_on_2xx() {
        let url = serve("HTTP/1.1 200 OK").await;
        let probe = local_probe("web", url);
        assert!(probe.availability(CancellationToken::new()).await.expect("answer"));
    }

    #[tokio::test]
    async fn test_http_probe_down_on_5xx() {
        let url = serve("HTTP/1.1 503 Service Unavailable").await;
        let probe = local_probe("web", url);
        assert!(!probe.availability(CancellationToken::new()).await.expect("answer"));
    }

    #[tokio::test]
    async fn test_http_probe_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let probe = local_probe("gone", format!("http://{addr}/"));
        match probe.availability(CancellationToken::new()).await {
            Err(ProbeError::Transport(_)) => {}
            other => panic!("expected ProbeError::Transport, got {other:?}"),
        }
    }
}
