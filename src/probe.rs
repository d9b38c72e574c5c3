//! TCP reachability probing.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::endpoint::Endpoint;

/// Default connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Something that can tell whether an endpoint is reachable.
///
/// Implementations must swallow every transport error and answer with a
/// plain verdict.
pub trait Prober: Send + Sync {
    /// Returns `true` if a connection to `endpoint` could be established.
    fn probe<'a>(&'a self, endpoint: &'a Endpoint) -> BoxFuture<'a, bool>;
}

/// Probes by opening and immediately closing a TCP connection.
#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    /// Create a prober with the given connect timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Connect timeout, covering name resolution as well.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Prober for TcpProber {
    fn probe<'a>(&'a self, endpoint: &'a Endpoint) -> BoxFuture<'a, bool> {
        check_tcp_connect(&endpoint.host, endpoint.port, self.timeout).boxed()
    }
}

/// Attempt a single TCP connection to `host:port` within `timeout`.
///
/// The stream is dropped, and so closed, before returning.
pub async fn check_tcp_connect(host: &str, port: u16, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            debug!(host, port, "tcp probe succeeded");
            true
        }
        Ok(Err(e)) => {
            warn!(host, port, error = %e, kind = ?e.kind(), "tcp probe failed");
            false
        }
        Err(_) => {
            warn!(host, port, timeout_ms = timeout.as_millis() as u64, "tcp probe timed out");
            false
        }
    }
}
