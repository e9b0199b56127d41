//! Blocking wait for a TCP dependency to accept connections.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::Instant;

use crate::config::DependencyTarget;
use crate::error::{BootstrapError, Result};

/// Blocks until a dependency is reachable, or fails.
///
/// There is no partial success: `Ok` means the endpoint accepted a
/// connection, `Err` means bootstrap must stop.
#[allow(async_fn_in_trait)]
pub trait DependencyProbe {
    async fn wait(&self, target: &DependencyTarget) -> Result<()>;
}

/// Polls `host:port` with plain TCP connects until one succeeds.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    retry_interval: Duration,
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_secs(1),
        }
    }
}

impl TcpProbe {
    pub fn with_retry_interval(retry_interval: Duration) -> Self {
        Self { retry_interval }
    }
}

fn resolve_target(target: &DependencyTarget) -> Result<(String, u16)> {
    let unavailable = |reason: &str| BootstrapError::DependencyUnavailable {
        target: target.display_url(),
        reason: reason.to_string(),
    };

    let host = match target.host.as_deref().map(str::trim) {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err(unavailable("DB_HOST is not set")),
    };
    let port = match target.port.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p
            .parse::<u16>()
            .map_err(|_| unavailable(&format!("invalid DB_PORT '{p}'")))?,
        _ => return Err(unavailable("DB_PORT is not set")),
    };
    Ok((host, port))
}

impl DependencyProbe for TcpProbe {
    async fn wait(&self, target: &DependencyTarget) -> Result<()> {
        let (host, port) = resolve_target(target)?;
        let url = format!("tcp://{host}:{port}");
        let deadline = Instant::now() + target.timeout;

        tracing::info!(endpoint = %url, timeout_secs = target.timeout.as_secs(), "waiting for dependency");

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(BootstrapError::timed_out(url, target.timeout));
            }

            match tokio::time::timeout(remaining, TcpStream::connect((host.as_str(), port))).await {
                Ok(Ok(_stream)) => {
                    tracing::info!(endpoint = %url, attempt, "dependency is reachable");
                    return Ok(());
                }
                Ok(Err(e)) => {
                    tracing::debug!(endpoint = %url, attempt, error = %e, "dependency not ready");
                }
                Err(_) => return Err(BootstrapError::timed_out(url, target.timeout)),
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(BootstrapError::timed_out(url, target.timeout));
            }
            tokio::time::sleep_until(deadline.min(now + self.retry_interval)).await;
        }
    }
}
