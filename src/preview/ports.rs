use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tracing::debug;

/// Upper bound on a single bind attempt. A bind normally resolves in well
/// under a millisecond; the bound keeps validation from stalling if the OS
/// misbehaves.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Check whether `port` can currently be bound on the loopback interface.
///
/// Binds a transient listener and releases it immediately. Any failure
/// (in use, permission denied) reads as unavailable; the causes are not
/// distinguished.
pub async fn probe_port(port: u16) -> bool {
    match tokio::time::timeout(PROBE_TIMEOUT, TcpListener::bind(("127.0.0.1", port))).await {
        Ok(Ok(listener)) => {
            // The listener closes when dropped; nothing is left bound.
            drop(listener);
            true
        }
        Ok(Err(err)) => {
            debug!(port, "bind probe failed: {}", err);
            false
        }
        Err(_) => {
            debug!(port, "bind probe timed out after {:?}", PROBE_TIMEOUT);
            false
        }
    }
}

/// Ask the OS for a currently free port by binding port 0.
pub async fn find_free_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    Ok(listener.local_addr()?.port())
}

/// Seam over [`probe_port`] so validation logic can be exercised with a
/// scripted prober in tests.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, port: u16) -> bool;
}

/// The real prober: an OS-level bind attempt.
#[derive(Debug, Default)]
pub struct BindProber;

#[async_trait]
impl Prober for BindProber {
    async fn probe(&self, port: u16) -> bool {
        probe_port(port).await
    }
}
