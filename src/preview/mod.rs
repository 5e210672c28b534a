pub mod ports;
pub mod server;
pub mod state;
pub mod validator;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::ui::messages::MessageKey;
use crate::ui::notify::StatusSink;
use server::{ServeBackend, ServeConfig, ServerHandle};
use state::{SessionState, SessionStore};

// ---------------------------------------------------------------------------
// ServerPhase — explicit state tracking for the preview lifecycle
// ---------------------------------------------------------------------------

/// Failures do not get a phase of their own: a failed start or stop lands
/// back in `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    Stopped,
    Starting,
    Running,
    Stopping,
}

// ---------------------------------------------------------------------------
// BusyGuard — pairs every busy() with exactly one idle()
// ---------------------------------------------------------------------------

struct BusyGuard<'a> {
    status: &'a dyn StatusSink,
}

impl<'a> BusyGuard<'a> {
    fn new(status: &'a dyn StatusSink) -> Self {
        status.busy();
        Self { status }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.status.idle();
    }
}

// ---------------------------------------------------------------------------
// PreviewManager
// ---------------------------------------------------------------------------

/// Owns at most one running preview server and its state transitions.
///
/// Start and stop are idempotent and safe to call repeatedly; failures are
/// reported through the injected [`StatusSink`] rather than bubbled to the
/// caller, and always leave the manager in `Stopped` or `Running`.
pub struct PreviewManager {
    phase: ServerPhase,
    handle: Option<Box<dyn ServerHandle>>,
    backend: Arc<dyn ServeBackend>,
    status: Arc<dyn StatusSink>,
    store: Arc<dyn SessionStore>,
    config_path: PathBuf,
    started_at: Option<DateTime<Utc>>,
}

impl PreviewManager {
    pub fn new(
        backend: Arc<dyn ServeBackend>,
        status: Arc<dyn StatusSink>,
        store: Arc<dyn SessionStore>,
        config_path: PathBuf,
    ) -> Self {
        Self {
            phase: ServerPhase::Stopped,
            handle: None,
            backend,
            status,
            store,
            config_path,
            started_at: None,
        }
    }

    pub fn phase(&self) -> ServerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ServerPhase::Running
    }

    /// Port of the running server, if any.
    pub fn port(&self) -> Option<u16> {
        self.handle.as_ref().map(|h| h.port())
    }

    /// Bring the server up.
    ///
    /// Only `Stopped` does any work. `Starting`/`Running` is a guarded no-op
    /// so repeated calls cannot spawn a second listener. `Stopping` is an
    /// error: a previous stop was interrupted mid-teardown and the listener
    /// state is unknown.
    ///
    /// A construction failure is logged, surfaced through the status sink,
    /// and leaves the manager `Stopped`; it is not returned as an `Err`.
    pub async fn start(&mut self, config: &ServeConfig) -> Result<()> {
        match self.phase {
            ServerPhase::Starting | ServerPhase::Running => {
                debug!(phase = ?self.phase, "start ignored; server already up");
                return Ok(());
            }
            ServerPhase::Stopping => {
                bail!("preview server is still stopping; wait for it to reach Stopped before starting");
            }
            ServerPhase::Stopped => {}
        }

        self.phase = ServerPhase::Starting;
        let busy = BusyGuard::new(self.status.as_ref());
        match self.backend.create(config).await {
            Ok(handle) => {
                info!(port = handle.port(), "preview server running");
                self.handle = Some(handle);
                self.started_at = Some(Utc::now());
                self.phase = ServerPhase::Running;
                drop(busy);
                self.status.success(MessageKey::ServerStarted);
            }
            Err(err) => {
                error!("preview server failed to start: {:#}", err);
                self.phase = ServerPhase::Stopped;
                drop(busy);
                self.status.error(&err);
            }
        }
        Ok(())
    }

    /// Take the server down.
    ///
    /// Only `Running` does any work; every other phase is a no-op. Never
    /// fails: a teardown error is logged and surfaced through the status
    /// sink. The session record is persisted once per successful stop.
    pub async fn stop(&mut self) {
        if self.phase != ServerPhase::Running {
            debug!(phase = ?self.phase, "stop ignored; server not running");
            return;
        }
        // The phase guard above means a handle is always present here, but
        // a missing one must not wedge the manager in Running.
        let Some(handle) = self.handle.take() else {
            self.phase = ServerPhase::Stopped;
            return;
        };

        self.phase = ServerPhase::Stopping;
        let busy = BusyGuard::new(self.status.as_ref());
        let port = handle.port();
        match handle.close().await {
            Ok(()) => {
                info!(port, "preview server stopped");
                self.phase = ServerPhase::Stopped;
                let session = SessionState {
                    config_path: self.config_path.display().to_string(),
                    port,
                    started_at: self.started_at.take().unwrap_or_else(Utc::now),
                    stopped_at: Some(Utc::now()),
                };
                if let Err(err) = self.store.persist(&session) {
                    warn!("failed to persist session state: {:#}", err);
                }
                drop(busy);
                self.status.success(MessageKey::ServerStopped);
            }
            Err(err) => {
                error!(port, "preview server teardown failed: {:#}", err);
                self.phase = ServerPhase::Stopped;
                drop(busy);
                self.status.error(&err);
            }
        }
    }
}
