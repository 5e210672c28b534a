use anyhow::Result;
use notify_debouncer_mini::notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Events emitted by the config watcher.
#[derive(Debug)]
pub enum ConfigEvent {
    /// The config file was modified on disk.
    Changed,
}

/// Watches the workspace config file for changes and sends events via a
/// channel. Dropping the returned [`WatchGuard`] stops the watcher.
pub struct ConfigWatcher {
    config_path: PathBuf,
}

pub struct WatchGuard {
    _debouncer: Debouncer<notify_debouncer_mini::notify::RecommendedWatcher>,
}

impl ConfigWatcher {
    pub fn new(config_path: &Path) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
        }
    }

    /// Start watching the config file. Returns a receiver of change events
    /// plus a guard that keeps the underlying watcher alive. The watcher runs
    /// on a background thread (via notify) and bridges to async via a tokio
    /// mpsc channel.
    pub fn watch(&self) -> Result<(mpsc::Receiver<ConfigEvent>, WatchGuard)> {
        let (tx, rx) = mpsc::channel(16);

        let config_filename = self
            .config_path
            .file_name()
            .map(|f| f.to_os_string())
            .unwrap_or_default();

        let watch_dir = self
            .config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let mut debouncer = new_debouncer(
            Duration::from_millis(500),
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    let relevant = events.iter().any(|e| {
                        e.kind == DebouncedEventKind::Any
                            && e.path
                                .file_name()
                                .map(|f| f == config_filename)
                                .unwrap_or(false)
                    });
                    if relevant {
                        debug!("config file change detected");
                        let _ = tx.blocking_send(ConfigEvent::Changed);
                    }
                }
                Err(e) => {
                    warn!("config watcher error: {}", e);
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)?;

        Ok((rx, WatchGuard { _debouncer: debouncer }))
    }
}
