use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Record of the most recent preview session, persisted when the server
/// stops cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub config_path: String,
    pub port: u16,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn save(&self, state_dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(state_dir)?;
        let path = state_dir.join("state.json");
        let content = serde_json::to_string_pretty(self)?;
        // Atomic write: write to tmp file then rename
        let tmp_path = state_dir.join("state.json.tmp");
        std::fs::write(&tmp_path, &content)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load(state_dir: &Path) -> Option<Self> {
        let path = state_dir.join("state.json");
        let content = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn remove(state_dir: &Path) -> anyhow::Result<()> {
        let path = state_dir.join("state.json");
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        // Try to remove the directory if it's empty
        let _ = std::fs::remove_dir(state_dir);
        Ok(())
    }

    pub fn state_dir_for(workspace_dir: &Path) -> PathBuf {
        workspace_dir.join(".blogrig")
    }
}

/// Persistence collaborator of the lifecycle manager. Invoked once per
/// successful stop.
pub trait SessionStore: Send + Sync {
    fn persist(&self, session: &SessionState) -> anyhow::Result<()>;
}

/// Stores the session record under the workspace's `.blogrig/` directory.
pub struct FileSessionStore {
    state_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(workspace_dir: &Path) -> Self {
        Self {
            state_dir: SessionState::state_dir_for(workspace_dir),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn persist(&self, session: &SessionState) -> anyhow::Result<()> {
        session.save(&self.state_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_session() -> SessionState {
        SessionState {
            config_path: "blogrig.toml".to_string(),
            port: 4200,
            started_at: Utc::now(),
            stopped_at: None,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let state_dir = dir.path().join(".blogrig");

        let session = test_session();
        session.save(&state_dir).unwrap();

        let loaded = SessionState::load(&state_dir).unwrap();
        assert_eq!(loaded.port, 4200);
        assert_eq!(loaded.config_path, "blogrig.toml");
        assert!(loaded.stopped_at.is_none());
    }

    #[test]
    fn load_missing_returns_none() {
        let dir = tempdir().unwrap();
        assert!(SessionState::load(&dir.path().join(".blogrig")).is_none());
    }

    #[test]
    fn file_store_persists_under_workspace() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let mut session = test_session();
        session.stopped_at = Some(Utc::now());
        store.persist(&session).unwrap();

        let state_dir = SessionState::state_dir_for(dir.path());
        let loaded = SessionState::load(&state_dir).unwrap();
        assert!(loaded.stopped_at.is_some());
    }
}
