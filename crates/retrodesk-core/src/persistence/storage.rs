use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error};

use retrodesk_config::StateConfig;

use super::errors::PersistenceError;

/// Durable key-value storage for serialized desktop state.
pub trait StateStorage: Send + Sync {
    /// The stored value, or `None` if nothing was ever written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Default state directory: `~/.retrodesk/state`.
///
/// `RETRODESK_STATE_DIR` overrides it when set and non-empty.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RETRODESK_STATE_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    match dirs::home_dir() {
        Some(home) => home.join(".retrodesk").join("state"),
        None => {
            error!(
                event = "core.persistence.home_dir_not_found",
                fallback = ".",
                "Could not determine home directory - using current directory as fallback"
            );
            PathBuf::from(".").join(".retrodesk").join("state")
        }
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the configured directory, or [`state_dir`] when none is set.
    pub fn from_config(config: &StateConfig) -> Self {
        match &config.dir {
            Some(dir) => Self::new(dir),
            None => Self::new(state_dir()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| PersistenceError::ReadFailed {
                path: path.display().to_string(),
                source,
            })
    }

    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write leaves the previous state intact.
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        let write_failed = |source| PersistenceError::WriteFailed {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_failed)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value).map_err(write_failed)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_failed(e));
        }

        debug!(
            event = "core.persistence.written",
            path = %path.display(),
            bytes = value.len()
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::RemoveFailed {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

/// In-process storage. Clones share the same entries, which lets a test
/// hand one clone to a manager and reload from another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.lock().remove(key);
        Ok(())
    }
}
