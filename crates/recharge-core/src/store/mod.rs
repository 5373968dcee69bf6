//! Pluggable persistence for the battery core.
//!
//! The core depends only on the [`StateStore`] trait: two opaque blobs
//! under fixed keys, written fire-and-forget after each committed
//! mutation. Timestamps cross this boundary as ISO-8601 strings inside
//! JSON; a blob that fails to read or parse is discarded in favor of
//! defaults, never surfaced as a caller error.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StorageError;

/// Key for the serialized interaction log.
pub const INTERACTIONS_KEY: &str = "interactions";
/// Key for the serialized battery-state snapshot.
pub const BATTERY_STATE_KEY: &str = "battery_state";

/// Every persistence backend implements this trait. Keys are short
/// identifiers; values are opaque bytes (JSON in practice).
pub trait StateStore: Send + Sync {
    /// Read a value. `None` means absent *or* unreadable -- the caller
    /// falls back to defaults either way.
    fn load(&self, key: &str) -> Option<Vec<u8>>;

    /// Write a value.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Returns `~/.config/recharge[-dev]/` based on RECHARGE_ENV.
///
/// Set RECHARGE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RECHARGE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("recharge-dev")
    } else {
        base_dir.join("recharge")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::OpenFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// File-backed store: one `<key>.json` file per key under a root
/// directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self { root: data_dir()? })
    }

    /// Store rooted at an explicit directory (tests, custom hosts).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path(key);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "discarding unreadable blob");
                None
            }
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::write(self.path(key), bytes).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory store for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.cells
            .lock()
            .ok()
            .and_then(|cells| cells.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if let Ok(mut cells) = self.cells.lock() {
            cells.insert(key.to_string(), bytes.to_vec());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.load("missing"), None);
        store.save("a", b"payload").unwrap();
        assert_eq!(store.load("a").as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_root(dir.path());
        assert_eq!(store.load(INTERACTIONS_KEY), None);
        store.save(INTERACTIONS_KEY, b"[]").unwrap();
        assert_eq!(store.load(INTERACTIONS_KEY).as_deref(), Some(&b"[]"[..]));
        assert!(dir.path().join("interactions.json").exists());
    }

    #[test]
    fn file_store_write_error_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_root(dir.path().join("does/not/exist"));
        let err = store.save("x", b"data").unwrap_err();
        assert!(matches!(err, StorageError::WriteFailed { .. }));
    }
}
