//! Persisted key-value storage.
//!
//! The state manager only needs `get` and `set` of whole string values, so the
//! storage seam is a small async trait. Two implementations ship with the
//! crate:
//!
//! - [`MemoryStore`]: in-process map, used in tests and as a fallback
//! - [`JsonFileStore`]: one JSON object on disk, written atomically
//!   (write-to-temp + rename) so a crash never leaves a truncated file

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::error::{Result, UpviewError};

/// Async key-value store holding string values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed store.
///
/// All keys live in a single JSON object:
///
/// ```json
/// {
///   "favourites": "[{\"Title\":\"The Matrix\",...}]"
/// }
/// ```
///
/// The file is read on every `get` and rewritten on every `set`; writes are
/// serialized through an internal lock.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. Nothing touches the disk until the
    /// first `get` or `set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(storage_error("failed to read", &self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| UpviewError::StorageError(format!("failed to parse JSON: {e}")))
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("failed to create", parent, e))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| UpviewError::StorageError(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| storage_error("failed to write", &tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| storage_error("failed to rename into", &self.path, e))?;

        tracing::debug!(path = ?self.path, keys = entries.len(), "store saved");
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> UpviewError {
    UpviewError::StorageError(format!("{action} {}: {err}", path.display()))
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value);
        self.save(&entries).await
    }
}
