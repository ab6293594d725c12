//! JSON file-based key-value store.
//!
//! This module provides a simple, human-readable store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) so a
//! crash never leaves a half-written file behind.

use crate::domain::{FoodiePalError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// The whole map is kept in memory and written back on every change. A change
/// only becomes visible in memory once it is on disk, so a failed write
/// leaves both the file and the store as they were.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "user": "{\"id\":\"abc123\",\"email\":\"me@example.com\"}"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonKeyValueStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonKeyValueStore {
    /// Creates or opens a store at `file_path`.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foodiepal::storage::JsonKeyValueStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonKeyValueStore::new(PathBuf::from("/tmp/foodiepal/session.json"))?;
    /// # Ok::<(), foodiepal::FoodiePalError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        Ok(Self { file_path, data })
    }

    /// Opens the store at `file_path`, setting aside a file that does not
    /// parse.
    ///
    /// The unreadable file is renamed to `<name>.corrupt` and an empty store
    /// takes its place.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot
    /// be read, or the corrupt file cannot be moved aside.
    pub fn open_or_reset(file_path: PathBuf) -> Result<Self> {
        match Self::new(file_path.clone()) {
            Err(FoodiePalError::Storage(reason)) => {
                let aside = corrupt_path(&file_path);
                tracing::warn!(
                    path = ?file_path,
                    moved_to = ?aside,
                    reason = %reason,
                    "store file is corrupt, starting empty"
                );
                std::fs::rename(&file_path, &aside)?;
                Self::new(file_path)
            }
            other => other,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| FoodiePalError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded store data"
        );

        Ok(data)
    }

    /// Writes `next` to disk and, only once that succeeded, adopts it.
    fn commit(&mut self, next: StoreData) -> Result<()> {
        Self::save_to_file(&self.file_path, &next)?;
        self.data = next;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }

    /// Writes to a temporary file first, then renames it over the target.
    fn save_to_file(path: &Path, data: &StoreData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| FoodiePalError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            std::fs::remove_file(&tmp_path).ok();
            return Err(e.into());
        }
        Ok(())
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

impl KeyValueStore for JsonKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key).entered();

        let mut next = self.data.clone();
        next.entries.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_remove", key = %key).entered();

        if !self.data.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.entries.remove(key);
        self.commit(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
        store.set("user", "alice").unwrap();
        drop(store);

        let store = JsonKeyValueStore::new(path).unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn remove_is_persisted_and_tolerates_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
        store.set("user", "alice").unwrap();
        store.remove("user").unwrap();
        store.remove("never-set").unwrap();
        drop(store);

        let store = JsonKeyValueStore::new(path).unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
        store.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonKeyValueStore::new(path),
            Err(FoodiePalError::Storage(_))
        ));
    }

    #[test]
    fn corrupt_file_is_set_aside_on_reset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"version": 1, "entries": {"us"#).unwrap();

        let store = JsonKeyValueStore::open_or_reset(path.clone()).unwrap();
        assert_eq!(store.get("user").unwrap(), None);
        assert!(!path.exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("session.json.corrupt")).unwrap(),
            r#"{"version": 1, "entries": {"us"#
        );
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let blocker = path.with_extension("tmp");

        let mut store = JsonKeyValueStore::new(path.clone()).unwrap();
        store.set("kept", "1").unwrap();

        std::fs::create_dir(&blocker).unwrap();
        assert!(store.set("user", "alice").is_err());
        assert!(store.remove("kept").is_err());
        assert_eq!(store.get("user").unwrap(), None);
        assert_eq!(store.get("kept").unwrap().as_deref(), Some("1"));

        std::fs::remove_dir(&blocker).unwrap();
        drop(store);

        let reopened = JsonKeyValueStore::new(path).unwrap();
        assert_eq!(reopened.get("user").unwrap(), None);
        assert_eq!(reopened.get("kept").unwrap().as_deref(), Some("1"));
    }
}
