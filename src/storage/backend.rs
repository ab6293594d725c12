//! Key-value store abstraction.
//!
//! The session persists exactly one thing, the signed-in user, under a string
//! key. [`KeyValueStore`] is the minimal surface it needs, so tests can swap
//! the on-disk store for [`MemoryStore`].

use crate::domain::Result;
use std::collections::BTreeMap;

/// Abstraction over persistent string storage.
///
/// # Implementations
///
/// - [`JsonKeyValueStore`](crate::storage::JsonKeyValueStore): JSON file with atomic writes (default)
/// - [`MemoryStore`]: in-process map, nothing survives the process
///
/// # Examples
///
/// ```
/// use foodiepal::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("user", "{}")?;
/// assert_eq!(store.get("user")?.as_deref(), Some("{}"));
/// # Ok::<(), foodiepal::FoodiePalError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
