//! String-keyed key-value persistence
//!
//! Every collection is stored as one JSON document under its own key, so
//! transactions and categories can be migrated independently.
//! `FileStore` keeps one file per key in a directory; `MemoryStore` keeps
//! everything in a map and is used for tests and embedding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinanceError, FinanceResult};

use super::file_io::{read_string, write_atomic};

/// Canonical transaction list
pub const TRANSACTIONS_KEY: &str = "finance-transactions";

/// Legacy expenses-only list (read-only)
pub const LEGACY_EXPENSES_KEY: &str = "finance-expenses";

/// Category list
pub const CATEGORIES_KEY: &str = "finance-categories";

/// Theme preference
pub const THEME_KEY: &str = "finance-theme";

/// A string-keyed store of serialized JSON values
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value for a key, `None` if absent
    fn get(&self, key: &str) -> FinanceResult<Option<String>>;

    /// Store a raw value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> FinanceResult<()>;

    /// Remove a key; no-op if absent
    fn remove(&self, key: &str) -> FinanceResult<()>;

    /// Check whether a key is present
    fn contains(&self, key: &str) -> FinanceResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Read and deserialize the value under `key`
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> FinanceResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| FinanceError::Storage(format!("Failed to parse '{}': {}", key, e))),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> FinanceResult<()> {
    let raw = serde_json::to_string(value)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize '{}': {}", key, e)))?;
    store.set(key, &raw)
}

/// Keys become file names, so only a conservative character set is allowed
fn validate_key(key: &str) -> FinanceResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(FinanceError::Storage(format!("Invalid storage key: '{}'", key)))
    }
}

/// File-backed store: key `k` lives in `<dir>/k.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        validate_key(key)?;
        read_string(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> FinanceResult<()> {
        validate_key(key)?;
        write_atomic(self.path_for(key), value.as_bytes())
    }

    fn remove(&self, key: &str) -> FinanceResult<()> {
        validate_key(key)?;
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                FinanceError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw values
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FinanceResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> FinanceResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        store.set(THEME_KEY, "\"dark\"").unwrap();
        assert!(store.contains(THEME_KEY).unwrap());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));

        store.remove(THEME_KEY).unwrap();
        assert!(!store.contains(THEME_KEY).unwrap());
    }

    #[test]
    fn test_file_store_uses_one_file_per_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        store.set(CATEGORIES_KEY, "[]").unwrap();
        assert!(temp_dir.path().join("finance-categories.json").exists());
        assert_eq!(store.get(CATEGORIES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(TRANSACTIONS_KEY).unwrap(), None);

        store.remove(CATEGORIES_KEY).unwrap();
        assert!(!store.contains(CATEGORIES_KEY).unwrap());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", "1").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        set_json(&store, "numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Option<Vec<i32>> = get_json(&store, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        store.set("broken", "{not json").unwrap();
        assert!(get_json::<Vec<i32>>(&store, "broken").is_err());
    }
}
