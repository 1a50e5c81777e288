//! Durable key/value storage.
//!
//! The console persists a handful of string entries (the session triple and
//! the theme preference). In the browser they live in `localStorage`; during
//! server-side rendering and in tests they live in a [`MemoryStore`].

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::error::Result;

/// Errors from durable storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store could not be reached at all.
    Unavailable { reason: String },
    /// Reading a key failed.
    Read { key: String },
    /// Writing or removing a key failed.
    Write { key: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "storage unavailable: {reason}"),
            Self::Read { key } => write!(f, "failed to read storage key '{key}'"),
            Self::Write { key } => write!(f, "failed to write storage key '{key}'"),
        }
    }
}

impl std::error::Error for StorageError {}

/// A durable string key/value store.
///
/// Implementations must be cheap to call repeatedly; callers do not cache
/// values read through this trait.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    #[must_use]
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

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Read {
            key: key.to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Write {
            key: key.to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Write {
            key: key.to_string(),
        })?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("token").expect("get"), None);
    }

    #[test]
    fn memory_store_set_replaces_value() {
        let store = MemoryStore::new();
        store.set("theme", "light").expect("set");
        store.set("theme", "dark").expect("set");
        assert_eq!(store.get("theme").expect("get").as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_remove_missing_key_is_ok() {
        let store = MemoryStore::with_entries([("role", "CAJERO")]);
        store.remove("token").expect("remove missing");
        store.remove("role").expect("remove present");
        assert!(store.is_empty());
    }

    #[test]
    fn storage_error_display_names_key() {
        let err = StorageError::Write {
            key: "token".to_string(),
        };
        assert!(err.to_string().contains("token"));
        assert!(err.to_string().contains("write"));
    }
}
