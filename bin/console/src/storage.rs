//! Durable storage for the running platform.
//!
//! In the browser entries live in `localStorage`. Everywhere else (server
//! rendering, native tests) they live in memory.

use contable_core::KeyValueStore;
use std::sync::Arc;

/// Returns the storage backing the session and preferences.
#[must_use]
pub fn platform_storage() -> Arc<dyn KeyValueStore> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(browser::BrowserStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(contable_core::MemoryStore::new())
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use contable_core::{KeyValueStore, Result, StorageError};

    /// `window.localStorage`, looked up on every call.
    #[derive(Debug, Clone, Copy)]
    pub struct BrowserStorage;

    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable {
                reason: "localStorage is not accessible".to_string(),
            })?;
        Ok(storage)
    }

    impl KeyValueStore for BrowserStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let value = local_storage()?
                .get_item(key)
                .map_err(|_| StorageError::Read {
                    key: key.to_string(),
                })?;
            Ok(value)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            local_storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::Write {
                    key: key.to_string(),
                })?;
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            local_storage()?
                .remove_item(key)
                .map_err(|_| StorageError::Write {
                    key: key.to_string(),
                })?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_storage_starts_empty_and_round_trips() {
        let storage = platform_storage();
        assert_eq!(storage.get("token").expect("read"), None);
        storage.set("theme", "dark").expect("write");
        assert_eq!(storage.get("theme").expect("read").as_deref(), Some("dark"));
    }
}
