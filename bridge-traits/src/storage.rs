//! Key-value storage abstractions.
//!
//! Two backends share one set of semantics: flat string keys, last write wins,
//! no transactions, no expiry.
//! - [`PreferencesPlugin`]: the native shell's preferences store
//! - [`WebStorage`]: browser `localStorage`

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    error::{BridgeError, Result},
    platform::PlatformSendSync,
};

/// Native preferences plugin.
///
/// # Platform Support
///
/// - **iOS**: UserDefaults
/// - **Android**: SharedPreferences
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait PreferencesPlugin: PlatformSendSync {
    /// Retrieve a value. Returns `Ok(None)` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Browser `localStorage`.
///
/// The browser API is synchronous, so this trait is too.
pub trait WebStorage: PlatformSendSync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-memory [`WebStorage`] for hosts without a browser and for tests.
#[derive(Debug, Default)]
pub struct MemoryWebStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryWebStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BridgeError::OperationFailed("memory storage poisoned".into()))?;
        Ok(f(&mut entries))
    }
}

impl WebStorage for MemoryWebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_last_write_wins() {
        let storage = MemoryWebStorage::new();
        storage.set_item("theme", "light").unwrap();
        storage.set_item("theme", "dark").unwrap();

        assert_eq!(storage.get_item("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_memory_storage_remove_missing_key() {
        let storage = MemoryWebStorage::new();
        storage.remove_item("missing").unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }
}
