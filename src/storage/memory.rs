//! In-memory storage backend
//!
//! Backs unit tests and ephemeral runs where nothing should touch disk.

use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Non-durable [`Storage`](super::Storage) implementation over a hash map
///
/// # Examples
///
/// ```
/// use policyrag::storage::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// storage.set("k", "v").unwrap();
/// assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl super::Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap();
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap();
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[test]
    fn test_get_missing_key_returns_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));

        storage.remove("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("missing").unwrap();
    }
}
