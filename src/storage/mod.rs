//! Key-value storage backends for PolicyRAG
//!
//! All persisted state lives in a small process-wide key-value area: each
//! key holds one JSON document that is read and replaced whole. The
//! [`Storage`] trait makes that area injectable so the chat stores can be
//! exercised against an in-memory backend in tests.

use crate::error::{PolicyRagError, Result};
use directories::ProjectDirs;
use sled::Db;
use std::path::{Path, PathBuf};

pub mod memory;
pub use memory::MemoryStorage;

/// Key holding the ordered list of chat session records (JSON array).
pub const SESSIONS_KEY: &str = "policyrag_chat_sessions";

/// Key holding the active session id (plain string, absent if none).
pub const ACTIVE_CHAT_KEY: &str = "policyrag_active_chat";

/// Key holding the session-id → message-list map (JSON object).
pub const MESSAGES_KEY: &str = "policyrag_chat_messages";

/// Key holding the demo login record (JSON object).
pub const USER_KEY: &str = "policyrag_user";

/// Capability to read, write, and remove a string value by key
///
/// Mutations must be durable before returning; there is no transaction
/// spanning multiple keys. Callers treat read failures as missing data and
/// propagate write failures.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` and its value; removing an absent key is a no-op
    fn remove(&self, key: &str) -> Result<()>;
}

/// Durable storage backend over an embedded `sled` database
pub struct SledStorage {
    db: Db,
}

impl SledStorage {
    /// Open the database in the user's data directory
    ///
    /// The location can be overridden with the `POLICYRAG_DATA_DIR`
    /// environment variable, which makes it easy to point the binary at a
    /// test directory without touching the user's application data.
    pub fn new() -> Result<Self> {
        if let Ok(override_dir) = std::env::var("POLICYRAG_DATA_DIR") {
            return Self::new_with_path(override_dir);
        }

        let proj_dirs = ProjectDirs::from("com", "policyrag", "policyrag")
            .ok_or_else(|| PolicyRagError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir().join("chat.db"))
    }

    /// Open the database at the specified path
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable (for example, using a temporary
    /// directory).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use policyrag::storage::SledStorage;
    ///
    /// let storage = SledStorage::new_with_path("/tmp/policyrag_test.db").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let db = sled::open(&path)
            .map_err(|e| PolicyRagError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        PolicyRagError::Storage(format!(
            "Failed to create data directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    Ok(())
}

impl Storage for SledStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self
            .db
            .get(key.as_bytes())
            .map_err(|e| PolicyRagError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let value = String::from_utf8(bytes.to_vec())
                    .map_err(|e| PolicyRagError::Storage(format!("Invalid UTF-8 value: {}", e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| PolicyRagError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| PolicyRagError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| PolicyRagError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| PolicyRagError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    fn create_test_storage() -> (SledStorage, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let storage =
            SledStorage::new_with_path(dir.path().join("chat.db")).expect("failed to open storage");
        (storage, dir)
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (storage, _dir) = create_test_storage();
        assert!(storage.get("missing").expect("get failed").is_none());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let (storage, _dir) = create_test_storage();
        storage.set("k", "value").expect("set failed");
        assert_eq!(storage.get("k").expect("get failed").as_deref(), Some("value"));
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let (storage, _dir) = create_test_storage();
        storage.set("k", "first").expect("set failed");
        storage.set("k", "second").expect("set failed");
        assert_eq!(storage.get("k").expect("get failed").as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_deletes_value() {
        let (storage, _dir) = create_test_storage();
        storage.set("k", "value").expect("set failed");
        storage.remove("k").expect("remove failed");
        assert!(storage.get("k").expect("get failed").is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (storage, _dir) = create_test_storage();
        storage.remove("never-set").expect("first remove failed");
        storage.remove("never-set").expect("second remove failed");
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("chat.db");

        {
            let storage = SledStorage::new_with_path(&path).expect("failed to open storage");
            storage.set("k", "persisted").expect("set failed");
        }

        let storage = SledStorage::new_with_path(&path).expect("failed to reopen storage");
        assert_eq!(
            storage.get("k").expect("get failed").as_deref(),
            Some("persisted")
        );
    }

    #[test]
    #[serial]
    fn test_new_respects_env_override() {
        // Nested path to exercise parent directory creation.
        let dir = tempdir().expect("failed to create tempdir");
        let data_dir = dir.path().join("nested").join("data");
        env::set_var("POLICYRAG_DATA_DIR", data_dir.to_string_lossy().to_string());

        let storage = SledStorage::new().expect("new failed with env override");
        storage.set("k", "v").expect("set failed");
        assert!(data_dir.exists());

        env::remove_var("POLICYRAG_DATA_DIR");
    }
}
