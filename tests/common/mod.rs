use std::sync::Arc;
use tempfile::TempDir;

use policyrag::storage::{SledStorage, Storage};

#[allow(dead_code)]
pub fn create_temp_storage() -> (Arc<dyn Storage>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("chat.db");
    let storage = SledStorage::new_with_path(db_path).expect("failed to open sled storage");
    (Arc::new(storage), tmp)
}
