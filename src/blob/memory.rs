//! In-memory blob store for tests and embedded use.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::blob::BlobStore;
use crate::error::StoreError;

/// [`BlobStore`] backed by a shared in-process map.
///
/// Clones share the same data, so a test can hand one handle to the
/// facade and inspect the raw blob through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.blobs.lock().remove(key);
        Ok(())
    }
}
