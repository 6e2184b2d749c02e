//! In-memory blob storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::traits::BlobStore;

/// A [`BlobStore`] kept in process memory.
///
/// Clones share the same underlying map, so a test can hand one handle to a
/// store and inspect the persisted blob through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one blob.
    pub fn with_blob(key: &str, contents: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut blobs) = store.blobs.lock() {
            blobs.insert(key.to_string(), contents.into());
        }
        store
    }

    /// Returns a copy of the blob under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.lock().ok()?.get(key).cloned()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| StorageError::io(key, e))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| StorageError::io(key, e))?;
        blobs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
