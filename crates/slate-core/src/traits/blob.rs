//! Durable blob storage trait.

use crate::error::StorageError;

/// A synchronous key-value store holding one serialized collection per key.
///
/// A store reads its blob once when loading and rewrites it wholesale after
/// every mutation. Implementations never see partial updates.
pub trait BlobStore {
    /// Read the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been written yet.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        (**self).write(key, contents)
    }
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        (**self).write(key, contents)
    }
}
