//! Filesystem storage for record collections.
//!
//! ## Directory Structure
//!
//! ```text
//! $ROOT/
//! ├── attendanceRecords.json
//! ├── attendanceRecords.lock
//! ├── blogPosts.json
//! └── contacts.json
//! ```
//!
//! Each key owns one JSON file. Writes go to a temporary sibling that is
//! renamed over the target, so readers only ever see a complete blob.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument};

use slate_core::{BlobStore, StorageError};

/// A [`BlobStore`] keeping one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a new file store at the given root directory.
    ///
    /// The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convert a key into a filesystem-safe file stem.
    fn file_stem(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c => c,
            })
            .collect()
    }

    /// Get the path of the blob for `key`.
    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", Self::file_stem(key)))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.lock", Self::file_stem(key)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.tmp", Self::file_stem(key)))
    }

    fn replace(&self, key: &str, contents: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.root)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path(key))?;
        lock_file.lock_exclusive()?;

        let temp_path = self.temp_path(key);
        let result = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, self.blob_path(key))
        })();

        lock_file.unlock()?;
        result
    }
}

impl BlobStore for FileBlobStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(key, err)),
        }
    }

    #[instrument(skip(self, contents), fields(root = %self.root.display()))]
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        self.replace(key, contents)
            .map_err(|err| StorageError::io(key, err))?;

        debug!(bytes = contents.len(), "Wrote blob");

        Ok(())
    }
}
