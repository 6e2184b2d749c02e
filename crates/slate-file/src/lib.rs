//! slate-file - Filesystem-backed blob storage.

mod store;

pub use store::FileBlobStore;
