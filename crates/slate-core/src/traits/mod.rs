//! Core traits for record shapes and durable storage.

mod blob;
mod fields;

pub use blob::BlobStore;
pub use fields::{Constraint, Fields, Placement};
