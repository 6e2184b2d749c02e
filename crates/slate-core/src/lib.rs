//! slate-core - Local, filterable, paginated record stores.
//!
//! A [`RecordStore`] owns an ordered collection of [`Record`]s of one
//! domain shape (any [`Fields`] implementation), persists it wholesale to a
//! [`BlobStore`] after every mutation, and answers [`Filter`] queries whose
//! results can be sliced with [`paginate`].

pub mod error;
pub mod memory;
pub mod page;
pub mod query;
pub mod record;
pub mod store;
pub mod traits;
pub mod validate;

pub use error::{Error, FieldError, NotFoundError, StorageError, ValidationError};
pub use memory::MemoryBlobStore;
pub use page::{DEFAULT_PAGE_SIZE, Page, paginate};
pub use query::{Filter, Query, QueryIter, Sort};
pub use record::{Record, RecordId};
pub use store::RecordStore;
pub use traits::{BlobStore, Constraint, Fields, Placement};
pub use validate::UniqueKey;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
