//! Record shape and constraint traits.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;
use crate::record::Record;

/// Where [`RecordStore::add`](crate::RecordStore::add) inserts new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Newest first.
    #[default]
    Front,
    /// Append, keeping creation order.
    Back,
}

/// The field set of one record domain.
///
/// A domain describes its blob key, how new records are placed, how a
/// partial update is merged, and which constraints a write must satisfy.
pub trait Fields: Clone + Serialize + DeserializeOwned + 'static {
    /// Fixed key under which the domain's collection is persisted.
    const STORAGE_KEY: &'static str;

    /// Insertion position for new records.
    const PLACEMENT: Placement = Placement::Front;

    /// A partial update merged over existing fields.
    type Patch;

    /// Merge `patch` over these fields.
    fn apply(&mut self, patch: Self::Patch);

    /// Canonicalize values before validation (trimming, case folding).
    fn normalize(&mut self) {}

    /// Report per-field violations into `errors`.
    fn validate(&self, errors: &mut ValidationError);

    /// Collection-level constraints registered for every store of this domain.
    fn constraints() -> Vec<Box<dyn Constraint<Self>>> {
        Vec::new()
    }
}

/// A write-time rule checked against every other record in the collection.
///
/// The store calls `check` once per existing record, skipping the record
/// being edited.
pub trait Constraint<F> {
    fn check(&self, candidate: &F, existing: &Record<F>, errors: &mut ValidationError);
}

impl<F, C> Constraint<F> for C
where
    C: Fn(&F, &Record<F>, &mut ValidationError),
{
    fn check(&self, candidate: &F, existing: &Record<F>, errors: &mut ValidationError) {
        self(candidate, existing, errors)
    }
}
