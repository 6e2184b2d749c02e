//! The generic record store.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::error::{NotFoundError, StorageError, ValidationError};
use crate::query::{Filter, Query, Sort};
use crate::record::{IdGenerator, Record, RecordId};
use crate::traits::{BlobStore, Constraint, Fields, Placement};

/// An ordered collection of records persisted to a single durable blob.
///
/// The store owns the collection exclusively. Every successful mutation is
/// followed by a full rewrite of the blob; a failed write rolls the
/// in-memory collection back so memory and storage never diverge.
pub struct RecordStore<F: Fields> {
    key: String,
    backend: Box<dyn BlobStore>,
    records: Vec<Record<F>>,
    constraints: Vec<Box<dyn Constraint<F>>>,
    ids: IdGenerator,
}

impl<F: Fields> RecordStore<F> {
    /// Open the store for `F` on `backend` and load its collection.
    pub fn open(backend: impl BlobStore + 'static) -> Self {
        Self::open_with_key(backend, F::STORAGE_KEY)
    }

    /// Like [`open`](Self::open), but persist under a custom key.
    pub fn open_with_key(backend: impl BlobStore + 'static, key: impl Into<String>) -> Self {
        let mut store = Self {
            key: key.into(),
            backend: Box::new(backend),
            records: Vec::new(),
            constraints: F::constraints(),
            ids: IdGenerator::default(),
        };
        store.load();
        store
    }

    /// Register an additional write-time constraint for this instance.
    pub fn with_constraint(mut self, constraint: impl Constraint<F> + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// The key this store persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// A missing blob yields an empty collection. So does an unreadable or
    /// malformed one: the failure is logged and never reaches the caller.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&mut self) -> &[Record<F>] {
        let records = match self.backend.read(&self.key) {
            Ok(Some(contents)) => match Self::decode(&self.key, &contents) {
                Ok(records) => records,
                Err(err) => {
                    warn!(error = %err, "Discarding malformed collection");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "Failed to read collection, starting empty");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        self.records = records
            .into_iter()
            .filter(|record| {
                let fresh = seen.insert(record.id);
                if !fresh {
                    warn!(id = %record.id, "Dropping record with duplicate id");
                }
                fresh
            })
            .collect();

        self.ids = IdGenerator::default();
        for record in &self.records {
            self.ids.observe(record.id);
        }

        debug!(count = self.records.len(), "Loaded collection");
        &self.records
    }

    /// Validate and insert a new record, then persist.
    ///
    /// On a validation failure nothing is written and every violated
    /// constraint is reported.
    #[instrument(skip(self, input), fields(key = %self.key))]
    pub fn add(&mut self, mut input: F) -> Result<Record<F>> {
        input.normalize();
        self.check(&input, None)?;

        let now = Utc::now();
        let record = Record {
            id: self.ids.next(now),
            fields: input,
            created_at: now,
            updated_at: now,
        };

        let index = match F::PLACEMENT {
            Placement::Front => 0,
            Placement::Back => self.records.len(),
        };
        self.records.insert(index, record.clone());

        if let Err(err) = self.persist() {
            self.records.remove(index);
            return Err(err.into());
        }

        debug!(id = %record.id, "Added record");
        Ok(record)
    }

    /// Merge `patch` over the record with `id`, validate, then persist.
    #[instrument(skip(self, patch), fields(key = %self.key))]
    pub fn update(&mut self, id: RecordId, patch: F::Patch) -> Result<Record<F>> {
        let index = self.position(id).ok_or(NotFoundError { id })?;

        let mut input = self.records[index].fields.clone();
        input.apply(patch);
        input.normalize();
        self.check(&input, Some(id))?;

        let previous = self.records[index].clone();
        let updated = Record {
            fields: input,
            updated_at: Utc::now().max(previous.created_at),
            ..previous.clone()
        };
        self.records[index] = updated.clone();

        if let Err(err) = self.persist() {
            self.records[index] = previous;
            return Err(err.into());
        }

        debug!(id = %id, "Updated record");
        Ok(updated)
    }

    /// Delete the record with `id`, if present, then persist.
    ///
    /// Returns whether a record was removed. Removing an absent id leaves
    /// the collection unchanged.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn remove(&mut self, id: RecordId) -> Result<bool> {
        let removed = self
            .position(id)
            .map(|index| (index, self.records.remove(index)));

        if let Err(err) = self.persist() {
            if let Some((index, record)) = removed {
                self.records.insert(index, record);
            }
            return Err(err.into());
        }

        if removed.is_some() {
            debug!(id = %id, "Removed record");
        }
        Ok(removed.is_some())
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record<F>> {
        self.records.iter().find(|record| record.id == id)
    }

    /// The full collection in current order.
    pub fn records(&self) -> &[Record<F>] {
        &self.records
    }

    /// Iterate over the full collection in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record<F>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A lazy view of the records matching `filter`, optionally sorted.
    pub fn query(&self, filter: Filter<F>, sort: Option<Sort<F>>) -> Query<'_, F> {
        Query::new(&self.records, filter, sort)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn check(&self, candidate: &F, editing: Option<RecordId>) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        candidate.validate(&mut errors);

        for existing in self.records.iter().filter(|r| Some(r.id) != editing) {
            for constraint in &self.constraints {
                constraint.check(candidate, existing, &mut errors);
            }
        }

        errors.into_result()
    }

    fn persist(&self) -> std::result::Result<(), StorageError> {
        let contents =
            serde_json::to_string_pretty(&self.records).map_err(|e| StorageError::Encode {
                key: self.key.clone(),
                message: e.to_string(),
            })?;
        self.backend.write(&self.key, &contents)
    }

    fn decode(key: &str, contents: &str) -> std::result::Result<Vec<Record<F>>, StorageError> {
        serde_json::from_str(contents).map_err(|e| StorageError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl<'a, F: Fields> IntoIterator for &'a RecordStore<F> {
    type Item = &'a Record<F>;
    type IntoIter = std::slice::Iter<'a, Record<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<F: Fields> fmt::Debug for RecordStore<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .field("constraints", &self.constraints.len())
            .finish_non_exhaustive()
    }
}
