//! Error types for slate record stores.
//!
//! This module provides a unified error type with explicit variants for
//! validation, lookup and storage failures.

use std::fmt;
use thiserror::Error;

use crate::record::RecordId;

/// The unified error type for record store operations.
///
/// Every variant is recoverable: callers surface it to the user and let
/// them resubmit. Nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more field constraints were violated.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The operation referenced an id absent from the collection.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The durable blob could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns the per-field messages if this is a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Error::Validation(err) => Some(err.errors()),
            _ => None,
        }
    }
}

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field the message refers to.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation failures for one write.
///
/// Validation never stops at the first problem; every violated constraint
/// is collected so the caller can report all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against `field`. Repeated identical messages are
    /// kept once.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let err = FieldError {
            field: field.into(),
            message: message.into(),
        };
        if !self.errors.contains(&err) {
            self.errors.push(err);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Check whether any violation was reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Convert into a `Result`, failing if any violation was recorded.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// An operation referenced a record that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("record {id} not found")]
pub struct NotFoundError {
    pub id: RecordId,
}

/// Durable blob errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read or write the blob.
    #[error("I/O error on '{key}': {message}")]
    Io { key: String, message: String },

    /// The collection could not be serialized.
    #[error("failed to encode '{key}': {message}")]
    Encode { key: String, message: String },

    /// The blob exists but is not a valid record collection.
    #[error("failed to decode '{key}': {message}")]
    Decode { key: String, message: String },
}

impl StorageError {
    /// Wrap a backend failure for `key`.
    pub fn io(key: &str, err: impl fmt::Display) -> Self {
        StorageError::Io {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_field() {
        let mut errors = ValidationError::new();
        errors.push("name", "Name must be at least 2 characters");
        errors.push("id", "ID must be at least 3 characters");

        assert_eq!(errors.errors().len(), 2);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("id"));
        assert_eq!(
            errors.to_string(),
            "name: Name must be at least 2 characters; id: ID must be at least 3 characters"
        );
    }

    #[test]
    fn repeated_messages_are_kept_once() {
        let mut errors = ValidationError::new();
        errors.push("date", "duplicate");
        errors.push("date", "duplicate");
        assert_eq!(errors.errors().len(), 1);
    }

    #[test]
    fn empty_validation_is_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn not_found_display() {
        let err = Error::from(NotFoundError { id: RecordId::new(42) });
        assert_eq!(err.to_string(), "record 42 not found");
        assert!(err.field_errors().is_none());
    }
}
