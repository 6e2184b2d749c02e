//! Field validation helpers and reusable constraints.

use crate::error::ValidationError;
use crate::record::Record;
use crate::traits::Constraint;

/// Require `value` to be non-empty once surrounding whitespace is removed.
///
/// Returns whether the check passed.
pub fn required(errors: &mut ValidationError, field: &str, label: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, format!("{} is required", label));
        false
    } else {
        true
    }
}

/// Require at least `min` characters once surrounding whitespace is removed.
pub fn min_len(
    errors: &mut ValidationError,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
) -> bool {
    if value.trim().chars().count() < min {
        errors.push(field, format!("{} must be at least {} characters", label, min));
        false
    } else {
        true
    }
}

/// Rejects a candidate whose key equals the key of another record.
///
/// # Example
///
/// ```
/// use slate_core::{Constraint, Record, RecordId, UniqueKey, ValidationError};
///
/// let unique = UniqueKey::new("code", "Code already taken", |code: &String| code.clone());
/// let existing = Record {
///     id: RecordId::new(1),
///     fields: "A1".to_string(),
///     created_at: chrono::Utc::now(),
///     updated_at: chrono::Utc::now(),
/// };
///
/// let mut errors = ValidationError::new();
/// unique.check(&"A1".to_string(), &existing, &mut errors);
/// assert!(errors.has_field("code"));
/// ```
pub struct UniqueKey<F, K> {
    field: String,
    message: String,
    key: Box<dyn Fn(&F) -> K>,
}

impl<F, K: PartialEq> UniqueKey<F, K> {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        key: impl Fn(&F) -> K + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            key: Box::new(key),
        }
    }
}

impl<F, K: PartialEq> Constraint<F> for UniqueKey<F, K> {
    fn check(&self, candidate: &F, existing: &Record<F>, errors: &mut ValidationError) {
        if (self.key)(candidate) == (self.key)(&existing.fields) {
            errors.push(self.field.clone(), self.message.clone());
        }
    }
}

impl<F, K> std::fmt::Debug for UniqueKey<F, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniqueKey")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
