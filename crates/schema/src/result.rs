//! Record results
//!
//! [`RecordErrors`] aggregates the [`FieldErrors`] of every declared field.
//! Fields that passed are present with an empty result; the record is
//! invalid as soon as one field is.
//!
//! Serialized, the field results nest directly under the record, next to the
//! record's own sentinel:
//!
//! ```json
//! { "invalid": true, "name": { "invalid": true, "required": true }, "age": {} }
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use sieve_validator::{FieldErrors, INVALID_KEY};

/// Field results of one record, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordErrors {
    fields: IndexMap<String, FieldErrors>,
}

impl RecordErrors {
    /// Creates a result with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result of `field`, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, errors: FieldErrors) {
        self.fields.insert(field.into(), errors);
    }

    /// Returns `true` if every field is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldErrors::is_valid)
    }

    /// The record-level invalidity sentinel.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The result of `field`, if the schema declares it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.fields.get(field)
    }

    /// Returns `true` if `field` was validated.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Names of the invalid fields, in declaration order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, errors)| errors.is_invalid())
            .map(|(name, _)| name.as_str())
    }

    /// Every field result, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldErrors)> {
        self.fields.iter().map(|(name, errors)| (name.as_str(), errors))
    }

    /// Number of validated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field was validated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RecordErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let invalid = self.is_invalid();
        let mut map = serializer.serialize_map(Some(self.fields.len() + usize::from(invalid)))?;
        if invalid {
            map.serialize_entry(INVALID_KEY, &true)?;
        }
        for (name, errors) in &self.fields {
            map.serialize_entry(name, errors)?;
        }
        map.end()
    }
}
