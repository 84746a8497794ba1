//! The schema aggregator
//!
//! A [`Schema`] maps field names to [`Rules`]. It is an allow-list: only
//! declared fields are validated or resolved, everything else in a record is
//! ignored. A field missing from the record, or a record that is not an
//! object, is validated as `null`.
//!
//! Two independent operations traverse the same fields:
//!
//! - [`Schema::validate`] reports what is wrong with each field;
//! - [`Schema::values`] resolves a sanitized record, falling back to each
//!   field's declared default when the input value is missing or invalid.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use sieve_validator::{BuildError, Rules};
use sieve_validator::value::is_empty;
use tracing::debug;

use crate::result::RecordErrors;

static NULL: Value = Value::Null;

/// Resolved field values.
pub type Values = Map<String, Value>;

// ============================================================================
// SCHEMA
// ============================================================================

/// A fixed mapping from field name to the rules of that field.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Rules>,
}

impl Schema {
    /// Creates a schema from `(name, rules)` pairs. A repeated name keeps
    /// its first position and the last rules.
    ///
    /// # Panics
    ///
    /// Panics if a field is named after the invalidity flag (`"invalid"`).
    /// Use [`Schema::try_new`] to get an error instead.
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, Rules)>) -> Self {
        match Self::try_new(fields) {
            Ok(schema) => schema,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a schema from `(name, rules)` pairs, failing with
    /// [`BuildError::ReservedName`] on a field named after the invalidity
    /// flag.
    pub fn try_new<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, Rules)>,
    ) -> Result<Self, BuildError> {
        fields
            .into_iter()
            .try_fold(Self::builder(), |builder, (name, rules)| builder.try_field(name, rules))
            .map(SchemaBuilder::build)
    }

    /// Starts a [`SchemaBuilder`].
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Validates every declared field of `record`.
    #[must_use = "validation result must be checked"]
    pub fn validate(&self, record: &Value) -> RecordErrors {
        let mut errors = RecordErrors::new();
        for (name, rules) in &self.fields {
            errors.insert(name.as_str(), rules.validate(field(record, name)));
        }

        debug!(
            fields = self.fields.len(),
            invalid = errors.invalid_fields().count(),
            "validated record"
        );
        errors
    }

    /// Resolves the value of every declared field.
    ///
    /// A field keeps its input value when it is non-empty and valid. Otherwise
    /// it takes the declared default, or is left out when there is none.
    #[must_use]
    pub fn values(&self, record: &Value) -> Values {
        let mut values = Values::new();
        for (name, rules) in &self.fields {
            let value = field(record, name);
            if !is_empty(value) && rules.is_valid(value) {
                values.insert(name.clone(), value.clone());
            } else if let Some(default) = rules.declared_default() {
                values.insert(name.clone(), default.clone());
            }
        }

        debug!(
            fields = self.fields.len(),
            resolved = values.len(),
            "resolved record values"
        );
        values
    }

    /// The values resolved from an empty record: every declared default.
    #[must_use]
    pub fn defaults(&self) -> Values {
        self.values(&NULL)
    }

    /// Hands `(validate(record), values(record))` to `f` and returns what
    /// `f` returns. `f` is called exactly once.
    pub fn values_with<R>(
        &self,
        record: &Value,
        f: impl FnOnce(RecordErrors, Values) -> R,
    ) -> R {
        f(self.validate(record), self.values(record))
    }

    /// Returns `true` if every declared field of `record` is valid.
    #[must_use]
    pub fn is_valid(&self, record: &Value) -> bool {
        self.fields
            .iter()
            .all(|(name, rules)| rules.is_valid(field(record, name)))
    }

    /// The rules of `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rules> {
        self.fields.get(name)
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Rules)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects `(name, rules)` pairs with [`Schema::new`], panicking on a reserved
/// field name.
impl<K: Into<String>> FromIterator<(K, Rules)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Rules)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn field<'a>(record: &'a Value, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&NULL)
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, Rules>,
}

impl SchemaBuilder {
    /// Declares `name` with `rules`. Declaring a name again replaces its
    /// rules but keeps its position.
    ///
    /// # Panics
    ///
    /// Panics if `name` is the invalidity flag key (`"invalid"`). Use
    /// [`SchemaBuilder::try_field`] to get an error instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(self, name: impl Into<String>, rules: Rules) -> Self {
        match self.try_field(name, rules) {
            Ok(builder) => builder,
            Err(err) => panic!("{err}"),
        }
    }

    /// Declares `name` with `rules`, failing with
    /// [`BuildError::ReservedName`] when `name` is the invalidity flag key.
    pub fn try_field(mut self, name: impl Into<String>, rules: Rules) -> Result<Self, BuildError> {
        let name = name.into();
        BuildError::check_name(&name)?;
        self.fields.insert(name, rules);
        Ok(self)
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}
