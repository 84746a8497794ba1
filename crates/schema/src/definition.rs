//! Declarative schema definitions
//!
//! A [`SchemaDefinition`] describes a schema as data, so it can be stored
//! next to other configuration and deserialized with serde:
//!
//! ```json
//! {
//!   "name": {
//!     "rules": [
//!       { "rule": "string" },
//!       { "rule": "required", "message": "Name is required" },
//!       { "rule": "max_length", "value": 40 }
//!     ],
//!     "default": "John"
//!   },
//!   "age": { "rules": [{ "rule": "integer" }, { "rule": "min", "value": 0 }] }
//! }
//! ```
//!
//! Built-in rules are recognized by name. Any other name is looked up in the
//! [`RuleRegistry`] passed to [`SchemaDefinition::compile`]; custom rules
//! receive `args`, or `[value]` when only `value` is given.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sieve_validator::{RuleRegistry, Rules, ValueKind};
use tracing::debug;

use crate::error::DefinitionError;
use crate::schema::Schema;

/// A schema described as data: field name to field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition {
    /// Field definitions, in declaration order.
    pub fields: IndexMap<String, FieldDefinition>,
}

/// Rules and default of one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    /// Rules, in evaluation order.
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
    /// Declared default value. `null` means no default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// One rule of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    /// Rule name: a built-in rule or a registered custom rule.
    pub rule: String,
    /// Argument of built-in rules (`min_length`, `max_length`, `min`, `max`,
    /// `pattern`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Arguments of custom rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    /// Custom failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleDefinition {
    /// Creates a rule definition without arguments or message.
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            value: None,
            args: Vec::new(),
            message: None,
        }
    }

    /// Sets the built-in rule value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the custom failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn apply(
        &self,
        field: &str,
        rules: &Rules,
        registry: &RuleRegistry,
    ) -> Result<Rules, DefinitionError> {
        let rules = match self.rule.as_str() {
            "required" => rules.required(),
            "min_length" => rules.min_length(self.int_value(field)?),
            "max_length" => rules.max_length(self.int_value(field)?),
            "min" => rules.min(self.float_value(field)?),
            "max" => rules.max(self.float_value(field)?),
            "pattern" => rules.pattern(self.regex_value(field)?),
            name => match ValueKind::from_name(name) {
                Some(kind) => rules.type_rule(kind),
                None => {
                    let args = match (&self.value, self.args.is_empty()) {
                        (Some(value), true) => vec![value.clone()],
                        _ => self.args.clone(),
                    };
                    rules
                        .using(registry, name.to_owned(), args)
                        .map_err(|source| DefinitionError::Build {
                            field: field.to_owned(),
                            source,
                        })?
                }
            },
        };

        Ok(match &self.message {
            Some(message) => rules.message(message.clone()),
            None => rules,
        })
    }

    fn int_value(&self, field: &str) -> Result<i64, DefinitionError> {
        let value = self.value.as_ref();
        value
            .and_then(Value::as_i64)
            .or_else(|| value.and_then(Value::as_f64).map(|f| f as i64))
            .ok_or_else(|| self.invalid_argument(field, "integer"))
    }

    fn float_value(&self, field: &str) -> Result<f64, DefinitionError> {
        self.value
            .as_ref()
            .and_then(Value::as_f64)
            .ok_or_else(|| self.invalid_argument(field, "numeric"))
    }

    fn regex_value(&self, field: &str) -> Result<Regex, DefinitionError> {
        let source = self
            .value
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid_argument(field, "string"))?;
        Regex::new(source).map_err(|source| DefinitionError::InvalidPattern {
            field: field.to_owned(),
            source,
        })
    }

    fn invalid_argument(&self, field: &str, expected: &'static str) -> DefinitionError {
        DefinitionError::InvalidArgument {
            field: field.to_owned(),
            rule: self.rule.clone(),
            expected,
        }
    }
}

impl FieldDefinition {
    /// Builds the rules of this field.
    pub fn compile(&self, field: &str, registry: &RuleRegistry) -> Result<Rules, DefinitionError> {
        let mut rules = Rules::new();
        for rule in &self.rules {
            rules = rule.apply(field, &rules, registry)?;
        }
        Ok(match &self.default {
            Some(default) => rules.default_value(default.clone()),
            None => rules,
        })
    }
}

impl SchemaDefinition {
    /// Parses a definition from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a definition from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Declares `name`, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }

    /// Builds a [`Schema`], resolving custom rules through `registry`.
    pub fn compile(&self, registry: &RuleRegistry) -> Result<Schema, DefinitionError> {
        let mut builder = Schema::builder();
        for (name, definition) in &self.fields {
            let rules = definition.compile(name, registry)?;
            builder = builder
                .try_field(name.as_str(), rules)
                .map_err(|source| DefinitionError::Build {
                    field: name.clone(),
                    source,
                })?;
        }

        let schema = builder.build();
        debug!(fields = schema.len(), "compiled schema definition");
        Ok(schema)
    }
}
