//! # sieve-schema
//!
//! Flat record schemas built from [`sieve_validator::Rules`].
//!
//! A [`Schema`] maps field names to rules. [`Schema::validate`] reports the
//! failures of every declared field; [`Schema::values`] resolves a sanitized
//! record, replacing missing or invalid values with declared defaults.
//!
//! ```rust
//! use sieve_schema::prelude::*;
//! use serde_json::{Value, json};
//!
//! let schema = Schema::builder()
//!     .field("name", string().required().message("Name is required").default_value("John"))
//!     .field("age", integer().min(0))
//!     .build();
//!
//! let record = json!({ "age": 30, "role": "admin" });
//!
//! let errors = schema.validate(&record);
//! assert_eq!(errors.invalid_fields().collect::<Vec<_>>(), ["name"]);
//! assert_eq!(
//!     serde_json::to_value(&errors).unwrap(),
//!     json!({
//!         "invalid": true,
//!         "name": { "invalid": true, "required": "Name is required" },
//!         "age": {}
//!     }),
//! );
//!
//! // Undeclared fields are dropped, invalid ones fall back to their default.
//! assert_eq!(
//!     Value::Object(schema.values(&record)),
//!     json!({ "name": "John", "age": 30 }),
//! );
//! ```
//!
//! Schemas can also be loaded from data with [`SchemaDefinition`].

pub mod definition;
pub mod error;
pub mod prelude;
pub mod result;
pub mod schema;

pub use definition::{FieldDefinition, RuleDefinition, SchemaDefinition};
pub use error::DefinitionError;
pub use result::RecordErrors;
pub use schema::{Schema, SchemaBuilder, Values};
