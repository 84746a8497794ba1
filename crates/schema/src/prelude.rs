//! Common imports for building and using schemas.
//!
//! Re-exports the validator prelude alongside the schema types.

pub use sieve_validator::prelude::*;

pub use crate::definition::{FieldDefinition, RuleDefinition, SchemaDefinition};
pub use crate::error::DefinitionError;
pub use crate::result::RecordErrors;
pub use crate::schema::{Schema, SchemaBuilder, Values};
