//! # sieve-validator
//!
//! Immutable, chainable validators for dynamically typed values.
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve_validator::prelude::*;
//! use serde_json::json;
//!
//! // Each call returns a new builder; nothing is mutated.
//! let username = string().required().min_length(3).message("Too short");
//!
//! assert!(username.validate(&json!("alice")).is_valid());
//!
//! let errors = username.validate(&json!("al"));
//! assert_eq!(errors.rule_names().collect::<Vec<_>>(), ["min_length"]);
//! assert_eq!(
//!     serde_json::to_value(&errors).unwrap(),
//!     json!({ "invalid": true, "min_length": "Too short" }),
//! );
//! ```
//!
//! ## Empty values
//!
//! Every built-in rule except `required` accepts an empty value (`null`,
//! `""`, `[]`). Optional fields can carry type and format rules without
//! guarding against absence; add `required` when the value must be present.
//!
//! ## Built-in Rules
//!
//! - **Presence**: [`Rules::required`]
//! - **Type**: [`Rules::type_rule`], [`Rules::string`], [`Rules::number`],
//!   [`Rules::integer`], [`Rules::boolean`], [`Rules::array`], [`Rules::object`]
//! - **Length**: [`Rules::min_length`], [`Rules::max_length`]
//! - **Range**: [`Rules::min`], [`Rules::max`]
//! - **Pattern**: [`Rules::pattern`]
//! - **Custom**: [`Rules::rule`], [`Rules::using`] with a [`RuleRegistry`]

pub mod error;
pub mod messages;
pub mod prelude;
pub mod registry;
pub mod result;
pub mod rule;
pub mod rules;
pub mod validators;
pub mod value;

pub use error::BuildError;
pub use messages::Messages;
pub use registry::RuleRegistry;
pub use result::{FieldErrors, INVALID_KEY};
pub use rule::{Args, Failure, Message, Predicate, RuleBinding, RuleName};
pub use rules::{
    Rules, array, boolean, integer, max, max_length, min, min_length, number, object, pattern,
    required, string, type_rule,
};
pub use value::ValueKind;
