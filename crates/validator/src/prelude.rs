//! Prelude module for convenient imports.
//!
//! Provides a single `use sieve_validator::prelude::*;` import that brings
//! in the builder, its entry points, and the result types.
//!
//! # Examples
//!
//! ```rust
//! use sieve_validator::prelude::*;
//!
//! let name = string().required().max_length(40);
//! let age = integer().min(0).max(150);
//! # let _ = (name, age);
//! ```

pub use crate::error::BuildError;
pub use crate::messages::Messages;
pub use crate::registry::RuleRegistry;
pub use crate::result::FieldErrors;
pub use crate::rule::{Failure, Message, RuleName};
pub use crate::rules::{
    Rules, array, boolean, integer, max, max_length, min, min_length, number, object, pattern,
    required, string, type_rule,
};
pub use crate::value::ValueKind;
