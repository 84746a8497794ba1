//! Built-in rule predicates
//!
//! Every predicate here follows the same contract: `(value, args) -> bool`,
//! pure and total. All of them except [`required`] treat an empty value
//! (`null`, `""`, `[]`) as valid. Absence is not a type error; only
//! `required` rejects it.
//!
//! # Categories
//!
//! - **Presence**: [`required`]
//! - **Type**: [`kind`]
//! - **Length**: [`min_length`], [`max_length`]
//! - **Range**: [`min`], [`max`]
//! - **Pattern**: [`pattern`]
//!
//! These are leaf functions. [`Rules`](crate::Rules) binds them to names
//! and arguments.

pub mod length;
pub mod nullable;
pub mod pattern;
pub mod range;
pub mod types;

pub use length::{max_length, min_length};
pub use nullable::required;
pub use pattern::pattern;
pub use range::{max, min};
pub use types::kind;
