//! Type rules.

use serde_json::Value;

use crate::value::{ValueKind, is_empty};

/// Valid iff the value is empty or of kind `expected`.
pub fn kind(expected: ValueKind, value: &Value) -> bool {
    is_empty(value) || expected.matches(value)
}
