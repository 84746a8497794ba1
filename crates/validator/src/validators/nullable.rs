//! Presence rule.

use serde_json::Value;

use crate::value::is_empty;

/// Valid iff the value is present.
///
/// `null`, `""` and `[]` are missing. `0`, `false` and `{}` are present.
pub fn required(value: &Value, _args: &[Value]) -> bool {
    !is_empty(value)
}
