//! Regular expression rule.

use regex::Regex;
use serde_json::Value;

use crate::value::is_empty;

/// Valid iff the value is empty or a string matched by `regex`.
///
/// Non-string values never match.
pub fn pattern(regex: &Regex, value: &Value) -> bool {
    if is_empty(value) {
        return true;
    }
    value.as_str().is_some_and(|s| regex.is_match(s))
}
