//! Length rules for strings and arrays.
//!
//! A non-empty value without a length (a number, a boolean, an object) is
//! invalid for both rules. Bounds are taken as-is, so a negative minimum
//! always holds and a negative maximum never does.

use serde_json::Value;

use crate::value::{arg_i64, is_empty, length};

/// Valid iff the value is empty or its length is at least `args[0]`.
pub fn min_length(value: &Value, args: &[Value]) -> bool {
    within(value, args, |len, bound| len >= bound)
}

/// Valid iff the value is empty or its length is at most `args[0]`.
pub fn max_length(value: &Value, args: &[Value]) -> bool {
    within(value, args, |len, bound| len <= bound)
}

fn within(value: &Value, args: &[Value], cmp: impl Fn(i64, i64) -> bool) -> bool {
    if is_empty(value) {
        return true;
    }
    match (length(value), arg_i64(args, 0)) {
        (Some(len), Some(bound)) => i64::try_from(len).is_ok_and(|len| cmp(len, bound)),
        _ => false,
    }
}
