//! Numeric range rules.

use serde_json::Value;

use crate::value::{arg_f64, is_empty};

/// Valid iff the value is empty or a number `>= args[0]`.
pub fn min(value: &Value, args: &[Value]) -> bool {
    compare(value, args, |n, bound| n >= bound)
}

/// Valid iff the value is empty or a number `<= args[0]`.
pub fn max(value: &Value, args: &[Value]) -> bool {
    compare(value, args, |n, bound| n <= bound)
}

fn compare(value: &Value, args: &[Value], cmp: impl Fn(f64, f64) -> bool) -> bool {
    if is_empty(value) {
        return true;
    }
    match (value.as_f64(), arg_f64(args, 0)) {
        (Some(n), Some(bound)) => cmp(n, bound),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn min_bounds() {
        let three = [json!(3)];
        assert!(min(&json!(3), &three));
        assert!(min(&json!(6), &three));
        assert!(min(&json!(3.5), &three));
        assert!(!min(&json!(2), &three));
        assert!(!min(&json!({}), &three));
        assert!(!min(&json!("7"), &three));
    }

    #[test]
    fn max_bounds() {
        let three = [json!(3)];
        assert!(max(&json!(3), &three));
        assert!(max(&json!(-2), &three));
        assert!(!max(&json!(4), &three));
        assert!(!max(&json!({}), &three));
    }

    #[test]
    fn empty_passes() {
        for value in [json!(null), json!(""), json!([])] {
            assert!(min(&value, &[json!(3)]));
            assert!(max(&value, &[json!(3)]));
        }
    }

    #[test]
    fn zero_is_a_number() {
        assert!(!min(&json!(0), &[json!(1)]));
        assert!(max(&json!(0), &[json!(1)]));
    }
}
