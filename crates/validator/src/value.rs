//! Type inspection helpers shared by the built-in rules.
//!
//! Everything in this crate validates [`serde_json::Value`]. The helpers here
//! answer the two questions every rule asks first: what kind of value is
//! this, and is it empty?
//!
//! Emptiness is deliberately narrow: `null`, an empty string and an empty
//! array are empty. Objects expose no length, so `{}` is a present value.
//! `0` and `false` are present values too.

use std::fmt;

use serde_json::Value;

// ============================================================================
// VALUE KIND
// ============================================================================

/// The dynamic type of a JSON value.
///
/// `Integer` is a refinement of `Number`: [`ValueKind::of`] reports
/// `Integer` for whole numbers, and [`ValueKind::matches`] accepts integers
/// wherever `Number` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number.
    Number,
    /// A number with no fractional part.
    Integer,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl ValueKind {
    /// Returns the most specific kind of `value`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns `true` if `value` is of this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match (self, Self::of(value)) {
            (Self::Number, Self::Integer) => true,
            (Self::Integer, Self::Number) => value.as_f64().is_some_and(|f| f.fract() == 0.0),
            (expected, actual) => expected == actual,
        }
    }

    /// The rule name used for this kind in error results.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Parses a rule name back into a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "string" => Self::String,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => return None,
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LENGTH / EMPTINESS
// ============================================================================

/// Returns the length of values that have one.
///
/// Strings are measured in Unicode scalar values, arrays in elements.
/// Every other kind, objects included, has no length.
#[must_use]
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Returns `true` for `null` and for values whose length is zero.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    value.is_null() || length(value) == Some(0)
}

/// Reads a numeric rule argument as `f64`.
pub(crate) fn arg_f64(args: &[Value], index: usize) -> Option<f64> {
    args.get(index).and_then(Value::as_f64)
}

/// Reads a length rule argument as `i64`, truncating fractional values.
pub(crate) fn arg_i64(args: &[Value], index: usize) -> Option<i64> {
    let arg = args.get(index)?;
    arg.as_i64().or_else(|| arg.as_f64().map(|f| f as i64))
}
