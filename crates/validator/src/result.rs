//! Field results
//!
//! [`FieldErrors`] is the outcome of validating one value against one
//! [`Rules`](crate::Rules) builder. It maps each failed rule name to its
//! [`Failure`] record, in registration order, and carries the invalidity
//! sentinel: a result with no failures is valid.
//!
//! Serialized, a result is a flat map:
//!
//! ```json
//! { "invalid": true, "required": true, "min_length": "Too short" }
//! ```
//!
//! Each failed rule maps to `true`, or to its custom message when one was
//! attached. A valid result serializes as `{}`.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::rule::Failure;

/// Key of the invalidity sentinel in serialized results.
pub const INVALID_KEY: &str = "invalid";

/// Failed rules of one value, keyed by rule name in registration order.
///
/// Keys are the string form of the rule name, so a custom rule named after a
/// built-in one shares its key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    failures: IndexMap<String, Failure>,
}

impl FieldErrors {
    /// Creates a valid (empty) result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure.
    ///
    /// When the same rule already failed, the first record is kept and this
    /// returns `false`.
    pub fn insert(&mut self, failure: Failure) -> bool {
        match self.failures.entry(failure.rule.as_str().to_owned()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(failure);
                true
            }
        }
    }

    /// Returns `true` if no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// The invalidity sentinel.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Number of failed rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` if no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Looks up the failure of `rule`.
    #[must_use]
    pub fn get(&self, rule: &str) -> Option<&Failure> {
        self.failures.get(rule)
    }

    /// Returns `true` if `rule` failed.
    #[must_use]
    pub fn contains(&self, rule: &str) -> bool {
        self.get(rule).is_some()
    }

    /// Names of the failed rules, in registration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }

    /// Failure records, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.failures.values()
    }

    /// Custom messages of the failed rules that carry one.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.failures.values().filter_map(|f| f.message.as_deref())
    }
}

impl IntoIterator for FieldErrors {
    type Item = Failure;
    type IntoIter = indexmap::map::IntoValues<String, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_values()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a Failure;
    type IntoIter = indexmap::map::Values<'a, String, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.values()
    }
}

impl FromIterator<Failure> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        let mut errors = Self::new();
        for failure in iter {
            errors.insert(failure);
        }
        errors
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sentinel = usize::from(self.is_invalid());
        let mut map = serializer.serialize_map(Some(self.failures.len() + sentinel))?;
        if self.is_invalid() {
            map.serialize_entry(INVALID_KEY, &true)?;
        }
        for (rule, failure) in &self.failures {
            match &failure.message {
                Some(message) => map.serialize_entry(rule, message)?,
                None => map.serialize_entry(rule, &true)?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleName;
    use crate::value::ValueKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn failure(rule: RuleName) -> Failure {
        Failure::new(rule, std::iter::empty())
    }

    #[test]
    fn empty_result_is_valid() {
        let errors = FieldErrors::new();
        assert!(errors.is_valid());
        assert!(!errors.is_invalid());
        assert_eq!(serde_json::to_value(&errors).unwrap(), json!({}));
    }

    #[test]
    fn keeps_registration_order() {
        let errors: FieldErrors = [
            failure(RuleName::Type(ValueKind::String)),
            failure(RuleName::Required),
            failure(RuleName::MinLength),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            errors.rule_names().collect::<Vec<_>>(),
            ["string", "required", "min_length"]
        );
    }

    #[test]
    fn first_failure_of_a_rule_wins() {
        let mut errors = FieldErrors::new();
        let mut first = failure(RuleName::Pattern);
        first.message = Some("first".into());
        let mut second = failure(RuleName::Pattern);
        second.message = Some("second".into());

        assert!(errors.insert(first));
        assert!(!errors.insert(second));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("pattern").unwrap().message.as_deref(), Some("first"));
    }

    #[test]
    fn serializes_flagged_map() {
        let mut messaged = failure(RuleName::MinLength);
        messaged.message = Some("Too short".into());
        let errors: FieldErrors = [failure(RuleName::Required), messaged].into_iter().collect();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "invalid": true, "required": true, "min_length": "Too short" })
        );
        assert_eq!(errors.messages().collect::<Vec<_>>(), ["Too short"]);
    }

    #[test]
    fn lookup_by_name() {
        let errors: FieldErrors = [failure(RuleName::custom("even"))].into_iter().collect();
        assert!(errors.contains("even"));
        assert!(!errors.contains("odd"));
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn builtin_and_custom_rules_share_a_key() {
        let mut custom = failure(RuleName::custom("string"));
        custom.message = Some("custom".into());
        let errors: FieldErrors = [failure(RuleName::Type(ValueKind::String)), custom]
            .into_iter()
            .collect();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("string").unwrap().message, None);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "invalid": true, "string": true })
        );
    }
}
