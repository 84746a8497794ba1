//! Message catalogs
//!
//! [`Messages`] turns a [`FieldErrors`] into user-facing strings. It maps rule
//! names to a literal message or a formatter of the failure record; failures
//! of rules without an entry are dropped.
//!
//! Pair it with [`Rules::validate_with`](crate::Rules::validate_with) to get
//! messages straight out of validation:
//!
//! ```rust
//! use sieve_validator::{Messages, required};
//! use serde_json::json;
//!
//! let messages = Messages::new().with("required", "This field is required");
//! let rendered = required().validate_with(&json!(null), |errors| messages.format(&errors));
//! assert_eq!(rendered, ["This field is required"]);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use crate::result::FieldErrors;
use crate::rule::{Failure, Message};

/// A catalog of messages keyed by rule name.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    entries: HashMap<Cow<'static, str>, Message>,
}

impl Messages {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for `rule`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(
        mut self,
        rule: impl Into<Cow<'static, str>>,
        message: impl Into<Message>,
    ) -> Self {
        self.entries.insert(rule.into(), message.into());
        self
    }

    /// Sets a formatter for `rule`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fn<F>(self, rule: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Failure) -> String + Send + Sync + 'static,
    {
        self.with(rule, Message::formatter(f))
    }

    /// Returns `true` if `rule` has a message.
    #[must_use]
    pub fn contains(&self, rule: &str) -> bool {
        self.entries.contains_key(rule)
    }

    /// Renders the message of a single failure, if its rule has one.
    #[must_use]
    pub fn render(&self, failure: &Failure) -> Option<String> {
        self.entries
            .get(failure.rule.as_str())
            .map(|message| message.render(failure))
    }

    /// Renders the messages of every failure that has one, in failure order.
    #[must_use]
    pub fn format(&self, errors: &FieldErrors) -> Vec<String> {
        errors.iter().filter_map(|failure| self.render(failure)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleName;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn literal_messages() {
        let messages = Messages::new().with("required", "This field is required");
        let errors: FieldErrors = [Failure::new(RuleName::Required, std::iter::empty())]
            .into_iter()
            .collect();

        assert_eq!(messages.format(&errors), ["This field is required"]);
    }

    #[test]
    fn formatter_receives_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let messages = Messages::new().with_fn("min_length", move |failure| {
            seen.fetch_add(1, Ordering::SeqCst);
            format!("at least {} characters", failure.args[0])
        });
        let errors: FieldErrors = [Failure::new(RuleName::MinLength, [json!(3)])]
            .into_iter()
            .collect();

        assert_eq!(messages.format(&errors), ["at least 3 characters"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drops_rules_without_entry_and_keeps_order() {
        let messages = Messages::new()
            .with("min_length", "too short")
            .with("string", "not text");
        let errors: FieldErrors = [
            Failure::new(RuleName::Type(crate::ValueKind::String), std::iter::empty()),
            Failure::new(RuleName::Required, std::iter::empty()),
            Failure::new(RuleName::MinLength, [json!(4)]),
        ]
        .into_iter()
        .collect();

        assert!(messages.contains("string"));
        assert!(!messages.contains("required"));
        assert_eq!(messages.format(&errors), ["not text", "too short"]);
    }
}
