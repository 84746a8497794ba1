//! The validator builder
//!
//! [`Rules`] is an immutable, ordered list of [`RuleBinding`]s plus an
//! optional default value. Every registration method borrows the builder and
//! returns a new one, so a partially built set of rules can be held and
//! branched:
//!
//! ```rust
//! use sieve_validator::required;
//! use serde_json::json;
//!
//! let base = required();
//! let short = base.max_length(3);
//! let long = base.min_length(10);
//!
//! assert!(base.is_valid(&json!("hello")));
//! assert!(!short.is_valid(&json!("hello")));
//! assert!(!long.is_valid(&json!("hello")));
//! ```
//!
//! Validation runs every rule, in registration order, and never stops at the
//! first failure.

use std::borrow::Cow;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use crate::error::BuildError;
use crate::registry::RuleRegistry;
use crate::result::FieldErrors;
use crate::rule::{Failure, Message, Predicate, RuleBinding, RuleName};
use crate::validators;
use crate::value::ValueKind;

// ============================================================================
// RULES
// ============================================================================

/// An immutable, chainable set of validation rules for one value.
///
/// Cloning is cheap: bindings are shared behind `Arc` and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    bindings: Vec<Arc<RuleBinding>>,
    default_value: Option<Value>,
}

impl Rules {
    /// Creates a builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new builder with `binding` appended.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn with_binding(&self, binding: RuleBinding) -> Self {
        let mut bindings = Vec::with_capacity(self.bindings.len() + 1);
        bindings.extend(self.bindings.iter().cloned());
        bindings.push(Arc::new(binding));
        Self {
            bindings,
            default_value: self.default_value.clone(),
        }
    }

    fn bind(
        &self,
        name: RuleName,
        predicate: Predicate,
        args: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.with_binding(RuleBinding::new(name, predicate, args))
    }

    // ------------------------------------------------------------------------
    // Built-in rules
    // ------------------------------------------------------------------------

    /// Requires the value to be present (not `null`, `""` or `[]`).
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn required(&self) -> Self {
        self.bind(RuleName::Required, Arc::new(validators::required), [])
    }

    /// Requires the value to be of `kind`. Empty values pass.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn type_rule(&self, kind: ValueKind) -> Self {
        self.bind(
            RuleName::Type(kind),
            Arc::new(move |value: &Value, _: &[Value]| validators::kind(kind, value)),
            [],
        )
    }

    /// Requires a string.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn string(&self) -> Self {
        self.type_rule(ValueKind::String)
    }

    /// Requires a number.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn number(&self) -> Self {
        self.type_rule(ValueKind::Number)
    }

    /// Requires a whole number.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn integer(&self) -> Self {
        self.type_rule(ValueKind::Integer)
    }

    /// Requires a boolean.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn boolean(&self) -> Self {
        self.type_rule(ValueKind::Boolean)
    }

    /// Requires an array.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn array(&self) -> Self {
        self.type_rule(ValueKind::Array)
    }

    /// Requires an object.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn object(&self) -> Self {
        self.type_rule(ValueKind::Object)
    }

    /// Requires a string or array of at least `min` characters / elements.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn min_length(&self, min: i64) -> Self {
        self.bind(RuleName::MinLength, Arc::new(validators::min_length), [Value::from(min)])
    }

    /// Requires a string or array of at most `max` characters / elements.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn max_length(&self, max: i64) -> Self {
        self.bind(RuleName::MaxLength, Arc::new(validators::max_length), [Value::from(max)])
    }

    /// Requires a number no smaller than `min`.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn min(&self, min: impl Into<f64>) -> Self {
        self.bind(RuleName::Min, Arc::new(validators::min), [Value::from(min.into())])
    }

    /// Requires a number no greater than `max`.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn max(&self, max: impl Into<f64>) -> Self {
        self.bind(RuleName::Max, Arc::new(validators::max), [Value::from(max.into())])
    }

    /// Requires a string matched by `regex`. The pattern source is bound as
    /// the rule argument.
    ///
    /// Values are not converted to text first: a non-empty value that is not
    /// a string (a number, a boolean, an array) fails the rule.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn pattern(&self, regex: Regex) -> Self {
        let source = Value::from(regex.as_str());
        self.bind(
            RuleName::Pattern,
            Arc::new(move |value: &Value, _: &[Value]| validators::pattern(&regex, value)),
            [source],
        )
    }

    // ------------------------------------------------------------------------
    // Custom rules
    // ------------------------------------------------------------------------

    /// Registers a custom predicate under `name`.
    ///
    /// The predicate receives the value and `args`. It must be pure and
    /// total; unlike the built-in rules it decides for itself how to treat
    /// empty values. A custom rule named after a built-in one shares its
    /// error key, and the first of them to fail is reported.
    ///
    /// # Panics
    ///
    /// Panics if `name` is the invalidity flag key (`"invalid"`). Use
    /// [`Rules::try_rule`] to get an error instead.
    #[must_use = "rules are immutable; the returned builder carries the new rule"]
    pub fn rule<F>(
        &self,
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = Value>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        match self.try_rule(name, args, predicate) {
            Ok(rules) => rules,
            Err(err) => panic!("{err}"),
        }
    }

    /// Registers a custom predicate under `name`, failing with
    /// [`BuildError::ReservedName`] when `name` is the invalidity flag key.
    pub fn try_rule<F>(
        &self,
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = Value>,
        predicate: F,
    ) -> Result<Self, BuildError>
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        let name = RuleName::try_custom(name)?;
        Ok(self.bind(name, Arc::new(predicate), args))
    }

    /// Binds a predicate registered in `registry` under `name`.
    pub fn using(
        &self,
        registry: &RuleRegistry,
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        let predicate = registry.resolve(&name)?;
        Ok(self.bind(RuleName::Custom(name), predicate, args))
    }

    // ------------------------------------------------------------------------
    // Defaults and messages
    // ------------------------------------------------------------------------

    /// Returns a new builder with a default value. Does not affect
    /// validation.
    #[must_use = "rules are immutable; the returned builder carries the default"]
    pub fn default_value(&self, value: impl Into<Value>) -> Self {
        Self {
            bindings: self.bindings.clone(),
            default_value: Some(value.into()),
        }
    }

    /// Attaches `message` to the most recently registered rule.
    ///
    /// # Panics
    ///
    /// Panics if no rule has been registered. Use [`Rules::try_message`] to
    /// get an error instead.
    #[must_use = "rules are immutable; the returned builder carries the message"]
    pub fn message(&self, message: impl Into<Message>) -> Self {
        match self.try_message(message) {
            Ok(rules) => rules,
            Err(err) => panic!("{err}"),
        }
    }

    /// Attaches a formatter of the failure record to the most recently
    /// registered rule.
    ///
    /// # Panics
    ///
    /// Panics if no rule has been registered.
    #[must_use = "rules are immutable; the returned builder carries the message"]
    pub fn message_fn<F>(&self, f: F) -> Self
    where
        F: Fn(&Failure) -> String + Send + Sync + 'static,
    {
        self.message(Message::formatter(f))
    }

    /// Attaches `message` to the most recently registered rule, failing with
    /// [`BuildError::NoRuleForMessage`] on a builder without rules.
    pub fn try_message(&self, message: impl Into<Message>) -> Result<Self, BuildError> {
        let (last, rest) = self
            .bindings
            .split_last()
            .ok_or(BuildError::NoRuleForMessage)?;

        let mut bindings = Vec::with_capacity(self.bindings.len());
        bindings.extend(rest.iter().cloned());
        bindings.push(Arc::new(last.with_message(message.into())));
        Ok(Self {
            bindings,
            default_value: self.default_value.clone(),
        })
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Runs every rule against `value`, in registration order.
    #[must_use = "validation result must be checked"]
    pub fn validate(&self, value: &Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for binding in &self.bindings {
            if let Some(failure) = binding.check(value) {
                trace!(rule = %failure.rule, "rule failed");
                errors.insert(failure);
            }
        }
        errors
    }

    /// Validates `value` and hands the result to `f`, returning what `f`
    /// returns. `f` is called exactly once.
    pub fn validate_with<R>(&self, value: &Value, f: impl FnOnce(FieldErrors) -> R) -> R {
        f(self.validate(value))
    }

    /// Returns `true` if every rule holds for `value`.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.bindings.iter().all(|binding| binding.holds(value))
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// The declared default value, if any.
    #[must_use]
    pub fn declared_default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// The rule bindings, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &RuleBinding> {
        self.bindings.iter().map(AsRef::as_ref)
    }

    /// Names of the registered rules, in registration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|binding| binding.name().as_str())
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Starts a builder with a `required` rule.
#[must_use]
pub fn required() -> Rules {
    Rules::new().required()
}

/// Starts a builder with a type rule.
#[must_use]
pub fn type_rule(kind: ValueKind) -> Rules {
    Rules::new().type_rule(kind)
}

/// Starts a builder with a `string` rule.
#[must_use]
pub fn string() -> Rules {
    Rules::new().string()
}

/// Starts a builder with a `number` rule.
#[must_use]
pub fn number() -> Rules {
    Rules::new().number()
}

/// Starts a builder with an `integer` rule.
#[must_use]
pub fn integer() -> Rules {
    Rules::new().integer()
}

/// Starts a builder with a `boolean` rule.
#[must_use]
pub fn boolean() -> Rules {
    Rules::new().boolean()
}

/// Starts a builder with an `array` rule.
#[must_use]
pub fn array() -> Rules {
    Rules::new().array()
}

/// Starts a builder with an `object` rule.
#[must_use]
pub fn object() -> Rules {
    Rules::new().object()
}

/// Starts a builder with a `min_length` rule.
#[must_use]
pub fn min_length(min: i64) -> Rules {
    Rules::new().min_length(min)
}

/// Starts a builder with a `max_length` rule.
#[must_use]
pub fn max_length(max: i64) -> Rules {
    Rules::new().max_length(max)
}

/// Starts a builder with a `min` rule.
#[must_use]
pub fn min(min: impl Into<f64>) -> Rules {
    Rules::new().min(min)
}

/// Starts a builder with a `max` rule.
#[must_use]
pub fn max(max: impl Into<f64>) -> Rules {
    Rules::new().max(max)
}

/// Starts a builder with a `pattern` rule.
#[must_use]
pub fn pattern(regex: Regex) -> Rules {
    Rules::new().pattern(regex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::cell::Cell;

    fn names(errors: &FieldErrors) -> Vec<&str> {
        errors.rule_names().collect()
    }

    #[rstest]
    #[case::string(string(), json!(123), "string")]
    #[case::number(number(), json!("abc"), "number")]
    #[case::integer(integer(), json!(1.5), "integer")]
    #[case::boolean(boolean(), json!("abc"), "boolean")]
    #[case::array(array(), json!({}), "array")]
    #[case::object(object(), json!(["foo"]), "object")]
    #[case::min_length(min_length(3), json!("fo"), "min_length")]
    #[case::max_length(max_length(3), json!("fooo"), "max_length")]
    #[case::min(min(3), json!(2), "min")]
    #[case::max(max(3), json!(4), "max")]
    #[case::pattern(pattern(Regex::new("123").unwrap()), json!("abc"), "pattern")]
    fn builtin_rule_reports_its_name(
        #[case] rules: Rules,
        #[case] value: Value,
        #[case] rule: &str,
    ) {
        assert_eq!(names(&rules.validate(&value)), [rule]);
    }

    #[rstest]
    fn empty_passes_every_rule_but_required(
        #[values(
            string(),
            number(),
            integer(),
            boolean(),
            array(),
            object(),
            min_length(3),
            max_length(3),
            min(3),
            max(3),
            pattern(Regex::new("^x$").unwrap())
        )]
        rules: Rules,
        #[values(json!(null), json!(""), json!([]))] value: Value,
    ) {
        assert!(rules.validate(&value).is_valid());
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(""), false)]
    #[case(json!([]), false)]
    #[case(json!("foo"), true)]
    #[case(json!(["foo"]), true)]
    #[case(json!(0), true)]
    #[case(json!(false), true)]
    fn required_rejects_emptiness(#[case] value: Value, #[case] valid: bool) {
        assert_eq!(required().validate(&value).is_valid(), valid);
    }

    #[test]
    fn never_short_circuits() {
        let rules = string().required().min_length(4);
        let errors = rules.validate(&json!(1));
        assert_eq!(names(&errors), ["string", "min_length"]);

        let rules = number().min(10).max(0);
        assert_eq!(names(&rules.validate(&json!("x"))), ["number", "min", "max"]);
    }

    #[test]
    fn registration_does_not_alter_the_original() {
        let b1 = required();
        let b2 = b1.min_length(3);

        assert_eq!(b1.len(), 1);
        assert_eq!(b2.len(), 2);
        assert_eq!(names(&b1.validate(&json!(""))), ["required"]);
        assert!(b1.validate(&json!("ab")).is_valid());
        assert_eq!(names(&b2.validate(&json!("ab"))), ["min_length"]);
    }

    #[test]
    fn message_attaches_to_last_rule_only() {
        let rules = required().message("Required!").min_length(3).message("Too short");
        let errors = rules.validate(&json!(null));
        assert_eq!(errors.get("required").unwrap().message.as_deref(), Some("Required!"));

        let errors = rules.validate(&json!("ab"));
        assert_eq!(errors.get("min_length").unwrap().message.as_deref(), Some("Too short"));
    }

    #[test]
    fn message_does_not_alter_the_original() {
        let plain = required().min_length(3);
        let messaged = plain.message("Too short");

        assert_eq!(plain.validate(&json!("ab")).get("min_length").unwrap().message, None);
        assert_eq!(
            messaged.validate(&json!("ab")).get("min_length").unwrap().message.as_deref(),
            Some("Too short")
        );
    }

    #[test]
    fn message_fn_formats_failure() {
        let rules = min_length(3).message_fn(|f| format!("needs {} chars", f.args[0]));
        let errors = rules.validate(&json!("ab"));
        assert_eq!(errors.messages().collect::<Vec<_>>(), ["needs 3 chars"]);
    }

    #[test]
    fn try_message_without_rules_fails() {
        assert_eq!(
            Rules::new().try_message("nope").unwrap_err(),
            BuildError::NoRuleForMessage
        );
    }

    #[test]
    #[should_panic(expected = "no rule has been registered")]
    fn message_without_rules_panics() {
        let _ = Rules::new().message("nope");
    }

    #[test]
    fn default_value_does_not_affect_validation() {
        let rules = string().default_value("John");
        assert_eq!(rules.declared_default(), Some(&json!("John")));
        assert_eq!(names(&rules.validate(&json!(123))), ["string"]);
        assert_eq!(string().declared_default(), None);
    }

    #[test]
    fn validate_with_returns_callback_result() {
        let calls = Cell::new(0);
        let out = string().required().min_length(4).validate_with(&json!(1), |errors| {
            calls.set(calls.get() + 1);
            assert_eq!(names(&errors), ["string", "min_length"]);
            "hey there!"
        });

        assert_eq!(out, "hey there!");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn custom_rule_receives_args() {
        let rules = Rules::new().rule("one_of", [json!("a"), json!("b")], |value, args| {
            args.contains(value)
        });

        assert!(rules.is_valid(&json!("a")));
        let errors = rules.validate(&json!("c"));
        assert_eq!(names(&errors), ["one_of"]);
        assert_eq!(errors.get("one_of").unwrap().args.as_slice(), [json!("a"), json!("b")]);
    }

    #[test]
    fn custom_rule_sharing_a_builtin_name_keeps_the_first_failure() {
        let rules = string()
            .rule("string", [], |_: &Value, _: &[Value]| false)
            .message("custom");

        let errors = rules.validate(&json!(1));
        assert_eq!(names(&errors), ["string"]);
        assert_eq!(errors.get("string").unwrap().message, None);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "invalid": true, "string": true })
        );

        let errors = rules.validate(&json!("text"));
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "invalid": true, "string": "custom" })
        );
    }

    #[test]
    fn invalid_flag_cannot_name_a_custom_rule() {
        let err = Rules::new()
            .try_rule("invalid", [], |_: &Value, _: &[Value]| false)
            .unwrap_err();
        assert_eq!(err, BuildError::ReservedName { name: "invalid".into() });
    }

    #[test]
    #[should_panic(expected = "reserved for the invalidity flag")]
    fn rule_named_invalid_panics() {
        let _ = Rules::new().rule("invalid", [], |_: &Value, _: &[Value]| false);
    }

    #[test]
    fn pattern_does_not_stringify_values() {
        let rules = pattern(Regex::new("^[0-9]+$").unwrap());
        assert!(rules.is_valid(&json!("42")));
        assert_eq!(names(&rules.validate(&json!(42))), ["pattern"]);
    }

    #[test]
    fn using_registry() {
        let registry = RuleRegistry::new()
            .with("even", |value: &Value, _: &[Value]| {
                value.as_i64().is_none_or(|n| n % 2 == 0)
            })
            .unwrap();

        let rules = number().using(&registry, "even", []).unwrap();
        assert!(rules.is_valid(&json!(4)));
        assert_eq!(names(&rules.validate(&json!(3))), ["even"]);

        assert_eq!(
            Rules::new().using(&registry, "odd", []).unwrap_err(),
            BuildError::unknown_rule("odd")
        );
    }

    #[test]
    fn introspection() {
        let rules = string().min_length(2).pattern(Regex::new("^a").unwrap());
        assert_eq!(rules.rule_names().collect::<Vec<_>>(), ["string", "min_length", "pattern"]);
        let args: Vec<_> = rules.bindings().map(|b| b.args().to_vec()).collect();
        assert_eq!(args, [vec![], vec![json!(2)], vec![json!("^a")]]);
        assert!(!rules.is_empty());
        assert!(Rules::new().is_empty());
    }

    #[test]
    fn is_valid_agrees_with_validate() {
        let rules = string().required().max_length(3);
        for value in [json!(null), json!("abc"), json!("abcd"), json!(7)] {
            assert_eq!(rules.is_valid(&value), rules.validate(&value).is_valid());
        }
    }
}
