//! Rule bindings: one accumulated validation step.
//!
//! A [`RuleBinding`] pairs a [`RuleName`] with a [`Predicate`], the
//! arguments that were bound when the rule was registered, and an optional
//! custom [`Message`]. Bindings are immutable; builders share them behind
//! `Arc`.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use crate::error::BuildError;
use crate::value::ValueKind;

/// Bound rule arguments. Most rules carry zero or one argument.
pub type Args = SmallVec<[Value; 2]>;

/// A rule predicate: `(value, args) -> bool`.
///
/// Predicates must be pure and total. They are called with every value the
/// caller passes, `null` included, and must not panic.
pub type Predicate = Arc<dyn Fn(&Value, &[Value]) -> bool + Send + Sync>;

/// Message formatter: builds a human-readable message from a failure record.
pub type Formatter = Arc<dyn Fn(&Failure) -> String + Send + Sync>;

// ============================================================================
// RULE NAME
// ============================================================================

/// Identifier of a rule. Its string form is the key used in error results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleName {
    /// The value must be present.
    Required,
    /// The value must be of the given kind.
    Type(ValueKind),
    /// Minimum length of a string or array.
    MinLength,
    /// Maximum length of a string or array.
    MaxLength,
    /// Minimum numeric value.
    Min,
    /// Maximum numeric value.
    Max,
    /// Regular expression match.
    Pattern,
    /// A caller-registered rule.
    Custom(Cow<'static, str>),
}

impl RuleName {
    /// Creates a custom rule name.
    ///
    /// The name is not checked; prefer [`RuleName::try_custom`] for names
    /// that come from callers.
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(name.into())
    }

    /// Creates a custom rule name, rejecting the invalidity flag key.
    pub fn try_custom(name: impl Into<Cow<'static, str>>) -> Result<Self, BuildError> {
        let name = name.into();
        BuildError::check_name(&name)?;
        Ok(Self::Custom(name))
    }

    /// The error key for this rule.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Type(kind) => kind.as_str(),
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Custom(name) => name,
        }
    }

    /// Returns `true` for caller-registered rules.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for RuleName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// MESSAGE
// ============================================================================

/// A custom failure message attached to one rule.
#[derive(Clone)]
pub enum Message {
    /// A fixed string.
    Literal(Cow<'static, str>),
    /// Computed from the failure record when the rule fails.
    Format(Formatter),
}

impl Message {
    /// Creates a message computed from the failure record.
    pub fn formatter<F>(f: F) -> Self
    where
        F: Fn(&Failure) -> String + Send + Sync + 'static,
    {
        Self::Format(Arc::new(f))
    }

    /// Renders the message for `failure`.
    #[must_use]
    pub fn render(&self, failure: &Failure) -> String {
        match self {
            Self::Literal(text) => text.to_string(),
            Self::Format(f) => f(failure),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Format(_) => f.debug_tuple("Format").field(&"<function>").finish(),
        }
    }
}

impl From<&'static str> for Message {
    fn from(text: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Literal(Cow::Owned(text))
    }
}

impl From<Cow<'static, str>> for Message {
    fn from(text: Cow<'static, str>) -> Self {
        Self::Literal(text)
    }
}

// ============================================================================
// FAILURE
// ============================================================================

/// The failure record of one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// The rule that failed.
    pub rule: RuleName,
    /// The arguments bound to the rule.
    pub args: Args,
    /// The rendered custom message, if one was attached to the rule.
    pub message: Option<String>,
}

impl Failure {
    /// Creates a failure record without a message.
    pub fn new(rule: RuleName, args: impl IntoIterator<Item = Value>) -> Self {
        Self {
            rule,
            args: args.into_iter().collect(),
            message: None,
        }
    }

    /// Returns the bound argument at `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }
}

// ============================================================================
// RULE BINDING
// ============================================================================

/// One validation step: a named predicate with its bound arguments.
#[derive(Clone)]
pub struct RuleBinding {
    name: RuleName,
    predicate: Predicate,
    args: Args,
    message: Option<Message>,
}

impl RuleBinding {
    /// Creates a binding without a custom message.
    pub fn new(
        name: RuleName,
        predicate: Predicate,
        args: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            name,
            predicate,
            args: args.into_iter().collect(),
            message: None,
        }
    }

    /// Returns a copy of this binding carrying `message`.
    #[must_use = "bindings are immutable; the copy carries the message"]
    pub fn with_message(&self, message: Message) -> Self {
        Self {
            message: Some(message),
            ..self.clone()
        }
    }

    /// The rule name.
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// The bound arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The attached message, if any.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Runs the predicate against `value`.
    pub fn holds(&self, value: &Value) -> bool {
        (self.predicate)(value, &self.args)
    }

    /// Runs the predicate and returns the failure record when it fails.
    pub fn check(&self, value: &Value) -> Option<Failure> {
        if self.holds(value) {
            return None;
        }

        let mut failure = Failure {
            rule: self.name.clone(),
            args: self.args.clone(),
            message: None,
        };
        failure.message = self.message.as_ref().map(|m| m.render(&failure));
        Some(failure)
    }
}

impl fmt::Debug for RuleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBinding")
            .field("name", &self.name)
            .field("predicate", &"<function>")
            .field("args", &self.args)
            .field("message", &self.message)
            .finish()
    }
}
