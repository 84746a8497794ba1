//! Programmer-usage errors raised while building validators.
//!
//! Validation failures are never errors; they are reported through
//! [`FieldErrors`](crate::FieldErrors). The variants here indicate a bug in
//! the code assembling the rules.

use std::borrow::Cow;

/// Error raised by builder operations that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// `message` was called before any rule was registered.
    #[error("cannot attach a message: no rule has been registered yet")]
    NoRuleForMessage,

    /// A custom rule name was registered twice.
    #[error("rule '{name}' is already registered")]
    DuplicateRule {
        /// The name that was registered twice.
        name: Cow<'static, str>,
    },

    /// A custom rule or a schema field was named after the invalidity flag
    /// of serialized results.
    #[error("name '{name}' is reserved for the invalidity flag")]
    ReservedName {
        /// The rejected name.
        name: Cow<'static, str>,
    },

    /// A rule name was looked up in a registry that does not know it.
    #[error("unknown rule '{name}'")]
    UnknownRule {
        /// The name that was looked up.
        name: Cow<'static, str>,
    },
}

impl BuildError {
    /// Creates an unknown rule error.
    pub fn unknown_rule(name: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Fails with [`BuildError::ReservedName`] if `name` is the invalidity
    /// flag key.
    pub fn check_name(name: &str) -> Result<(), Self> {
        if name == crate::result::INVALID_KEY {
            return Err(Self::ReservedName {
                name: Cow::Owned(name.to_owned()),
            });
        }
        Ok(())
    }
}
