//! Custom rule registry
//!
//! A [`RuleRegistry`] holds caller-supplied predicates under chosen rule
//! names. Builders bind them by name with [`Rules::using`](crate::Rules::using);
//! the name becomes the error key in the field result.
//!
//! ```rust
//! use sieve_validator::{RuleRegistry, Rules};
//! use serde_json::{Value, json};
//!
//! let mut registry = RuleRegistry::new();
//! registry
//!     .register("even", |value: &Value, _: &[Value]| {
//!         value.as_i64().is_none_or(|n| n % 2 == 0)
//!     })
//!     .unwrap();
//!
//! let rules = Rules::new().using(&registry, "even", []).unwrap();
//! assert!(rules.validate(&json!(3)).contains("even"));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::BuildError;
use crate::rule::Predicate;

/// Named custom predicates.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    predicates: HashMap<Cow<'static, str>, Predicate>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `predicate` under `name`.
    ///
    /// Names are unique; registering a name twice is an error and leaves the
    /// first predicate in place. The invalidity flag key (`"invalid"`) cannot
    /// be registered.
    pub fn register<F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Result<(), BuildError>
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        BuildError::check_name(&name)?;
        if self.predicates.contains_key(&name) {
            return Err(BuildError::DuplicateRule { name });
        }

        debug!(rule = %name, "registered custom rule");
        self.predicates.insert(name, Arc::new(predicate));
        Ok(())
    }

    /// Registers `predicate` under `name`, builder style.
    pub fn with<F>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Result<Self, BuildError>
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.register(name, predicate)?;
        Ok(self)
    }

    /// Looks up a predicate by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    /// Looks up a predicate, failing with [`BuildError::UnknownRule`].
    pub(crate) fn resolve(&self, name: &str) -> Result<Predicate, BuildError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| BuildError::unknown_rule(name.to_owned()))
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Registered rule names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(AsRef::as_ref)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn even(value: &Value, _: &[Value]) -> bool {
        value.as_i64().is_none_or(|n| n % 2 == 0)
    }

    #[test]
    fn register_and_get() {
        let mut registry = RuleRegistry::new();
        registry.register("even", even).unwrap();

        assert!(registry.contains("even"));
        assert_eq!(registry.len(), 1);
        let predicate = registry.get("even").unwrap();
        assert!(predicate(&json!(4), &[]));
        assert!(!predicate(&json!(5), &[]));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register("even", even).unwrap();
        let err = registry
            .register("even", |_: &Value, _: &[Value]| false)
            .unwrap_err();

        assert_eq!(err, BuildError::DuplicateRule { name: "even".into() });
        assert!(registry.get("even").unwrap()(&json!(2), &[]));
    }

    #[test]
    fn invalid_flag_cannot_be_registered() {
        let mut registry = RuleRegistry::new();
        let err = registry.register("invalid", even).unwrap_err();

        assert_eq!(err, BuildError::ReservedName { name: "invalid".into() });
        assert!(registry.is_empty());
    }

    #[test]
    fn resolve_unknown() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.resolve("odd").err().unwrap(),
            BuildError::unknown_rule("odd")
        );
    }

    #[test]
    fn builder_style() {
        let registry = RuleRegistry::new()
            .with("even", even)
            .unwrap()
            .with("any", |_: &Value, _: &[Value]| true)
            .unwrap();
        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["any", "even"]);
    }
}
