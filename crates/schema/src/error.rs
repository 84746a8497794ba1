//! Errors raised while turning a definition into a schema.

use sieve_validator::BuildError;

/// Error raised by [`SchemaDefinition`](crate::SchemaDefinition) loading and
/// compilation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// The definition is not valid JSON or does not have the expected shape.
    #[error("invalid schema definition: {0}")]
    Json(#[from] serde_json::Error),

    /// A built-in rule is missing its value, or the value has the wrong type.
    #[error("field '{field}': rule '{rule}' expects a {expected} value")]
    InvalidArgument {
        /// Field being compiled.
        field: String,
        /// Rule being compiled.
        rule: String,
        /// What the rule expected.
        expected: &'static str,
    },

    /// A `pattern` rule carries a regular expression that does not compile.
    #[error("field '{field}': invalid pattern")]
    InvalidPattern {
        /// Field being compiled.
        field: String,
        /// Compilation error.
        #[source]
        source: regex::Error,
    },

    /// A custom rule could not be bound.
    #[error("field '{field}': {source}")]
    Build {
        /// Field being compiled.
        field: String,
        /// Builder error.
        #[source]
        source: BuildError,
    },
}
