//! Errors raised while building or running a schema
//!
//! Validation failures are *not* errors: a value that does not satisfy its
//! rules produces an ordinary [`ValidationResult`](crate::ValidationResult)
//! carrying an [`ErrorTree`](crate::ErrorTree). `SchemaError` is reserved for
//! mistakes in the schema itself, which the schema author has to fix.
//!
//! # Examples
//!
//! ```
//! use weir::{Compiler, FieldDecl, RuleDecl, SchemaError};
//!
//! let result = Compiler::new().compile(vec![FieldDecl::required(
//!     "age",
//!     RuleDecl::predicate("adult?"),
//! )]);
//!
//! assert_eq!(
//!     result.unwrap_err(),
//!     SchemaError::UnknownPredicate { name: "adult?".to_string() }
//! );
//! ```

use std::fmt;

/// Error raised for a structurally invalid schema or an unregistered predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The rule tree is degenerate: a missing branch, a missing element or
    /// field rule, a duplicate field, or a predicate called with the wrong
    /// number of arguments.
    MalformedRule {
        /// What is wrong with the declaration.
        reason: String,
    },
    /// A predicate node names a predicate the registry does not know.
    UnknownPredicate {
        /// The unregistered predicate name.
        name: String,
    },
}

impl SchemaError {
    /// Create a `MalformedRule` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        SchemaError::MalformedRule {
            reason: reason.into(),
        }
    }

    /// Create an `UnknownPredicate` error.
    pub fn unknown_predicate(name: impl Into<String>) -> Self {
        SchemaError::UnknownPredicate { name: name.into() }
    }

    /// Prefix the reason of a `MalformedRule` with the field it was found in.
    ///
    /// `UnknownPredicate` errors are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use weir::SchemaError;
    ///
    /// let err = SchemaError::malformed("`or` is missing its right branch").in_field("user");
    /// assert_eq!(err.to_string(), "malformed rule: user: `or` is missing its right branch");
    /// ```
    pub fn in_field(self, field: &str) -> Self {
        match self {
            SchemaError::MalformedRule { reason } => SchemaError::MalformedRule {
                reason: format!("{}: {}", field, reason),
            },
            other => other,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MalformedRule { reason } => write!(f, "malformed rule: {}", reason),
            SchemaError::UnknownPredicate { name } => write!(f, "unknown predicate `{}`", name),
        }
    }
}

impl std::error::Error for SchemaError {}
