//! # Weir
//!
//! > *A weir lets water through and holds the rest back*
//!
//! A Rust library for validating JSON-shaped data with composable schema
//! rules.
//!
//! ## Philosophy
//!
//! **Weir** keeps the same split as its sibling crates: a pure core and a
//! thin shell.
//! - **Rules** are plain immutable trees: predicates joined by `&`, `|`,
//!   `each` and nested `schema`s, built once and shared freely
//! - **Evaluation** is a pure walk over a rule tree that never mutates it
//! - **Errors** are data: a path-keyed [`ErrorTree`] of messages, with
//!   deterministic merging of failed alternatives
//!
//! ## Quick Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::rule::{pred, pred_with, FieldSet, Rule};
//! use weir::Schema;
//!
//! let schema = Schema::new(
//!     FieldSet::builder()
//!         .required("name", pred("filled?") & pred("str?"))
//!         .required("age", pred("str?") | (pred("int?") & pred_with("gt?", [json!(18)])))
//!         .optional("tags", pred("array?").then_each(pred("str?")))
//!         .build()
//!         .unwrap(),
//! )
//! .unwrap();
//!
//! let result = schema.call(&json!({"name": "", "age": 17, "tags": ["a", 2]})).unwrap();
//! assert!(result.is_failure());
//! assert_eq!(
//!     result.to_json(),
//!     json!({
//!         "name": ["must be filled"],
//!         "age": ["must be a string or must be greater than 18"],
//!         "tags": {"1": ["must be a string"]}
//!     })
//! );
//! ```
//!
//! ## Layers
//!
//! - [`rule`]: the rule tree and field sets, plus the builder API
//! - [`decl`] and [`Compiler`]: unchecked declarations and their compilation
//! - [`predicate`]: the predicate registry and the built-in predicates
//! - [`evaluator`]: rule evaluation producing failure traces
//! - [`error_tree`] and [`messages`]: error synthesis and message templates
//! - [`Schema`] and [`ValidationResult`]: the callable surface

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod compiler;
pub mod decl;
pub mod error;
pub mod error_tree;
pub mod evaluator;
pub mod messages;
pub mod predicate;
pub mod result;
pub mod rule;
pub mod schema;
pub mod testing;

// Re-exports
pub use compiler::Compiler;
pub use decl::{FieldDecl, RuleDecl};
pub use error::SchemaError;
pub use error_tree::{ErrorKey, ErrorMessage, ErrorTree, Synthesizer};
pub use messages::MessageCatalog;
pub use result::ValidationResult;
pub use rule::{Field, FieldSet, Presence, Rule};
pub use schema::Schema;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compiler::Compiler;
    pub use crate::decl::{FieldDecl, RuleDecl};
    pub use crate::error::SchemaError;
    pub use crate::error_tree::{ErrorKey, ErrorTree};
    pub use crate::messages::MessageCatalog;
    pub use crate::predicate::PredicateRegistry;
    pub use crate::result::ValidationResult;
    pub use crate::rule::{pred, pred_with, FieldSet, Presence, Rule};
    pub use crate::schema::Schema;
}
