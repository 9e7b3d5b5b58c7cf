//! Compiled, callable schemas
//!
//! A [`Schema`] bundles a root [`Rule`] with the predicate registry and
//! message catalog it was checked against. It is immutable and cheap to
//! clone; one schema can validate any number of inputs from any number of
//! threads.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::rule::{pred, FieldSet, Rule};
//! use weir::Schema;
//!
//! let name = Schema::new(FieldSet::builder().required("name", pred("filled?") & pred("str?")).build().unwrap()).unwrap();
//! let first_name = Schema::new(
//!     FieldSet::builder().required("first_name", pred("filled?") & pred("str?")).build().unwrap(),
//! )
//! .unwrap();
//!
//! let schema = Schema::new(
//!     FieldSet::builder().required("user", Rule::schema(name | first_name)).build().unwrap(),
//! )
//! .unwrap();
//!
//! assert!(schema.call(&json!({"user": {"first_name": "John"}})).unwrap().is_success());
//! assert_eq!(
//!     schema.call(&json!({"user": {"last_name": "John"}})).unwrap().to_json(),
//!     json!({"user": {"or": [{"name": ["is missing"]}, {"first_name": ["is missing"]}]}})
//! );
//! ```

use std::ops::BitOr;
use std::sync::Arc;

use serde_json::Value;

use crate::evaluator::Evaluator;
use crate::messages::MessageCatalog;
use crate::predicate::PredicateRegistry;
use crate::result::ValidationResult;
use crate::rule::{FieldSet, Rule};
use crate::SchemaError;

/// A root rule ready to validate input.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Rule,
    registry: Arc<PredicateRegistry>,
    messages: Arc<MessageCatalog>,
}

impl Schema {
    /// Check `root` against the standard registry and wrap it with the
    /// default message catalog.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownPredicate`] or [`SchemaError::MalformedRule`]
    /// if any predicate in the tree does not resolve.
    pub fn new(root: impl Into<Rule>) -> Result<Self, SchemaError> {
        Self::with_parts(
            root.into(),
            Arc::new(PredicateRegistry::standard()),
            Arc::new(MessageCatalog::default()),
        )
    }

    /// Same as [`Schema::new`] for a field set.
    pub fn from_fields(fields: FieldSet) -> Result<Self, SchemaError> {
        Self::new(fields)
    }

    pub(crate) fn with_parts(
        root: Rule,
        registry: Arc<PredicateRegistry>,
        messages: Arc<MessageCatalog>,
    ) -> Result<Self, SchemaError> {
        verify(&root, &registry)?;
        Ok(Self {
            root,
            registry,
            messages,
        })
    }

    /// The root rule.
    pub fn root(&self) -> &Rule {
        &self.root
    }

    /// Registry predicates are resolved through.
    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// Catalog messages are rendered from.
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Validate `input`.
    ///
    /// # Errors
    ///
    /// Only for schemas whose predicates were never checked against this
    /// registry, i.e. the right-hand side of `schema_a | schema_b` built
    /// with a different registry. Use [`Schema::or`] to check eagerly.
    pub fn call(&self, input: &Value) -> Result<ValidationResult, SchemaError> {
        let outcome = Evaluator::new(&self.registry).evaluate(&self.root, input)?;
        let result = ValidationResult::from_outcome(&outcome, &self.messages);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            success = result.is_success(),
            errors = result.messages().len(),
            "schema call finished"
        );

        Ok(result)
    }

    /// Schema-level disjunction, checked against this schema's registry.
    ///
    /// # Errors
    ///
    /// If `other` uses predicates this schema's registry cannot resolve.
    pub fn or(self, other: Schema) -> Result<Schema, SchemaError> {
        Self::with_parts(self.root.or(other.root), self.registry, self.messages)
    }
}

/// Schema-level disjunction keeping the left schema's registry and catalog.
///
/// The right side is not re-checked; see [`Schema::or`].
impl BitOr for Schema {
    type Output = Schema;

    fn bitor(self, rhs: Schema) -> Schema {
        Schema {
            root: self.root.or(rhs.root),
            registry: self.registry,
            messages: self.messages,
        }
    }
}

impl From<Schema> for Rule {
    fn from(schema: Schema) -> Self {
        schema.root
    }
}

/// Check that every predicate in `rule` is named, registered and called with
/// the right number of arguments.
pub(crate) fn verify(rule: &Rule, registry: &PredicateRegistry) -> Result<(), SchemaError> {
    rule.try_for_each_predicate(&mut |name: &str, args: &[Value]| {
        if name.is_empty() {
            return Err(SchemaError::malformed("predicate name cannot be empty"));
        }
        registry.resolve(name, args.len()).map(|_| ())
    })
}
