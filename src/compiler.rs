//! Compiling declarations into schemas
//!
//! The [`Compiler`] is the configuration point of the crate: it owns the
//! predicate registry names are resolved against and the message catalog
//! errors are rendered with, and hands both to every schema it produces.
//!
//! Compilation only assembles and checks trees; nothing is evaluated.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::{Compiler, FieldDecl, RuleDecl, SchemaError};
//!
//! let schema = Compiler::new()
//!     .compile(vec![FieldDecl::required(
//!         "foo",
//!         RuleDecl::or(RuleDecl::predicate("str?"), RuleDecl::each(RuleDecl::predicate("int?"))),
//!     )])
//!     .unwrap();
//!
//! assert_eq!(
//!     schema.call(&json!({"foo": {}})).unwrap().to_json(),
//!     json!({"foo": ["must be a string or must be an array"]})
//! );
//!
//! // Absent branches are rejected up front.
//! let err = Compiler::new()
//!     .compile(vec![FieldDecl::required(
//!         "foo",
//!         RuleDecl::Or { left: Some(Box::new(RuleDecl::predicate("str?"))), right: None },
//!     )])
//!     .unwrap_err();
//! assert_eq!(err, SchemaError::malformed("foo: `or` is missing its right branch"));
//! ```

use std::sync::Arc;

use crate::decl::{FieldDecl, RuleDecl};
use crate::messages::MessageCatalog;
use crate::predicate::PredicateRegistry;
use crate::rule::{Field, FieldSet, Rule};
use crate::schema::{self, Schema};
use crate::SchemaError;

/// Builds [`Schema`]s against a shared registry and message catalog.
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: Arc<PredicateRegistry>,
    messages: Arc<MessageCatalog>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            registry: Arc::new(PredicateRegistry::standard()),
            messages: Arc::new(MessageCatalog::default()),
        }
    }
}

impl Compiler {
    /// Compiler using the standard registry and the default catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve predicates through `registry` instead.
    pub fn with_registry(mut self, registry: PredicateRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Render messages from `messages` instead.
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    /// The registry schemas will use.
    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// Compile a top-level field list.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MalformedRule`] for absent branches, element or field
    /// rules, empty or duplicate names and wrong argument counts;
    /// [`SchemaError::UnknownPredicate`] for unregistered names.
    pub fn compile<I>(&self, fields: I) -> Result<Schema, SchemaError>
    where
        I: IntoIterator<Item = FieldDecl>,
    {
        let fields: Vec<FieldDecl> = fields.into_iter().collect();
        let field_set = self.compile_fields(&fields)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(fields = field_set.len(), "compiled schema");

        self.schema(field_set)
    }

    /// Compile a root declaration of any shape, e.g. a disjunction of two
    /// schemas.
    pub fn compile_root(&self, decl: &RuleDecl) -> Result<Schema, SchemaError> {
        let root = self.compile_rule(decl)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(root = %root, "compiled schema");

        self.schema(root)
    }

    /// Wrap a builder-made tree, checking it against this compiler's registry.
    pub fn schema(&self, root: impl Into<Rule>) -> Result<Schema, SchemaError> {
        Schema::with_parts(
            root.into(),
            Arc::clone(&self.registry),
            Arc::clone(&self.messages),
        )
    }

    /// Compile one rule declaration.
    pub fn compile_rule(&self, decl: &RuleDecl) -> Result<Rule, SchemaError> {
        match decl {
            RuleDecl::Predicate { name, args } => {
                let rule = Rule::predicate_with(name.clone(), args.iter().cloned());
                schema::verify(&rule, &self.registry)?;
                Ok(rule)
            }
            RuleDecl::And { left, right } => {
                let left = self.branch(left.as_deref(), "and", "left")?;
                let right = self.branch(right.as_deref(), "and", "right")?;
                Ok(left.and(right))
            }
            RuleDecl::Or { left, right } => {
                let left = self.branch(left.as_deref(), "or", "left")?;
                let right = self.branch(right.as_deref(), "or", "right")?;
                Ok(left.or(right))
            }
            RuleDecl::Each { element } => {
                let element = element
                    .as_deref()
                    .ok_or_else(|| SchemaError::malformed("`each` has no element rule"))?;
                Ok(Rule::each(self.compile_rule(element)?))
            }
            RuleDecl::Schema { fields } => {
                let fields = fields
                    .as_deref()
                    .ok_or_else(|| SchemaError::malformed("`schema` has no fields"))?;
                Ok(Rule::Schema(self.compile_fields(fields)?))
            }
        }
    }

    fn branch(
        &self,
        decl: Option<&RuleDecl>,
        combinator: &str,
        side: &str,
    ) -> Result<Rule, SchemaError> {
        match decl {
            Some(decl) => self.compile_rule(decl),
            None => Err(SchemaError::malformed(format!(
                "`{}` is missing its {} branch",
                combinator, side
            ))),
        }
    }

    fn compile_fields(&self, decls: &[FieldDecl]) -> Result<FieldSet, SchemaError> {
        let fields = decls
            .iter()
            .map(|decl| {
                let rule = decl
                    .rule
                    .as_ref()
                    .map(|rule| self.compile_rule(rule))
                    .transpose()
                    .map_err(|err| err.in_field(&decl.name))?;
                Ok(Field::new(decl.name.clone(), decl.presence, rule))
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        FieldSet::new(fields)
    }
}
