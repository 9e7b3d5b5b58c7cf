//! Rule trees and field sets
//!
//! A [`Rule`] is one node of an immutable validation tree. There are exactly
//! five shapes:
//!
//! - [`Rule::Predicate`]: a named test, resolved through a
//!   [`PredicateRegistry`](crate::predicate::PredicateRegistry)
//! - [`Rule::And`]: both sides must hold, the left side is checked first
//! - [`Rule::Or`]: at least one side must hold
//! - [`Rule::Each`]: the element rule must hold for every array element
//! - [`Rule::Schema`]: a nested [`FieldSet`] applied to an object
//!
//! Children are reference counted, so cloning a rule or embedding it in a
//! larger tree never copies the subtree.
//!
//! # Example
//!
//! ```rust
//! use weir::rule::{pred, pred_with, Rule};
//!
//! // str? | (int? & gt?(18))
//! let age = pred("str?") | (pred("int?") & pred_with("gt?", [18.into()]));
//!
//! assert_eq!(age.to_string(), "str? | (int? & gt?(18))");
//! assert!(matches!(age, Rule::Or(_, _)));
//! ```
//!
//! # Field sets
//!
//! ```rust
//! use weir::rule::{pred, FieldSet, Rule};
//!
//! let user = FieldSet::builder()
//!     .required("name", pred("filled?") & pred("str?"))
//!     .optional("tags", pred("array?").then_each(pred("str?")))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(user.names().collect::<Vec<_>>(), vec!["name", "tags"]);
//!
//! // A field set is itself a rule: apply it to a nested object.
//! let account = FieldSet::builder()
//!     .required("user", Rule::schema(user))
//!     .build()
//!     .unwrap();
//! assert_eq!(account.len(), 1);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::sync::Arc;

use serde_json::Value;

use crate::SchemaError;

/// One node of a compiled validation rule tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Leaf: call a registered predicate with the input and `args`.
    Predicate {
        /// Registry name, e.g. `gt?`.
        name: String,
        /// Arguments passed after the input.
        args: Vec<Value>,
    },
    /// Conjunction. The right side only runs when the left side holds.
    And(Arc<Rule>, Arc<Rule>),
    /// Disjunction. The right side only runs when the left side fails.
    Or(Arc<Rule>, Arc<Rule>),
    /// Apply the inner rule to every element of an array.
    Each(Arc<Rule>),
    /// Apply a nested field set to an object.
    Schema(FieldSet),
}

/// Create a predicate leaf without arguments.
pub fn pred(name: impl Into<String>) -> Rule {
    Rule::predicate(name)
}

/// Create a predicate leaf with arguments.
pub fn pred_with(name: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Rule {
    Rule::predicate_with(name, args)
}

impl Rule {
    /// Create a predicate leaf without arguments.
    pub fn predicate(name: impl Into<String>) -> Self {
        Rule::Predicate {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a predicate leaf with arguments.
    pub fn predicate_with(name: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        Rule::Predicate {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Create an `Each` node applying `element` to every array element.
    pub fn each(element: Rule) -> Self {
        Rule::Each(Arc::new(element))
    }

    /// Create a nested schema node.
    ///
    /// Accepts a [`FieldSet`], a compiled [`Schema`](crate::Schema) or any
    /// rule, so a disjunction of two schemas can be nested as well.
    pub fn schema(nested: impl Into<Rule>) -> Self {
        nested.into()
    }

    /// Combine with AND logic.
    pub fn and(self, other: Rule) -> Self {
        Rule::And(Arc::new(self), Arc::new(other))
    }

    /// Combine with OR logic.
    pub fn or(self, other: Rule) -> Self {
        Rule::Or(Arc::new(self), Arc::new(other))
    }

    /// `self & each(element)`, e.g. `array? & each(int?)`.
    pub fn then_each(self, element: Rule) -> Self {
        self.and(Rule::each(element))
    }

    /// `self & schema(nested)`, e.g. `hash? & schema({...})`.
    pub fn then_schema(self, nested: impl Into<Rule>) -> Self {
        self.and(Rule::schema(nested))
    }

    /// Visit every predicate leaf, depth first, left to right.
    ///
    /// Stops at the first error returned by `f`.
    pub fn try_for_each_predicate<F>(&self, f: &mut F) -> Result<(), SchemaError>
    where
        F: FnMut(&str, &[Value]) -> Result<(), SchemaError>,
    {
        match self {
            Rule::Predicate { name, args } => f(name, args),
            Rule::And(left, right) | Rule::Or(left, right) => {
                left.try_for_each_predicate(f)?;
                right.try_for_each_predicate(f)
            }
            Rule::Each(element) => element.try_for_each_predicate(f),
            Rule::Schema(fields) => fields
                .iter()
                .filter_map(|field| field.rule())
                .try_for_each(|rule| rule.try_for_each_predicate(f)),
        }
    }
}

impl BitAnd for Rule {
    type Output = Rule;

    fn bitand(self, rhs: Rule) -> Rule {
        self.and(rhs)
    }
}

impl BitOr for Rule {
    type Output = Rule;

    fn bitor(self, rhs: Rule) -> Rule {
        self.or(rhs)
    }
}

impl From<FieldSet> for Rule {
    fn from(fields: FieldSet) -> Self {
        Rule::Schema(fields)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(f: &mut fmt::Formatter<'_>, rule: &Rule) -> fmt::Result {
            match rule {
                Rule::And(_, _) | Rule::Or(_, _) => write!(f, "({})", rule),
                _ => write!(f, "{}", rule),
            }
        }

        match self {
            Rule::Predicate { name, args } if args.is_empty() => write!(f, "{}", name),
            Rule::Predicate { name, args } => {
                let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
                write!(f, "{}({})", name, rendered.join(", "))
            }
            Rule::And(left, right) => {
                operand(f, left)?;
                write!(f, " & ")?;
                operand(f, right)
            }
            Rule::Or(left, right) => {
                operand(f, left)?;
                write!(f, " | ")?;
                operand(f, right)
            }
            Rule::Each(element) => write!(f, "each({})", element),
            Rule::Schema(fields) => write!(f, "schema({})", fields),
        }
    }
}

/// Whether a field's key must be present in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Presence {
    /// An absent key fails with "is missing".
    Required,
    /// An absent key is skipped; a present one is validated.
    Optional,
}

/// One named entry of a [`FieldSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    presence: Presence,
    rule: Option<Rule>,
}

impl Field {
    /// Create a field.
    ///
    /// A field without a rule only checks key presence.
    pub fn new(name: impl Into<String>, presence: Presence, rule: Option<Rule>) -> Self {
        Self {
            name: name.into(),
            presence,
            rule,
        }
    }

    /// Key looked up in the input object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Presence marker.
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Check if the key must be present.
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Rule applied to the value, if any.
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }
}

/// Ordered set of uniquely named fields for one schema level.
///
/// Declaration order is kept and decides the order of reported errors.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    fields: Arc<[Field]>,
}

impl FieldSet {
    /// Start building a field set.
    pub fn builder() -> FieldSetBuilder {
        FieldSetBuilder::default()
    }

    /// Build a field set from already constructed fields.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MalformedRule`] when no field is given, or for an empty
    /// or duplicate field name.
    pub fn new(fields: Vec<Field>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::malformed("`schema` has no fields"));
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.is_empty() {
                return Err(SchemaError::malformed("field name cannot be empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::malformed(format!(
                    "field `{}` is declared more than once",
                    field.name
                )));
            }
        }
        Ok(Self {
            fields: fields.into(),
        })
    }

    /// Iterate over the fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Schema-level disjunction: `{a} | {b}` applies `b` only when `a` fails.
impl BitOr for FieldSet {
    type Output = Rule;

    fn bitor(self, rhs: FieldSet) -> Rule {
        Rule::from(self).or(Rule::from(rhs))
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let marker = match field.presence {
                Presence::Required => "",
                Presence::Optional => "?",
            };
            match &field.rule {
                Some(rule) => write!(f, "{}{}: {}", field.name, marker, rule)?,
                None => write!(f, "{}{}", field.name, marker)?,
            }
        }
        write!(f, "}}")
    }
}

/// Builder for [`FieldSet`].
#[derive(Debug, Default)]
pub struct FieldSetBuilder {
    fields: Vec<Field>,
}

impl FieldSetBuilder {
    /// Add a required field validated by `rule`.
    pub fn required(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.fields
            .push(Field::new(name, Presence::Required, Some(rule.into())));
        self
    }

    /// Add an optional field validated by `rule` when present.
    pub fn optional(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.fields
            .push(Field::new(name, Presence::Optional, Some(rule.into())));
        self
    }

    /// Add a required field whose value is not checked.
    pub fn required_key(mut self, name: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, Presence::Required, None));
        self
    }

    /// Finish the field set.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MalformedRule`] when no field was added, or for an empty
    /// or duplicate field name.
    pub fn build(self) -> Result<FieldSet, SchemaError> {
        FieldSet::new(self.fields)
    }
}
