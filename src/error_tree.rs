//! Error trees and error synthesis
//!
//! [`ErrorTree`] is the caller-facing shape of a validation failure: leaf
//! message lists, maps keyed by field name or array index, and the `or`
//! alternatives marker. [`Synthesizer`] builds it from an evaluator
//! [`Failure`] trace.
//!
//! # Disjunction merging
//!
//! When both sides of an `Or` fail:
//!
//! - two flat failures become **one** message joined with the catalog's
//!   joiner: `"must be a string or must be an integer"`
//! - a flat failure against a structured one (keyed by field or index)
//!   reports the structured side, which points at the deeper problem
//! - two structured failures fan out under the alternatives marker:
//!   `{"or": [<left tree>, <right tree>]}`; chained alternatives are listed
//!   side by side rather than nested
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::evaluator::{Failure, Shape};
//! use weir::{ErrorTree, MessageCatalog, Synthesizer};
//!
//! let catalog = MessageCatalog::default();
//! let failure = Failure::Either(
//!     Box::new(Failure::Predicate { name: "str?".into(), args: vec![], input: json!({}) }),
//!     Box::new(Failure::TypeMismatch { expected: Shape::Array }),
//! );
//!
//! assert_eq!(
//!     Synthesizer::new(&catalog).synthesize(&failure),
//!     ErrorTree::Messages(vec!["must be a string or must be an array".into()])
//! );
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::evaluator::Failure;
use crate::messages::MessageCatalog;

/// Key of a nested error entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    /// Field name of a schema.
    Field(String),
    /// Zero-based array index.
    Index(usize),
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKey::Field(name) => write!(f, "{}", name),
            ErrorKey::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for ErrorKey {
    fn from(name: &str) -> Self {
        ErrorKey::Field(name.to_string())
    }
}

impl From<String> for ErrorKey {
    fn from(name: String) -> Self {
        ErrorKey::Field(name)
    }
}

impl From<usize> for ErrorKey {
    fn from(index: usize) -> Self {
        ErrorKey::Index(index)
    }
}

/// Literal key of the alternatives marker.
pub const OR_MARKER: &str = "or";

/// Path-keyed tree of validation messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTree {
    /// Messages for one location, in evaluation order.
    Messages(Vec<String>),
    /// Nested errors keyed by field name or index, in evaluation order.
    Map(Vec<(ErrorKey, ErrorTree)>),
    /// Errors of alternatives that could not be merged into one sentence.
    Or(Vec<ErrorTree>),
}

impl Default for ErrorTree {
    fn default() -> Self {
        ErrorTree::Map(Vec::new())
    }
}

impl ErrorTree {
    /// An empty tree: no errors anywhere.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a leaf holding a single message.
    pub fn message(text: impl Into<String>) -> Self {
        ErrorTree::Messages(vec![text.into()])
    }

    /// Check if the tree holds no messages at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ErrorTree::Messages(messages) => messages.is_empty(),
            ErrorTree::Map(entries) => entries.iter().all(|(_, tree)| tree.is_empty()),
            ErrorTree::Or(alternatives) => alternatives.iter().all(ErrorTree::is_empty),
        }
    }

    /// Check if this is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ErrorTree::Messages(_))
    }

    /// Look up a direct child of a map node.
    ///
    /// ```rust
    /// use weir::{ErrorKey, ErrorTree};
    ///
    /// let tree = ErrorTree::Map(vec![(ErrorKey::Index(2), ErrorTree::message("must be an integer"))]);
    /// assert_eq!(tree.get(2usize), Some(&ErrorTree::message("must be an integer")));
    /// assert_eq!(tree.get("2"), None);
    /// ```
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&ErrorTree> {
        let key = key.into();
        match self {
            ErrorTree::Map(entries) => entries.iter().find(|(k, _)| *k == key).map(|(_, t)| t),
            _ => None,
        }
    }

    /// Messages stored directly at this node (empty for non-leaves).
    pub fn leaf_messages(&self) -> &[String] {
        match self {
            ErrorTree::Messages(messages) => messages,
            _ => &[],
        }
    }

    /// Every message with its path, depth first in evaluation order.
    ///
    /// Alternatives contribute the [`OR_MARKER`] and their position to the
    /// path.
    ///
    /// ```rust
    /// use weir::{ErrorKey, ErrorTree};
    ///
    /// let tree = ErrorTree::Map(vec![(
    ///     ErrorKey::from("user"),
    ///     ErrorTree::Or(vec![
    ///         ErrorTree::Map(vec![(ErrorKey::from("name"), ErrorTree::message("is missing"))]),
    ///         ErrorTree::Map(vec![(ErrorKey::from("first_name"), ErrorTree::message("is missing"))]),
    ///     ]),
    /// )]);
    ///
    /// let paths: Vec<String> = tree.flatten().iter().map(|m| m.to_string()).collect();
    /// assert_eq!(paths, vec!["user.or.0.name is missing", "user.or.1.first_name is missing"]);
    /// ```
    pub fn flatten(&self) -> Vec<ErrorMessage> {
        let mut out = Vec::new();
        self.collect(&mut Vec::new(), &mut out);
        out
    }

    fn collect(&self, path: &mut Vec<String>, out: &mut Vec<ErrorMessage>) {
        match self {
            ErrorTree::Messages(messages) => out.extend(messages.iter().map(|text| ErrorMessage {
                path: path.clone(),
                text: text.clone(),
            })),
            ErrorTree::Map(entries) => {
                for (key, tree) in entries {
                    path.push(key.to_string());
                    tree.collect(path, out);
                    path.pop();
                }
            }
            ErrorTree::Or(alternatives) => {
                path.push(OR_MARKER.to_string());
                for (i, tree) in alternatives.iter().enumerate() {
                    path.push(i.to_string());
                    tree.collect(path, out);
                    path.pop();
                }
                path.pop();
            }
        }
    }

    /// Render as JSON.
    ///
    /// Leaves become arrays of strings, maps become objects (indices turn
    /// into string keys) and alternatives become `{"or": [...]}`.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use weir::{ErrorKey, ErrorTree};
    ///
    /// let tree = ErrorTree::Map(vec![(
    ///     ErrorKey::from("foo"),
    ///     ErrorTree::Map(vec![(ErrorKey::Index(0), ErrorTree::message("must be an integer"))]),
    /// )]);
    /// assert_eq!(tree.to_json(), json!({"foo": {"0": ["must be an integer"]}}));
    /// ```
    pub fn to_json(&self) -> Value {
        match self {
            ErrorTree::Messages(messages) => {
                Value::Array(messages.iter().cloned().map(Value::String).collect())
            }
            ErrorTree::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, tree)| (key.to_string(), tree.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            ErrorTree::Or(alternatives) => {
                let mut map = Map::new();
                map.insert(
                    OR_MARKER.to_string(),
                    Value::Array(alternatives.iter().map(ErrorTree::to_json).collect()),
                );
                Value::Object(map)
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            ErrorTree::Messages(messages) => serde::Serialize::serialize(messages, serializer),
            ErrorTree::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, tree) in entries {
                    map.serialize_entry(&key.to_string(), tree)?;
                }
                map.end()
            }
            ErrorTree::Or(alternatives) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(OR_MARKER, alternatives)?;
                map.end()
            }
        }
    }
}

/// One message of a flattened [`ErrorTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Keys leading to the message, outermost first.
    pub path: Vec<String>,
    /// The rendered message.
    pub text: String,
}

impl ErrorMessage {
    /// Path joined with dots, e.g. `user.or.0.name`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{} {}", self.dotted_path(), self.text)
        }
    }
}

/// Turns evaluator failure traces into [`ErrorTree`]s.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'c> {
    catalog: &'c MessageCatalog,
}

impl<'c> Synthesizer<'c> {
    /// Create a synthesizer rendering messages from `catalog`.
    pub fn new(catalog: &'c MessageCatalog) -> Self {
        Self { catalog }
    }

    /// Build the error tree for a failure.
    pub fn synthesize(&self, failure: &Failure) -> ErrorTree {
        match failure {
            Failure::Predicate { name, args, input } => {
                ErrorTree::message(self.catalog.render(name, args, input))
            }
            Failure::TypeMismatch { expected } => ErrorTree::message(self.catalog.render(
                expected.predicate_name(),
                &[],
                &Value::Null,
            )),
            Failure::Missing => ErrorTree::message(self.catalog.missing()),
            Failure::Elements(elements) => ErrorTree::Map(
                elements
                    .iter()
                    .map(|(index, failure)| (ErrorKey::Index(*index), self.synthesize(failure)))
                    .collect(),
            ),
            Failure::Fields(fields) => ErrorTree::Map(
                fields
                    .iter()
                    .map(|(name, failure)| {
                        (ErrorKey::Field(name.clone()), self.synthesize(failure))
                    })
                    .collect(),
            ),
            Failure::Either(left, right) => {
                self.merge_alternatives(self.synthesize(left), self.synthesize(right))
            }
        }
    }

    fn merge_alternatives(&self, left: ErrorTree, right: ErrorTree) -> ErrorTree {
        match (left, right) {
            (ErrorTree::Messages(mut left), ErrorTree::Messages(right)) => {
                for message in right {
                    if !left.contains(&message) {
                        left.push(message);
                    }
                }
                ErrorTree::message(self.catalog.join_alternatives(&left))
            }
            (ErrorTree::Messages(_), structured) | (structured, ErrorTree::Messages(_)) => {
                structured
            }
            (left, right) => {
                let mut alternatives = Vec::new();
                for tree in [left, right] {
                    match tree {
                        ErrorTree::Or(nested) => alternatives.extend(nested),
                        other => alternatives.push(other),
                    }
                }
                ErrorTree::Or(alternatives)
            }
        }
    }
}
