//! Unchecked rule declarations
//!
//! Declarations are what an authoring layer produces before anything has
//! been verified: every child is optional, names are plain strings and
//! arguments are raw JSON. The [`Compiler`](crate::Compiler) turns them into
//! [`Rule`](crate::Rule) trees or rejects them with
//! [`SchemaError::MalformedRule`](crate::SchemaError::MalformedRule).
//!
//! With the `serde` feature, declarations can be read from JSON:
//!
//! ```rust,ignore
//! let decl: RuleDecl = serde_json::from_value(json!({
//!     "type": "or",
//!     "left": {"type": "predicate", "name": "str?"},
//!     "right": {"type": "predicate", "name": "int?"}
//! }))?;
//! ```

use serde_json::Value;

use crate::rule::Presence;

/// Declaration of one rule node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum RuleDecl {
    /// Predicate leaf.
    Predicate {
        /// Registry name.
        name: String,
        /// Arguments after the input.
        #[cfg_attr(feature = "serde", serde(default))]
        args: Vec<Value>,
    },
    /// Conjunction of two branches.
    And {
        /// Checked first.
        left: Option<Box<RuleDecl>>,
        /// Checked when `left` holds.
        right: Option<Box<RuleDecl>>,
    },
    /// Disjunction of two branches.
    Or {
        /// Checked first.
        left: Option<Box<RuleDecl>>,
        /// Checked when `left` fails.
        right: Option<Box<RuleDecl>>,
    },
    /// Per-element rule for arrays.
    Each {
        /// Rule applied to every element.
        element: Option<Box<RuleDecl>>,
    },
    /// Nested field set for objects.
    Schema {
        /// Fields of the nested level.
        fields: Option<Vec<FieldDecl>>,
    },
}

impl RuleDecl {
    /// Predicate leaf without arguments.
    pub fn predicate(name: impl Into<String>) -> Self {
        RuleDecl::Predicate {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Predicate leaf with arguments.
    pub fn predicate_with(name: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        RuleDecl::Predicate {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Conjunction with both branches present.
    pub fn and(left: RuleDecl, right: RuleDecl) -> Self {
        RuleDecl::And {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Disjunction with both branches present.
    pub fn or(left: RuleDecl, right: RuleDecl) -> Self {
        RuleDecl::Or {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Per-element rule.
    pub fn each(element: RuleDecl) -> Self {
        RuleDecl::Each {
            element: Some(Box::new(element)),
        }
    }

    /// Nested field set.
    pub fn schema(fields: Vec<FieldDecl>) -> Self {
        RuleDecl::Schema {
            fields: Some(fields),
        }
    }
}

/// Declaration of one field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    /// Key in the input object.
    pub name: String,
    /// Required or optional.
    pub presence: Presence,
    /// Value rule; `None` checks presence only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rule: Option<RuleDecl>,
}

impl FieldDecl {
    /// Required field.
    pub fn required(name: impl Into<String>, rule: RuleDecl) -> Self {
        Self {
            name: name.into(),
            presence: Presence::Required,
            rule: Some(rule),
        }
    }

    /// Optional field.
    pub fn optional(name: impl Into<String>, rule: RuleDecl) -> Self {
        Self {
            name: name.into(),
            presence: Presence::Optional,
            rule: Some(rule),
        }
    }

    /// Required field without a value rule.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            presence: Presence::Required,
            rule: None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_absent_branch() {
        let decl: RuleDecl = serde_json::from_value(json!({
            "type": "or",
            "left": {"type": "predicate", "name": "str?"}
        }))
        .unwrap();
        assert_eq!(
            decl,
            RuleDecl::Or {
                left: Some(Box::new(RuleDecl::predicate("str?"))),
                right: None,
            }
        );
    }

    #[test]
    fn test_deserialize_field() {
        let field: FieldDecl = serde_json::from_value(json!({
            "name": "age",
            "presence": "optional",
            "rule": {"type": "predicate", "name": "gt?", "args": [18]}
        }))
        .unwrap();
        assert_eq!(
            field,
            FieldDecl::optional("age", RuleDecl::predicate_with("gt?", [json!(18)]))
        );
    }

    #[test]
    fn test_serialize_round_trips_shape() {
        let decl = RuleDecl::each(RuleDecl::predicate("int?"));
        assert_eq!(
            serde_json::to_value(&decl).unwrap(),
            json!({"type": "each", "element": {"type": "predicate", "name": "int?", "args": []}})
        );
    }
}
