//! Rule evaluation
//!
//! [`Evaluator`] walks a [`Rule`] against an input value and returns an
//! [`Outcome`]. A failing outcome carries a [`Failure`] trace that mirrors the
//! shape of the rule tree closely enough for the
//! [error synthesizer](crate::error_tree) to turn it into messages.
//!
//! Evaluation is pure: it reads the rule tree and the registry, allocates
//! only the returned trace, and never mutates shared state.
//!
//! # Short-circuit policy
//!
//! - `And(l, r)`: when `l` fails its failure is returned and `r` is never run.
//! - `Or(l, r)`: when `l` holds `r` is never run; when both fail the result is
//!   [`Failure::Either`] holding both traces.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::evaluator::{Evaluator, Failure, Outcome};
//! use weir::predicate::PredicateRegistry;
//! use weir::rule::{pred, pred_with};
//!
//! let registry = PredicateRegistry::standard();
//! let rule = pred("int?") & pred_with("gt?", [json!(18)]);
//!
//! let outcome = Evaluator::new(&registry).evaluate(&rule, &json!(17)).unwrap();
//! assert_eq!(
//!     outcome,
//!     Outcome::Failure(Failure::Predicate {
//!         name: "gt?".to_string(),
//!         args: vec![json!(18)],
//!         input: json!(17),
//!     })
//! );
//! ```

use serde_json::Value;

use crate::predicate::PredicateRegistry;
use crate::rule::{FieldSet, Rule};
use crate::SchemaError;

/// Input shape required by a structural rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `Each` needs an array.
    Array,
    /// `Schema` needs an object.
    Hash,
}

impl Shape {
    /// Name of the type predicate describing this shape.
    pub fn predicate_name(self) -> &'static str {
        match self {
            Shape::Array => "array?",
            Shape::Hash => "hash?",
        }
    }
}

/// Result of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value satisfies the rule.
    Success,
    /// The value does not satisfy the rule.
    Failure(Failure),
}

impl Outcome {
    /// Check if the rule held.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Check if the rule failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The failure trace, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// Consume into the failure trace, if any.
    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }
}

/// Why a rule failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A predicate returned false.
    Predicate {
        /// Predicate name.
        name: String,
        /// Arguments it was called with.
        args: Vec<Value>,
        /// The rejected input.
        input: Value,
    },
    /// `Each` got a non-array or `Schema` got a non-object.
    TypeMismatch {
        /// The shape the rule needed.
        expected: Shape,
    },
    /// A required key was absent. The field's rule was not evaluated.
    Missing,
    /// Failing array elements as `(index, failure)`, ascending by index.
    Elements(Vec<(usize, Failure)>),
    /// Failing fields as `(name, failure)`, in declaration order.
    Fields(Vec<(String, Failure)>),
    /// Both sides of an `Or` failed.
    Either(Box<Failure>, Box<Failure>),
}

impl Failure {
    /// Check if this failure renders as plain messages rather than a keyed
    /// tree.
    ///
    /// An `Either` is flat only when both of its sides are.
    pub fn is_flat(&self) -> bool {
        match self {
            Failure::Predicate { .. } | Failure::TypeMismatch { .. } | Failure::Missing => true,
            Failure::Elements(_) | Failure::Fields(_) => false,
            Failure::Either(left, right) => left.is_flat() && right.is_flat(),
        }
    }
}

/// Evaluates rules against values using a predicate registry.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r PredicateRegistry,
}

impl<'r> Evaluator<'r> {
    /// Create an evaluator resolving predicates through `registry`.
    pub fn new(registry: &'r PredicateRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate `rule` against `input`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownPredicate`] if a predicate that is actually
    /// reached is not registered, [`SchemaError::MalformedRule`] if it is
    /// called with the wrong number of arguments. Predicates on branches that
    /// are short-circuited away are not resolved.
    pub fn evaluate(&self, rule: &Rule, input: &Value) -> Result<Outcome, SchemaError> {
        match rule {
            Rule::Predicate { name, args } => self.predicate(name, args, input),
            Rule::And(left, right) => match self.evaluate(left, input)? {
                Outcome::Success => self.evaluate(right, input),
                failure => Ok(failure),
            },
            Rule::Or(left, right) => {
                let Outcome::Failure(left_failure) = self.evaluate(left, input)? else {
                    return Ok(Outcome::Success);
                };
                match self.evaluate(right, input)? {
                    Outcome::Success => Ok(Outcome::Success),
                    Outcome::Failure(right_failure) => Ok(Outcome::Failure(Failure::Either(
                        Box::new(left_failure),
                        Box::new(right_failure),
                    ))),
                }
            }
            Rule::Each(element) => self.each(element, input),
            Rule::Schema(fields) => self.schema(fields, input),
        }
    }

    fn predicate(&self, name: &str, args: &[Value], input: &Value) -> Result<Outcome, SchemaError> {
        let entry = self.registry.resolve(name, args.len()).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(predicate = name, "cannot resolve predicate: {}", err);
            err
        })?;

        if entry.check(input, args) {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::Failure(Failure::Predicate {
                name: name.to_string(),
                args: args.to_vec(),
                input: input.clone(),
            }))
        }
    }

    fn each(&self, element: &Rule, input: &Value) -> Result<Outcome, SchemaError> {
        let Value::Array(items) = input else {
            return Ok(Outcome::Failure(Failure::TypeMismatch {
                expected: Shape::Array,
            }));
        };

        let mut failures = Vec::new();
        for (index, item) in items.iter().enumerate() {
            if let Outcome::Failure(failure) = self.evaluate(element, item)? {
                failures.push((index, failure));
            }
        }

        if failures.is_empty() {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::Failure(Failure::Elements(failures)))
        }
    }

    fn schema(&self, fields: &FieldSet, input: &Value) -> Result<Outcome, SchemaError> {
        let Value::Object(map) = input else {
            return Ok(Outcome::Failure(Failure::TypeMismatch {
                expected: Shape::Hash,
            }));
        };

        let mut failures = Vec::new();
        for field in fields {
            match (map.get(field.name()), field.rule()) {
                (None, _) if field.is_required() => {
                    failures.push((field.name().to_string(), Failure::Missing));
                }
                (None, _) | (Some(_), None) => {}
                (Some(value), Some(rule)) => {
                    if let Outcome::Failure(failure) = self.evaluate(rule, value)? {
                        failures.push((field.name().to_string(), failure));
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::Failure(Failure::Fields(failures)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{pred, pred_with, FieldSet};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn eval(rule: &Rule, input: Value) -> Outcome {
        let registry = PredicateRegistry::standard();
        Evaluator::new(&registry).evaluate(rule, &input).unwrap()
    }

    fn failed(name: &str, input: Value) -> Failure {
        Failure::Predicate {
            name: name.to_string(),
            args: vec![],
            input,
        }
    }

    #[test]
    fn test_predicate_success_and_failure() {
        assert_eq!(eval(&pred("str?"), json!("bar")), Outcome::Success);
        assert_eq!(
            eval(&pred("str?"), json!(1)),
            Outcome::Failure(failed("str?", json!(1)))
        );
    }

    #[test]
    fn test_and_short_circuits_on_left_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry =
            PredicateRegistry::standard().register("count?", 0, move |_: &Value, _: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            });

        let rule = pred("int?") & pred("count?");
        let outcome = Evaluator::new(&registry)
            .evaluate(&rule, &json!("x"))
            .unwrap();

        assert_eq!(outcome, Outcome::Failure(failed("int?", json!("x"))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_and_reports_right_failure() {
        let rule = pred("int?") & pred_with("gt?", [json!(18)]);
        assert_eq!(
            eval(&rule, json!(17)),
            Outcome::Failure(Failure::Predicate {
                name: "gt?".to_string(),
                args: vec![json!(18)],
                input: json!(17),
            })
        );
    }

    #[test]
    fn test_or_skips_right_on_left_success() {
        let rule = pred("str?") | pred("never?");
        // `never?` is not registered; it must never be resolved.
        assert_eq!(eval(&rule, json!("bar")), Outcome::Success);
    }

    #[test]
    fn test_or_both_fail() {
        let rule = pred("str?") | pred("int?");
        assert_eq!(
            eval(&rule, json!([])),
            Outcome::Failure(Failure::Either(
                Box::new(failed("str?", json!([]))),
                Box::new(failed("int?", json!([]))),
            ))
        );
    }

    #[test]
    fn test_each_type_mismatch() {
        let rule = Rule::each(pred("int?"));
        assert_eq!(
            eval(&rule, json!({})),
            Outcome::Failure(Failure::TypeMismatch {
                expected: Shape::Array
            })
        );
    }

    #[test]
    fn test_each_collects_failing_indices() {
        let rule = Rule::each(pred("int?"));
        assert_eq!(
            eval(&rule, json!([1, "2", 3, "4"])),
            Outcome::Failure(Failure::Elements(vec![
                (1, failed("int?", json!("2"))),
                (3, failed("int?", json!("4"))),
            ]))
        );
        assert_eq!(eval(&rule, json!([])), Outcome::Success);
    }

    #[test]
    fn test_schema_missing_field_skips_rule() {
        let fields = FieldSet::builder()
            .required("name", pred("not_registered?"))
            .optional("age", pred("int?"))
            .build()
            .unwrap();
        let rule = Rule::schema(fields);

        assert_eq!(
            eval(&rule, json!({})),
            Outcome::Failure(Failure::Fields(vec![("name".to_string(), Failure::Missing)]))
        );
    }

    #[test]
    fn test_schema_optional_and_key_only_fields() {
        let fields = FieldSet::builder()
            .required_key("value")
            .optional("age", pred("int?"))
            .build()
            .unwrap();
        let rule = Rule::schema(fields);

        assert_eq!(eval(&rule, json!({"value": null})), Outcome::Success);
        assert_eq!(
            eval(&rule, json!({"value": 1, "age": "x"})),
            Outcome::Failure(Failure::Fields(vec![(
                "age".to_string(),
                failed("int?", json!("x"))
            )]))
        );
    }

    #[test]
    fn test_schema_type_mismatch() {
        let fields = FieldSet::builder()
            .required("bar", pred("filled?"))
            .build()
            .unwrap();
        assert_eq!(
            eval(&Rule::schema(fields), json!([])),
            Outcome::Failure(Failure::TypeMismatch {
                expected: Shape::Hash
            })
        );
    }

    #[test]
    fn test_unknown_predicate_is_an_error() {
        let registry = PredicateRegistry::standard();
        let err = Evaluator::new(&registry)
            .evaluate(&pred("adult?"), &json!(1))
            .unwrap_err();
        assert_eq!(err, SchemaError::unknown_predicate("adult?"));
    }

    #[test]
    fn test_wrong_arity_is_an_error() {
        let registry = PredicateRegistry::standard();
        let err = Evaluator::new(&registry)
            .evaluate(&pred("gt?"), &json!(1))
            .unwrap_err();
        assert!(matches!(err, SchemaError::MalformedRule { .. }));
    }

    #[test]
    fn test_is_flat() {
        assert!(Failure::Missing.is_flat());
        assert!(Failure::Either(
            Box::new(Failure::Missing),
            Box::new(Failure::TypeMismatch {
                expected: Shape::Array
            })
        )
        .is_flat());
        assert!(!Failure::Either(
            Box::new(Failure::Missing),
            Box::new(Failure::Fields(vec![]))
        )
        .is_flat());
    }
}
