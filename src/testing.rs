//! Testing utilities for schemas
//!
//! Assertion macros that call a schema and panic with the rendered error tree
//! when the outcome is not the expected one, plus (behind the `proptest`
//! feature) a strategy for arbitrary JSON inputs.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::rule::{pred, FieldSet};
//! use weir::{assert_errors, assert_invalid, assert_valid, Schema};
//!
//! let schema = Schema::new(FieldSet::builder().required("foo", pred("str?")).build().unwrap()).unwrap();
//!
//! assert_valid!(schema, json!({"foo": "bar"}));
//! assert_invalid!(schema, json!({"foo": 1}));
//! assert_errors!(schema, json!({}), json!({"foo": ["is missing"]}));
//! ```

/// Assert that a schema accepts an input.
///
/// Panics with the error tree if validation fails, or with the schema error
/// if the schema itself is broken.
#[macro_export]
macro_rules! assert_valid {
    ($schema:expr, $input:expr) => {
        match $schema.call(&$input) {
            Ok(result) if result.is_success() => {}
            Ok(result) => {
                panic!("Expected valid input, got errors: {}", result.to_json());
            }
            Err(err) => panic!("Schema error: {}", err),
        }
    };
}

/// Assert that a schema rejects an input.
#[macro_export]
macro_rules! assert_invalid {
    ($schema:expr, $input:expr) => {
        match $schema.call(&$input) {
            Ok(result) if result.is_failure() => {}
            Ok(_) => panic!("Expected invalid input, got success"),
            Err(err) => panic!("Schema error: {}", err),
        }
    };
}

/// Assert that a schema rejects an input with exactly the given errors,
/// compared in their JSON rendering.
#[macro_export]
macro_rules! assert_errors {
    ($schema:expr, $input:expr, $expected:expr) => {
        match $schema.call(&$input) {
            Ok(result) => assert_eq!(result.to_json(), $expected),
            Err(err) => panic!("Schema error: {}", err),
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// Strategy producing arbitrary JSON values up to a small nesting depth.
#[cfg(feature = "proptest")]
pub fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    use serde_json::Value;

    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}
