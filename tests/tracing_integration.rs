//! Log output of schema compilation and calls
#![cfg(feature = "tracing")]

use serde_json::json;
use tracing_test::traced_test;
use weir::rule::pred;
use weir::{Compiler, FieldDecl, RuleDecl, Schema, SchemaError};

#[traced_test]
#[test]
fn compile_and_call_are_logged() {
    let schema = Compiler::new()
        .compile(vec![FieldDecl::required("foo", RuleDecl::predicate("str?"))])
        .unwrap();
    schema.call(&json!({"foo": 1})).unwrap();

    assert!(logs_contain("compiled schema"));
    assert!(logs_contain("schema call finished"));
    assert!(logs_contain("success=false"));
}

#[traced_test]
#[test]
fn unresolved_predicate_is_warned() {
    let narrow = Compiler::new()
        .with_registry(weir::predicate::PredicateRegistry::new().register(
            "never?",
            0,
            |_: &serde_json::Value, _: &[serde_json::Value]| false,
        ))
        .schema(pred("never?"))
        .unwrap();
    let schema = narrow | Schema::new(pred("str?")).unwrap();

    assert_eq!(
        schema.call(&json!(1)).unwrap_err(),
        SchemaError::unknown_predicate("str?")
    );
    assert!(logs_contain("cannot resolve predicate"));
}
