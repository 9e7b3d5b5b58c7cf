//! Disjunction error messages across predicates, conjunctions, `each` and
//! nested schemas.

use serde_json::json;
use weir::rule::{pred, pred_with, FieldSet, Rule};
use weir::{assert_errors, assert_valid, Schema};

fn schema_for(field: &str, rule: Rule) -> Schema {
    Schema::new(FieldSet::builder().required(field, rule).build().unwrap()).unwrap()
}

fn filled_str(field: &str) -> Schema {
    schema_for(field, pred("filled?") & pred("str?"))
}

#[test]
fn two_predicates_accept_either_side() {
    let schema = schema_for("foo", pred("str?") | pred("int?"));

    assert_valid!(schema, json!({"foo": "bar"}));
    assert_valid!(schema, json!({"foo": 321}));
}

#[test]
fn two_predicates_join_messages() {
    let schema = schema_for("foo", pred("str?") | pred("int?"));

    assert_errors!(
        schema,
        json!({"foo": []}),
        json!({"foo": ["must be a string or must be an integer"]})
    );
}

#[test]
fn predicate_or_conjunction_reports_first_failing_conjunct() {
    let schema = schema_for(
        "foo",
        pred("str?") | (pred("int?") & pred_with("gt?", [json!(18)])),
    );

    assert_valid!(schema, json!({"foo": "bar"}));
    assert_valid!(schema, json!({"foo": 321}));
    assert_errors!(
        schema,
        json!({"foo": []}),
        json!({"foo": ["must be a string or must be an integer"]})
    );
    assert_errors!(
        schema,
        json!({"foo": 17}),
        json!({"foo": ["must be a string or must be greater than 18"]})
    );
}

#[test]
fn predicate_or_each_uses_array_type_message() {
    let schema = schema_for("foo", pred("str?") | Rule::each(pred("int?")));

    assert_valid!(schema, json!({"foo": "bar"}));
    assert_valid!(schema, json!({"foo": [1, 2, 3]}));
    assert_errors!(
        schema,
        json!({"foo": {}}),
        json!({"foo": ["must be a string or must be an array"]})
    );
}

#[test]
fn predicate_or_each_reports_element_errors() {
    let schema = schema_for("foo", pred("str?") | pred("array?").then_each(pred("int?")));

    assert_errors!(
        schema,
        json!({"foo": ["1", "2", "3"]}),
        json!({
            "foo": {
                "0": ["must be an integer"],
                "1": ["must be an integer"],
                "2": ["must be an integer"]
            }
        })
    );
}

#[test]
fn predicate_or_schema() {
    let nested = FieldSet::builder()
        .required("bar", pred("filled?"))
        .build()
        .unwrap();
    let schema = schema_for("foo", pred("str?") | pred("hash?").then_schema(nested));

    assert_valid!(schema, json!({"foo": "bar"}));
    assert_valid!(schema, json!({"foo": {"bar": "baz"}}));
    assert_errors!(
        schema,
        json!({"foo": []}),
        json!({"foo": ["must be a string or must be a hash"]})
    );
    assert_errors!(
        schema,
        json!({"foo": {"bar": ""}}),
        json!({"foo": {"bar": ["must be filled"]}})
    );
}

#[test]
fn bare_schema_type_mismatch_uses_hash_message() {
    let nested = FieldSet::builder()
        .required("bar", pred("filled?"))
        .build()
        .unwrap();
    let schema = schema_for("foo", pred("str?") | Rule::schema(nested));

    assert_errors!(
        schema,
        json!({"foo": 1}),
        json!({"foo": ["must be a string or must be a hash"]})
    );
}

#[test]
fn two_schemas_fan_out_under_or() {
    let schema = schema_for("user", Rule::schema(filled_str("name") | filled_str("first_name")));

    assert_valid!(schema, json!({"user": {"name": "John"}}));
    assert_valid!(schema, json!({"user": {"first_name": "John"}}));
    assert_errors!(
        schema,
        json!({"user": {"last_name": "John"}}),
        json!({"user": {"or": [{"name": ["is missing"]}, {"first_name": ["is missing"]}]}})
    );
}

#[test]
fn top_level_schema_disjunction() {
    let schema = filled_str("name") | filled_str("first_name");

    assert_errors!(
        schema,
        json!({"last_name": "John"}),
        json!({"or": [{"name": ["is missing"]}, {"first_name": ["is missing"]}]})
    );
}

#[test]
fn left_success_suppresses_right_errors() {
    let schema = schema_for("foo", pred("int?") | Rule::each(pred("str?")));

    let result = schema.call(&json!({"foo": 7})).unwrap();
    assert!(result.is_success());
    assert!(result.errors().is_empty());
}

#[test]
fn right_success_suppresses_left_errors() {
    let schema = schema_for("foo", pred("str?") | pred("int?"));

    let result = schema.call(&json!({"foo": 7})).unwrap();
    assert!(result.is_success());
}

#[test]
fn conjunction_reports_left_failure_only() {
    let schema = schema_for("foo", pred("int?") & pred_with("gt?", [json!(18)]));

    assert_errors!(schema, json!({"foo": "x"}), json!({"foo": ["must be an integer"]}));
}

#[test]
fn custom_joiner_is_used() {
    use weir::{Compiler, MessageCatalog};

    let schema = Compiler::new()
        .with_messages(MessageCatalog::default().with_or_joiner("OR"))
        .schema(FieldSet::builder().required("foo", pred("str?") | pred("int?")).build().unwrap())
        .unwrap();

    assert_errors!(
        schema,
        json!({"foo": null}),
        json!({"foo": ["must be a string OR must be an integer"]})
    );
}

#[test]
fn schemas_failing_the_same_way_report_one_message() {
    let schema = filled_str("name") | filled_str("first_name");

    assert_errors!(schema, json!([]), json!(["must be a hash"]));
}
