//! Questionnaire definitions validated with a schema disjunction
//!
//! Every definition is either a free-text question or a scale with options.
//! When a definition matches neither, both sets of errors are reported under
//! `or`.
//!
//! Run with: cargo run --example questionnaire

use serde_json::json;
use weir::rule::{pred, pred_with, FieldSet};
use weir::{Schema, SchemaError};

fn filled_str() -> weir::Rule {
    pred("filled?") & pred("str?")
}

fn build() -> Result<Schema, SchemaError> {
    let question = Schema::new(
        FieldSet::builder()
            .required("type", pred("filled?") & pred_with("eql?", [json!("question")]))
            .required("id", filled_str())
            .required("text", filled_str())
            .build()?,
    )?;

    let option = FieldSet::builder()
        .required_key("value")
        .required("text", filled_str())
        .build()?;

    let scale = Schema::new(
        FieldSet::builder()
            .required("type", pred("filled?") & pred_with("eql?", [json!("scale")]))
            .required("id", filled_str())
            .required(
                "options",
                pred("array?")
                    .and(pred_with("min_size?", [json!(1)]))
                    .then_each(pred("hash?").then_schema(option)),
            )
            .build()?,
    )?;

    Schema::new(
        FieldSet::builder()
            .required(
                "definitions",
                pred("array?")
                    .and(pred_with("min_size?", [json!(1)]))
                    .then_each(pred("hash?").then_schema(question | scale)),
            )
            .build()?,
    )
}

fn main() -> Result<(), SchemaError> {
    let schema = build()?;
    println!("Schema: {}\n", schema.root());

    let documents = [
        json!({
            "definitions": [
                {"type": "scale", "id": "1", "options": [{"text": "No", "value": 1}, {"text": "Yes", "value": 2}]},
                {"type": "question", "id": "2", "text": "hello"}
            ]
        }),
        json!({
            "definitions": [
                {"type": "scale", "id": "3", "options": [{"text": ""}]},
                "not a definition"
            ]
        }),
    ];

    for document in &documents {
        let result = schema.call(document)?;
        if result.is_success() {
            println!("valid");
        } else {
            for message in result.messages() {
                println!("  {}", message);
            }
        }
        println!();
    }

    Ok(())
}
