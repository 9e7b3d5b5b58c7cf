//! Demonstrates tracing output from schema compilation and calls
//!
//! Run with: cargo run --example tracing_demo --features tracing

use serde_json::json;
use weir::{Compiler, FieldDecl, RuleDecl};

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    let schema = match Compiler::new().compile(vec![
        FieldDecl::required(
            "email",
            RuleDecl::and(RuleDecl::predicate("filled?"), RuleDecl::predicate("str?")),
        ),
        FieldDecl::optional(
            "age",
            RuleDecl::and(
                RuleDecl::predicate("int?"),
                RuleDecl::predicate_with("gteq?", [json!(18)]),
            ),
        ),
    ]) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!("Schema rejected: {}", e);
            return;
        }
    };

    for input in [
        json!({"email": "jane@example.com", "age": 30}),
        json!({"email": "", "age": 12}),
        json!({"age": "old"}),
    ] {
        match schema.call(&input) {
            Ok(result) if result.is_success() => tracing::info!("{} is valid", input),
            Ok(result) => tracing::warn!("{} rejected: {}", input, result.to_json()),
            Err(e) => tracing::error!("Schema error: {}", e),
        }
    }
}
