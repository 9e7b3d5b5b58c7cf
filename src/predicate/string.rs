//! String predicates

use serde_json::Value;

pub(crate) fn start_with(input: &Value, args: &[Value]) -> bool {
    match (input, args) {
        (Value::String(s), [Value::String(prefix)]) => s.starts_with(prefix.as_str()),
        _ => false,
    }
}

pub(crate) fn end_with(input: &Value, args: &[Value]) -> bool {
    match (input, args) {
        (Value::String(s), [Value::String(suffix)]) => s.ends_with(suffix.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_start_with() {
        assert!(start_with(&json!("hello world"), &[json!("hello")]));
        assert!(!start_with(&json!("world hello"), &[json!("hello")]));
        assert!(!start_with(&json!(42), &[json!("4")]));
    }

    #[test]
    fn test_end_with() {
        assert!(end_with(&json!("report.pdf"), &[json!(".pdf")]));
        assert!(!end_with(&json!("report.pdf"), &[json!(".doc")]));
        assert!(!end_with(&json!("report.pdf"), &[json!(1)]));
    }
}
