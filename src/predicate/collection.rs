//! Presence, equality, membership and size predicates

use serde_json::Value;

fn is_empty(input: &Value) -> bool {
    match input {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Size of a string (in chars), array or object.
fn size_of(input: &Value) -> Option<usize> {
    match input {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

fn size_bound(args: &[Value]) -> Option<usize> {
    match args {
        [bound] => bound.as_u64().and_then(|n| usize::try_from(n).ok()),
        _ => None,
    }
}

pub(crate) fn filled(input: &Value, _: &[Value]) -> bool {
    !is_empty(input)
}

pub(crate) fn empty(input: &Value, _: &[Value]) -> bool {
    is_empty(input)
}

pub(crate) fn eql(input: &Value, args: &[Value]) -> bool {
    matches!(args, [expected] if expected == input)
}

pub(crate) fn not_eql(input: &Value, args: &[Value]) -> bool {
    matches!(args, [expected] if expected != input)
}

pub(crate) fn included_in(input: &Value, args: &[Value]) -> bool {
    match args {
        [Value::Array(list)] => list.contains(input),
        _ => false,
    }
}

pub(crate) fn excluded_from(input: &Value, args: &[Value]) -> bool {
    match args {
        [Value::Array(list)] => !list.contains(input),
        _ => false,
    }
}

pub(crate) fn size(input: &Value, args: &[Value]) -> bool {
    matches!((size_of(input), size_bound(args)), (Some(n), Some(expected)) if n == expected)
}

pub(crate) fn min_size(input: &Value, args: &[Value]) -> bool {
    matches!((size_of(input), size_bound(args)), (Some(n), Some(min)) if n >= min)
}

pub(crate) fn max_size(input: &Value, args: &[Value]) -> bool {
    matches!((size_of(input), size_bound(args)), (Some(n), Some(max)) if n <= max)
}
