//! Number predicates
//!
//! Comparisons against a numeric argument. Integers are compared exactly when
//! both sides fit in an `i64`; anything else falls back to `f64`. A
//! non-numeric input or argument never satisfies a comparison.

use std::cmp::Ordering;

use serde_json::Value;

fn compare(input: &Value, args: &[Value]) -> Option<Ordering> {
    let [bound] = args else {
        return None;
    };
    match (input.as_i64(), bound.as_i64()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => input.as_f64()?.partial_cmp(&bound.as_f64()?),
    }
}

pub(crate) fn gt(input: &Value, args: &[Value]) -> bool {
    compare(input, args) == Some(Ordering::Greater)
}

pub(crate) fn gteq(input: &Value, args: &[Value]) -> bool {
    matches!(
        compare(input, args),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

pub(crate) fn lt(input: &Value, args: &[Value]) -> bool {
    compare(input, args) == Some(Ordering::Less)
}

pub(crate) fn lteq(input: &Value, args: &[Value]) -> bool {
    matches!(compare(input, args), Some(Ordering::Less | Ordering::Equal))
}

pub(crate) fn odd(input: &Value, _: &[Value]) -> bool {
    input.as_i64().map_or(false, |n| n % 2 != 0)
}

pub(crate) fn even(input: &Value, _: &[Value]) -> bool {
    input.as_i64().map_or(false, |n| n % 2 == 0)
}
