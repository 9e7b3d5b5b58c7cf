//! Type predicates
//!
//! One predicate per JSON shape. These never look at arguments.

use serde_json::Value;

pub(crate) fn is_nil(input: &Value, _: &[Value]) -> bool {
    input.is_null()
}

pub(crate) fn is_str(input: &Value, _: &[Value]) -> bool {
    input.is_string()
}

pub(crate) fn is_int(input: &Value, _: &[Value]) -> bool {
    input.is_i64() || input.is_u64()
}

pub(crate) fn is_float(input: &Value, _: &[Value]) -> bool {
    input.is_f64()
}

pub(crate) fn is_number(input: &Value, _: &[Value]) -> bool {
    input.is_number()
}

pub(crate) fn is_bool(input: &Value, _: &[Value]) -> bool {
    input.is_boolean()
}

pub(crate) fn is_true(input: &Value, _: &[Value]) -> bool {
    input.as_bool() == Some(true)
}

pub(crate) fn is_false(input: &Value, _: &[Value]) -> bool {
    input.as_bool() == Some(false)
}

pub(crate) fn is_array(input: &Value, _: &[Value]) -> bool {
    input.is_array()
}

pub(crate) fn is_hash(input: &Value, _: &[Value]) -> bool {
    input.is_object()
}
