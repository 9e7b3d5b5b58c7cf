//! Named predicates and the registry that resolves them
//!
//! A predicate is a pure boolean test over an input value and an ordered list
//! of arguments. Rules refer to predicates by name (`str?`, `gt?`, ...); the
//! [`PredicateRegistry`] maps those names to implementations and records how
//! many arguments each one takes so that malformed calls are caught when a
//! schema is compiled instead of when it is first used.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::predicate::PredicateRegistry;
//!
//! let registry = PredicateRegistry::standard();
//!
//! assert_eq!(registry.call("str?", &json!("jane"), &[]), Ok(true));
//! assert_eq!(registry.call("gt?", &json!(17), &[json!(18)]), Ok(false));
//! assert!(registry.call("adult?", &json!(17), &[]).is_err());
//! ```
//!
//! # Custom predicates
//!
//! Any `Fn(&Value, &[Value]) -> bool + Send + Sync` is a predicate:
//!
//! ```rust
//! use serde_json::{json, Value};
//! use weir::predicate::PredicateRegistry;
//!
//! let registry = PredicateRegistry::standard().register("uuid?", 0, |input: &Value, _: &[Value]| {
//!     input.as_str().map_or(false, |s| s.len() == 36 && s.matches('-').count() == 4)
//! });
//!
//! assert_eq!(
//!     registry.call("uuid?", &json!("6f1c0a4e-5d7b-4b8e-9a53-0c6e2f1d9b27"), &[]),
//!     Ok(true)
//! );
//! ```

mod collection;
mod number;
mod string;
mod types;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::SchemaError;

/// A pure boolean test over a value and its arguments.
///
/// Implementations must be deterministic and free of side effects: the same
/// input and arguments always give the same answer, which is what lets a
/// compiled schema be shared between threads and evaluated repeatedly.
pub trait Predicate: Send + Sync {
    /// Check if `input` satisfies the predicate for the given arguments.
    fn check(&self, input: &Value, args: &[Value]) -> bool;
}

// Blanket impl for closures and fn items
impl<F> Predicate for F
where
    F: Fn(&Value, &[Value]) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, input: &Value, args: &[Value]) -> bool {
        self(input, args)
    }
}

/// A registered predicate together with its arity.
#[derive(Clone)]
pub struct Entry {
    arity: usize,
    predicate: Arc<dyn Predicate>,
}

impl Entry {
    /// Number of arguments the predicate expects.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Run the predicate.
    ///
    /// Arity is not re-checked here; use [`PredicateRegistry::call`] for a
    /// checked invocation.
    #[inline]
    pub fn check(&self, input: &Value, args: &[Value]) -> bool {
        self.predicate.check(input, args)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("arity", &self.arity).finish()
    }
}

/// Mapping from predicate name to implementation.
///
/// Registries are built once and then shared read-only (usually behind an
/// `Arc` inside a [`Schema`](crate::Schema)).
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    entries: HashMap<String, Entry>,
}

impl PredicateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in predicate.
    ///
    /// | name | arity | holds when |
    /// |------|-------|------------|
    /// | `nil?` `str?` `int?` `float?` `number?` `bool?` `array?` `hash?` | 0 | the input has that JSON type |
    /// | `true?` `false?` | 0 | the input is that boolean |
    /// | `filled?` `empty?` | 0 | the input is (not) null or an empty string/array/object |
    /// | `eql?` `not_eql?` | 1 | the input is (not) equal to the argument |
    /// | `included_in?` `excluded_from?` | 1 | the input is (not) an element of the argument array |
    /// | `gt?` `gteq?` `lt?` `lteq?` | 1 | numeric comparison against the argument |
    /// | `odd?` `even?` | 0 | integer parity |
    /// | `size?` `min_size?` `max_size?` | 1 | size of a string (chars), array or object |
    /// | `start_with?` `end_with?` | 1 | string prefix / suffix |
    pub fn standard() -> Self {
        Self::new()
            .register("nil?", 0, types::is_nil)
            .register("str?", 0, types::is_str)
            .register("int?", 0, types::is_int)
            .register("float?", 0, types::is_float)
            .register("number?", 0, types::is_number)
            .register("bool?", 0, types::is_bool)
            .register("true?", 0, types::is_true)
            .register("false?", 0, types::is_false)
            .register("array?", 0, types::is_array)
            .register("hash?", 0, types::is_hash)
            .register("filled?", 0, collection::filled)
            .register("empty?", 0, collection::empty)
            .register("eql?", 1, collection::eql)
            .register("not_eql?", 1, collection::not_eql)
            .register("included_in?", 1, collection::included_in)
            .register("excluded_from?", 1, collection::excluded_from)
            .register("size?", 1, collection::size)
            .register("min_size?", 1, collection::min_size)
            .register("max_size?", 1, collection::max_size)
            .register("gt?", 1, number::gt)
            .register("gteq?", 1, number::gteq)
            .register("lt?", 1, number::lt)
            .register("lteq?", 1, number::lteq)
            .register("odd?", 0, number::odd)
            .register("even?", 0, number::even)
            .register("start_with?", 1, string::start_with)
            .register("end_with?", 1, string::end_with)
    }

    /// Register a predicate, replacing any previous one with the same name.
    pub fn register<P>(mut self, name: impl Into<String>, arity: usize, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        self.insert(name, arity, predicate);
        self
    }

    /// In-place variant of [`register`](Self::register).
    pub fn insert<P>(&mut self, name: impl Into<String>, arity: usize, predicate: P)
    where
        P: Predicate + 'static,
    {
        self.entries.insert(
            name.into(),
            Entry {
                arity,
                predicate: Arc::new(predicate),
            },
        );
    }

    /// Resolve a predicate by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownPredicate`] if `name` is not registered.
    pub fn lookup(&self, name: &str) -> Result<&Entry, SchemaError> {
        self.entries
            .get(name)
            .ok_or_else(|| SchemaError::unknown_predicate(name))
    }

    /// Resolve a predicate and make sure it accepts `arg_count` arguments.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownPredicate`] for unregistered names and
    /// [`SchemaError::MalformedRule`] for a wrong argument count.
    pub fn resolve(&self, name: &str, arg_count: usize) -> Result<&Entry, SchemaError> {
        let entry = self.lookup(name)?;
        if entry.arity != arg_count {
            return Err(SchemaError::malformed(format!(
                "`{}` expects {} argument(s), got {}",
                name, entry.arity, arg_count
            )));
        }
        Ok(entry)
    }

    /// Resolve and run a predicate in one step.
    pub fn call(&self, name: &str, input: &Value, args: &[Value]) -> Result<bool, SchemaError> {
        Ok(self.resolve(name, args.len())?.check(input, args))
    }

    /// Check if a predicate is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_registry_has_builtins() {
        let registry = PredicateRegistry::standard();
        for name in ["str?", "int?", "filled?", "gt?", "size?", "included_in?"] {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert_eq!(registry.lookup("gt?").unwrap().arity(), 1);
        assert_eq!(registry.lookup("str?").unwrap().arity(), 0);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = PredicateRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.lookup("str?").unwrap_err(),
            SchemaError::unknown_predicate("str?")
        );
    }

    #[test]
    fn test_resolve_checks_arity() {
        let registry = PredicateRegistry::standard();
        let err = registry.resolve("gt?", 0).unwrap_err();
        assert_eq!(
            err,
            SchemaError::malformed("`gt?` expects 1 argument(s), got 0")
        );
        assert!(registry.resolve("gt?", 1).is_ok());
    }

    #[test]
    fn test_register_closure() {
        let registry =
            PredicateRegistry::new().register("answer?", 0, |v: &Value, _: &[Value]| {
                v == &json!(42)
            });
        assert_eq!(registry.call("answer?", &json!(42), &[]), Ok(true));
        assert_eq!(registry.call("answer?", &json!(41), &[]), Ok(false));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let registry =
            PredicateRegistry::standard().register("str?", 0, |_: &Value, _: &[Value]| true);
        assert_eq!(registry.call("str?", &json!(1), &[]), Ok(true));
    }

    #[test]
    fn test_names_sorted() {
        let registry = PredicateRegistry::new()
            .register("b?", 0, |_: &Value, _: &[Value]| true)
            .register("a?", 0, |_: &Value, _: &[Value]| true);
        assert_eq!(registry.names(), vec!["a?", "b?"]);
        assert_eq!(format!("{:?}", registry), r#"PredicateRegistry { names: ["a?", "b?"] }"#);
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PredicateRegistry>();
    }
}
