//! Message templates for failed predicates
//!
//! The error synthesizer never hard-codes English: every leaf message comes
//! from a [`MessageCatalog`] keyed by predicate name. The default catalog
//! covers all built-in predicates; entries can be replaced or added with
//! [`MessageCatalog::with_template`].
//!
//! Templates interpolate `%{0}`, `%{1}`, ... with the predicate arguments and
//! `%{input}` with the rejected value. Strings are inserted without quotes and
//! arrays as comma separated lists.
//!
//! Two keys are special:
//! - `key?` is the message for a missing required field
//! - the disjunction joiner (`"or"` by default) glues the messages of two
//!   failed alternatives into one sentence
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use weir::MessageCatalog;
//!
//! let catalog = MessageCatalog::default();
//! assert_eq!(catalog.render("gt?", &[json!(18)], &json!(17)), "must be greater than 18");
//! assert_eq!(
//!     catalog.render("included_in?", &[json!(["draft", "published"])], &json!("x")),
//!     "must be one of: draft, published"
//! );
//!
//! let catalog = catalog.with_template("gt?", "%{input} is not above %{0}");
//! assert_eq!(catalog.render("gt?", &[json!(18)], &json!(17)), "17 is not above 18");
//! ```

use std::collections::HashMap;

use serde_json::Value;

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("nil?", "cannot be defined"),
    ("str?", "must be a string"),
    ("int?", "must be an integer"),
    ("float?", "must be a float"),
    ("number?", "must be a number"),
    ("bool?", "must be boolean"),
    ("true?", "must be true"),
    ("false?", "must be false"),
    ("array?", "must be an array"),
    ("hash?", "must be a hash"),
    ("filled?", "must be filled"),
    ("empty?", "must be empty"),
    ("eql?", "must be equal to %{0}"),
    ("not_eql?", "must not be equal to %{0}"),
    ("included_in?", "must be one of: %{0}"),
    ("excluded_from?", "must not be one of: %{0}"),
    ("size?", "size must be %{0}"),
    ("min_size?", "size cannot be less than %{0}"),
    ("max_size?", "size cannot be greater than %{0}"),
    ("gt?", "must be greater than %{0}"),
    ("gteq?", "must be greater than or equal to %{0}"),
    ("lt?", "must be less than %{0}"),
    ("lteq?", "must be less than or equal to %{0}"),
    ("odd?", "must be odd"),
    ("even?", "must be even"),
    ("start_with?", "must start with %{0}"),
    ("end_with?", "must end with %{0}"),
    ("key?", "is missing"),
];

/// Key of the missing-field template.
pub const MISSING_KEY: &str = "key?";

/// Override key that replaces the disjunction joiner when loading a catalog
/// from a map.
pub const OR_KEY: &str = "or";

const FALLBACK: &str = "is invalid";

/// Predicate name to message template mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
    or_joiner: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES
                .iter()
                .map(|(name, template)| (name.to_string(), template.to_string()))
                .collect(),
            or_joiner: OR_KEY.to_string(),
        }
    }
}

impl MessageCatalog {
    /// Create a catalog with no templates and the default joiner.
    ///
    /// Every message renders as `"is invalid"` until templates are added.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
            or_joiner: OR_KEY.to_string(),
        }
    }

    /// Set the template for a predicate.
    pub fn with_template(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(name.into(), template.into());
        self
    }

    /// Apply a batch of overrides.
    ///
    /// The [`OR_KEY`] entry, if present, replaces the disjunction joiner
    /// instead of being stored as a template.
    pub fn with_templates<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, template) in overrides {
            let name = name.into();
            if name == OR_KEY {
                self.or_joiner = template.into();
            } else {
                self.templates.insert(name, template.into());
            }
        }
        self
    }

    /// Replace the word joining the messages of failed alternatives.
    pub fn with_or_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.or_joiner = joiner.into();
        self
    }

    /// The disjunction joiner.
    pub fn or_joiner(&self) -> &str {
        &self.or_joiner
    }

    /// Raw template for a predicate, if one is registered.
    pub fn template(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Message for a missing required field.
    pub fn missing(&self) -> String {
        self.render(MISSING_KEY, &[], &Value::Null)
    }

    /// Join two sets of flat messages into one alternative sentence.
    ///
    /// ```rust
    /// use weir::MessageCatalog;
    ///
    /// let catalog = MessageCatalog::default();
    /// let joined = catalog.join_alternatives(&["must be a string".into(), "must be an integer".into()]);
    /// assert_eq!(joined, "must be a string or must be an integer");
    /// ```
    pub fn join_alternatives(&self, messages: &[String]) -> String {
        messages.join(&format!(" {} ", self.or_joiner))
    }

    /// Render the message for a failed predicate.
    pub fn render(&self, name: &str, args: &[Value], input: &Value) -> String {
        match self.templates.get(name) {
            Some(template) => interpolate(template, args, input),
            None => FALLBACK.to_string(),
        }
    }
}

fn interpolate(template: &str, args: &[Value], input: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let token = &after[..end];
        let value = if token == "input" {
            Some(input)
        } else {
            token.parse::<usize>().ok().and_then(|i| args.get(i))
        };
        match value {
            Some(value) => out.push_str(&display_value(value)),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MessageCatalog {
    /// Deserialize a map of overrides on top of the default catalog.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = <HashMap<String, String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(MessageCatalog::default().with_templates(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_templates() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.render("str?", &[], &json!(1)), "must be a string");
        assert_eq!(catalog.render("int?", &[], &json!("1")), "must be an integer");
        assert_eq!(catalog.render("filled?", &[], &json!("")), "must be filled");
        assert_eq!(catalog.missing(), "is missing");
        assert_eq!(
            catalog.render("eql?", &[json!("scale")], &json!("question")),
            "must be equal to scale"
        );
        assert_eq!(
            catalog.render("min_size?", &[json!(1)], &json!([])),
            "size cannot be less than 1"
        );
    }

    #[test]
    fn test_unknown_template_falls_back() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.render("uuid?", &[], &json!("x")), "is invalid");
        assert_eq!(MessageCatalog::empty().missing(), "is invalid");
    }

    #[test]
    fn test_interpolate_input_and_unmatched_tokens() {
        assert_eq!(
            interpolate("%{input} vs %{0} and %{1}", &[json!(3)], &json!("x")),
            "x vs 3 and %{1}"
        );
        assert_eq!(interpolate("broken %{0", &[json!(3)], &json!(1)), "broken %{0");
        assert_eq!(interpolate("%{name}", &[], &json!(1)), "%{name}");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("a")), "a");
        assert_eq!(display_value(&json!([1, "b", null])), "1, b, null");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_with_templates_or_key() {
        let catalog = MessageCatalog::default()
            .with_templates([("or", "oder"), ("str?", "muss ein String sein")]);
        assert_eq!(catalog.or_joiner(), "oder");
        assert_eq!(catalog.template("str?"), Some("muss ein String sein"));
        assert_eq!(catalog.template("or"), None);
        assert_eq!(
            catalog.join_alternatives(&["a".to_string(), "b".to_string()]),
            "a oder b"
        );
    }

    #[test]
    fn test_join_single_message() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.join_alternatives(&["only".to_string()]), "only");
    }
}
