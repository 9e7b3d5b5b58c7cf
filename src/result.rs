//! Outcome of validating one input

use serde_json::Value;

use crate::error_tree::{ErrorMessage, ErrorTree, Synthesizer};
use crate::evaluator::Outcome;
use crate::messages::MessageCatalog;

/// Success flag plus the error tree of one schema call.
///
/// The error tree is empty exactly when validation succeeded.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use weir::rule::{pred, FieldSet};
/// use weir::Schema;
///
/// let schema = Schema::new(
///     FieldSet::builder().required("foo", pred("str?") | pred("int?")).build().unwrap(),
/// )
/// .unwrap();
///
/// let result = schema.call(&json!({"foo": []})).unwrap();
/// assert!(result.is_failure());
/// assert_eq!(result.to_json(), json!({"foo": ["must be a string or must be an integer"]}));
/// assert_eq!(result.messages()[0].to_string(), "foo must be a string or must be an integer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    errors: ErrorTree,
}

impl ValidationResult {
    /// A successful result.
    pub fn success() -> Self {
        Self::default()
    }

    /// A result carrying `errors`.
    pub fn failure(errors: ErrorTree) -> Self {
        Self { errors }
    }

    /// Build a result from an evaluation outcome.
    pub fn from_outcome(outcome: &Outcome, catalog: &MessageCatalog) -> Self {
        match outcome.failure() {
            None => Self::success(),
            Some(failure) => Self::failure(Synthesizer::new(catalog).synthesize(failure)),
        }
    }

    /// Check if the input satisfied the schema.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if the input violated the schema.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The error tree (empty on success).
    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Consume into the error tree.
    pub fn into_errors(self) -> ErrorTree {
        self.errors
    }

    /// Every message with its path.
    pub fn messages(&self) -> Vec<ErrorMessage> {
        self.errors.flatten()
    }

    /// The error tree as JSON (`{}` on success).
    pub fn to_json(&self) -> Value {
        self.errors.to_json()
    }

    /// Convert to a `Result`, failing with the error tree.
    pub fn into_result(self) -> Result<(), ErrorTree> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Failure;
    use crate::error_tree::ErrorKey;
    use serde_json::json;

    #[test]
    fn test_success() {
        let result = ValidationResult::from_outcome(&Outcome::Success, &MessageCatalog::default());
        assert!(result.is_success());
        assert_eq!(result.errors(), &ErrorTree::empty());
        assert_eq!(result.to_json(), json!({}));
        assert_eq!(result.into_result(), Ok(()));
    }

    #[test]
    fn test_failure() {
        let outcome =
            Outcome::Failure(Failure::Fields(vec![("name".to_string(), Failure::Missing)]));
        let result = ValidationResult::from_outcome(&outcome, &MessageCatalog::default());

        assert!(result.is_failure());
        assert_eq!(result.to_json(), json!({"name": ["is missing"]}));
        assert_eq!(
            result.clone().into_result(),
            Err(ErrorTree::Map(vec![(ErrorKey::from("name"), ErrorTree::message("is missing"))]))
        );
        assert_eq!(result.messages()[0].dotted_path(), "name");
    }
}
