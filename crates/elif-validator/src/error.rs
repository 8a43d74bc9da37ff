//! Validation error types: configuration errors, the error bag and run results

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while building a validator from a rule set.
///
/// These indicate a programming mistake, not bad input, and are raised by
/// [`Factory::make`](crate::Factory::make) before any field is evaluated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleError {
    #[error("Malformed field path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Empty rule token in '{spec}'")]
    EmptyRule { spec: String },

    #[error("Unknown validation rule '{name}'")]
    UnknownRule { name: String },

    #[error("Rule '{rule}' expects {expected} parameter(s), got {actual}")]
    InvalidArity {
        rule: String,
        expected: String,
        actual: usize,
    },

    #[error("Invalid parameter '{value}' for rule '{rule}': {reason}")]
    InvalidParameter {
        rule: String,
        value: String,
        reason: String,
    },
}

impl RuleError {
    /// Create a malformed path error
    pub fn malformed_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown rule error
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Create an arity error
    pub fn invalid_arity(rule: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        Self::InvalidArity {
            rule: rule.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        rule: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            rule: rule.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status an outer layer should answer with
    pub fn status(&self) -> u16 {
        500
    }
}

/// Ordered multi-map from field path to its failure messages.
///
/// Fields keep the order in which they first failed; messages keep the order
/// in which they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBag {
    entries: Vec<(String, Vec<String>)>,
}

impl ErrorBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    /// First message recorded for a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// Whether a field has any messages
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// Fields with at least one message, in failure order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Every message, field by field
    pub fn all(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
            .collect()
    }

    /// Fields with their messages, in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all fields
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    /// Merge another bag into this one
    pub fn merge(&mut self, other: ErrorBag) {
        for (field, messages) in other.entries {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
    }

    /// JSON object `{ field: [message, ...] }`
    pub fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(field, messages)| {
                let messages = messages.iter().cloned().map(Value::String).collect();
                (field.clone(), Value::Array(messages))
            })
            .collect::<serde_json::Map<String, Value>>();
        Value::Object(map)
    }

    /// Pretty-printed JSON text, field order preserved
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for ErrorBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BagVisitor;

        impl<'de> Visitor<'de> for BagVisitor {
            type Value = ErrorBag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to message lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ErrorBag, A::Error> {
                let mut bag = ErrorBag::new();
                while let Some((field, messages)) = access.next_entry::<String, Vec<String>>()? {
                    for message in messages {
                        bag.add(field.clone(), message);
                    }
                }
                Ok(bag)
            }
        }

        deserializer.deserialize_map(BagVisitor)
    }
}

impl fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.entries.len())?;
            for (field, messages) in &self.entries {
                for message in messages {
                    write!(f, "\n  {}: {}", field, message)?;
                }
            }
            Ok(())
        }
    }
}

/// Raised by the fail-fast [`Validator::validate`](crate::Validator::validate).
#[derive(Debug, Clone, Error, PartialEq)]
#[error("The given data was invalid. {errors}")]
pub struct ValidationFailed {
    pub errors: ErrorBag,
}

impl ValidationFailed {
    /// Wrap an error bag
    pub fn new(errors: ErrorBag) -> Self {
        Self { errors }
    }

    /// Errors that caused the failure
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    /// HTTP status an outer layer should answer with
    pub fn status(&self) -> u16 {
        422
    }

    /// Response body in the shape the framework's error responses use
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "message": "The given data was invalid.",
            "errors": self.errors.to_json(),
        })
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub errors: ErrorBag,
    /// Ruled subset of the input; only set when the run passed
    pub validated_data: Option<Value>,
}

impl ValidationResult {
    /// Whether the run failed
    pub fn failed(&self) -> bool {
        !self.passed
    }

    /// Convert into the fail-fast form
    pub fn into_result(self) -> Result<Value, ValidationFailed> {
        match self.validated_data {
            Some(data) if self.passed => Ok(data),
            _ => Err(ValidationFailed::new(self.errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_bag_collects_in_order() {
        let mut errors = ErrorBag::new();

        errors.add("username", "The username field is required.");
        errors.add("password", "The password field is required.");
        errors.add("username", "The username field must be a valid email address.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.total(), 3);
        assert!(errors.has("username"));
        assert!(!errors.has("email"));
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["username", "password"]);
        assert_eq!(errors.first("username"), Some("The username field is required."));
        assert_eq!(errors.get("username").len(), 2);
        assert!(errors.get("missing").is_empty());
    }

    #[test]
    fn test_error_bag_json_keeps_field_order() {
        let mut errors = ErrorBag::new();
        errors.add("zeta", "z");
        errors.add("alpha", "a");

        let text = serde_json::to_string(&errors).unwrap();
        assert_eq!(text, r#"{"zeta":["z"],"alpha":["a"]}"#);

        let back: ErrorBag = serde_json::from_str(&text).unwrap();
        assert_eq!(back, errors);
    }

    #[test]
    fn test_error_bag_merge() {
        let mut first = ErrorBag::new();
        first.add("field1", "Error 1");

        let mut second = ErrorBag::new();
        second.add("field2", "Error 2");
        second.add("field1", "Error 3");

        first.merge(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.total(), 3);
        assert_eq!(first.get("field1"), ["Error 1", "Error 3"]);
    }

    #[test]
    fn test_validation_failed_status_and_body() {
        let mut errors = ErrorBag::new();
        errors.add("username", "The username field is required.");
        let failure = ValidationFailed::new(errors);

        assert_eq!(failure.status(), 422);
        assert_eq!(
            failure.to_json()["errors"]["username"][0],
            "The username field is required."
        );
        assert_eq!(RuleError::unknown_rule("foo").status(), 500);
    }

    #[test]
    fn test_result_into_result() {
        let passed = ValidationResult {
            passed: true,
            errors: ErrorBag::new(),
            validated_data: Some(serde_json::json!({"a": 1})),
        };
        assert_eq!(passed.into_result().unwrap(), serde_json::json!({"a": 1}));

        let mut errors = ErrorBag::new();
        errors.add("a", "bad");
        let failed = ValidationResult {
            passed: false,
            errors: errors.clone(),
            validated_data: None,
        };
        assert!(failed.failed());
        assert_eq!(failed.into_result().unwrap_err().errors, errors);
    }
}
