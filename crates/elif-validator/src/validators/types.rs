//! Type and shape validators

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use uuid::Uuid;

use crate::traits::{Fail, Rule, RuleContext};

/// Checks on the type or character shape of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeValidator {
    /// A number, or a string that parses as a finite number
    Numeric,
    /// An integral number, or a string that parses as one
    Integer,
    String,
    /// `true`, `false`, `0`, `1`, `"0"` or `"1"`
    Boolean,
    Alpha,
    AlphaNum,
    Uppercase,
    Lowercase,
    /// RFC 3339 timestamp, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    Date,
    Uuid,
}

impl TypeValidator {
    /// Check a value against this type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeValidator::Numeric => match value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
                _ => false,
            },
            TypeValidator::Integer => match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                Value::String(s) => s.trim().parse::<i64>().is_ok(),
                _ => false,
            },
            TypeValidator::String => value.is_string(),
            TypeValidator::Boolean => match value {
                Value::Bool(_) => true,
                Value::Number(n) => matches!(n.as_i64(), Some(0 | 1)),
                Value::String(s) => matches!(s.as_str(), "0" | "1"),
                _ => false,
            },
            TypeValidator::Alpha => text(value)
                .is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphabetic)),
            TypeValidator::AlphaNum => text(value)
                .is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphanumeric)),
            TypeValidator::Uppercase => text(value).is_some_and(|s| s == s.to_uppercase()),
            TypeValidator::Lowercase => text(value).is_some_and(|s| s == s.to_lowercase()),
            TypeValidator::Date => text(value).is_some_and(is_date),
            TypeValidator::Uuid => text(value).is_some_and(|s| Uuid::parse_str(s).is_ok()),
        }
    }
}

fn text(value: &Value) -> Option<&str> {
    value.as_str()
}

fn is_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

impl Rule for TypeValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        if !value.is_some_and(|value| self.matches(value)) {
            fail.add(format!("validation.{}", self.name()));
        }
    }

    fn name(&self) -> &str {
        match self {
            TypeValidator::Numeric => "numeric",
            TypeValidator::Integer => "integer",
            TypeValidator::String => "string",
            TypeValidator::Boolean => "boolean",
            TypeValidator::Alpha => "alpha",
            TypeValidator::AlphaNum => "alpha_num",
            TypeValidator::Uppercase => "uppercase",
            TypeValidator::Lowercase => "lowercase",
            TypeValidator::Date => "date",
            TypeValidator::Uuid => "uuid",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, TypeValidator::Numeric | TypeValidator::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_integer() {
        assert!(TypeValidator::Numeric.matches(&json!(12.5)));
        assert!(TypeValidator::Numeric.matches(&json!("12.5")));
        assert!(!TypeValidator::Numeric.matches(&json!("twelve")));
        assert!(!TypeValidator::Numeric.matches(&json!("NaN")));

        assert!(TypeValidator::Integer.matches(&json!(42)));
        assert!(TypeValidator::Integer.matches(&json!("42")));
        assert!(!TypeValidator::Integer.matches(&json!(10.5)));
        assert!(!TypeValidator::Integer.matches(&json!("10.5")));
        assert!(TypeValidator::Integer.is_numeric());
        assert!(!TypeValidator::String.is_numeric());
    }

    #[test]
    fn test_boolean_and_string() {
        assert!(TypeValidator::Boolean.matches(&json!(false)));
        assert!(TypeValidator::Boolean.matches(&json!(1)));
        assert!(TypeValidator::Boolean.matches(&json!("0")));
        assert!(!TypeValidator::Boolean.matches(&json!("yes")));

        assert!(TypeValidator::String.matches(&json!("admin")));
        assert!(!TypeValidator::String.matches(&json!(1)));
    }

    #[test]
    fn test_character_classes() {
        assert!(TypeValidator::Alpha.matches(&json!("wahyudi")));
        assert!(!TypeValidator::Alpha.matches(&json!("wahyudi1")));
        assert!(TypeValidator::AlphaNum.matches(&json!("admin123")));
        assert!(!TypeValidator::AlphaNum.matches(&json!("admin@email.id")));

        assert!(TypeValidator::Uppercase.matches(&json!("ADMIN@EMAIL.ID")));
        assert!(!TypeValidator::Uppercase.matches(&json!("admin@email.id")));
        assert!(TypeValidator::Lowercase.matches(&json!("admin@email.id")));
    }

    #[test]
    fn test_date_and_uuid() {
        assert!(TypeValidator::Date.matches(&json!("2024-02-29")));
        assert!(TypeValidator::Date.matches(&json!("2024-02-29T10:00:00+07:00")));
        assert!(TypeValidator::Date.matches(&json!("2024-02-29 10:00:00")));
        assert!(!TypeValidator::Date.matches(&json!("2023-02-29")));
        assert!(!TypeValidator::Date.matches(&json!("yesterday")));

        assert!(TypeValidator::Uuid.matches(&json!("67e55044-10b1-426f-9247-bb680e5fe0c8")));
        assert!(!TypeValidator::Uuid.matches(&json!("not-a-uuid")));
    }
}
