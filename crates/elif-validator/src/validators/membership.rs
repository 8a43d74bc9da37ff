//! Set membership validators: in and not_in

use serde_json::Value;

use crate::traits::{scalar_text, Fail, Rule, RuleContext};

/// The value must be one of a fixed set (exact match).
///
/// Numbers and booleans are compared through their text form, so `in:1,2`
/// accepts both `1` and `"1"`. For arrays every element must be in the set.
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    values: Vec<String>,
}

impl In {
    /// Create a validator accepting only `values`
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Allowed values
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

fn contains(values: &[String], value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(|item| contains(values, item)),
        other => scalar_text(other).is_some_and(|text| values.contains(&text)),
    }
}

impl Rule for In {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        if !value.is_some_and(|value| contains(&self.values, value)) {
            fail.add("validation.in").with("values", self.values.join(", "));
        }
    }

    fn name(&self) -> &str {
        "in"
    }
}

/// The value must not be one of a fixed set.
#[derive(Debug, Clone, PartialEq)]
pub struct NotIn {
    values: Vec<String>,
}

impl NotIn {
    /// Create a validator rejecting `values`
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for NotIn {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        let forbidden = match value {
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| scalar_text(item).is_some_and(|text| self.values.contains(&text))),
            Some(other) => scalar_text(other).is_some_and(|text| self.values.contains(&text)),
            None => false,
        };

        if forbidden {
            fail.add("validation.not_in").with("values", self.values.join(", "));
        }
    }

    fn name(&self) -> &str {
        "not_in"
    }
}
