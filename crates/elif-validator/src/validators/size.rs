//! Size validators: min, max, between and size
//!
//! Strings are measured in characters, arrays and objects by item count and
//! numbers by value. Numeric strings are measured by value when the field also
//! carries a `numeric` or `integer` rule.

use serde_json::Value;

use crate::traits::{Fail, Rule, RuleContext};

/// A bound parsed from a rule parameter, keeping the text for messages
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub text: String,
}

impl Bound {
    /// Bound from a number, formatted without a trailing `.0`
    pub fn new(value: f64) -> Self {
        let text = if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            value.to_string()
        };
        Self { value, text }
    }

    /// Parse a rule parameter such as `100` or `2.5`
    pub fn parse(text: &str) -> Option<Self> {
        let value = text.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self {
            value,
            text: text.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Constraint {
    Min(Bound),
    Max(Bound),
    Between(Bound, Bound),
    Exact(Bound),
}

/// Validator for size constraints (inclusive)
#[derive(Debug, Clone, PartialEq)]
pub struct SizeValidator {
    constraint: Constraint,
}

impl SizeValidator {
    /// Create a minimum size validator
    pub fn min(min: impl Into<f64>) -> Self {
        Self::from_bound(Constraint::Min(Bound::new(min.into())))
    }

    /// Create a maximum size validator
    pub fn max(max: impl Into<f64>) -> Self {
        Self::from_bound(Constraint::Max(Bound::new(max.into())))
    }

    /// Create an inclusive range validator
    pub fn between(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self::from_bound(Constraint::Between(Bound::new(min.into()), Bound::new(max.into())))
    }

    /// Create an exact size validator
    pub fn exact(size: impl Into<f64>) -> Self {
        Self::from_bound(Constraint::Exact(Bound::new(size.into())))
    }

    pub(crate) fn min_bound(bound: Bound) -> Self {
        Self::from_bound(Constraint::Min(bound))
    }

    pub(crate) fn max_bound(bound: Bound) -> Self {
        Self::from_bound(Constraint::Max(bound))
    }

    pub(crate) fn between_bounds(min: Bound, max: Bound) -> Self {
        Self::from_bound(Constraint::Between(min, max))
    }

    pub(crate) fn exact_bound(bound: Bound) -> Self {
        Self::from_bound(Constraint::Exact(bound))
    }

    fn from_bound(constraint: Constraint) -> Self {
        Self { constraint }
    }
}

/// Measure a value; returns the size and the message suffix for its kind
pub fn measure(value: &Value, numeric: bool) -> Option<(f64, &'static str)> {
    match value {
        Value::Number(n) => n.as_f64().map(|n| (n, "numeric")),
        Value::String(s) if numeric => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some((n, "numeric")),
            _ => Some((s.chars().count() as f64, "string")),
        },
        Value::String(s) => Some((s.chars().count() as f64, "string")),
        Value::Array(items) => Some((items.len() as f64, "array")),
        Value::Object(map) => Some((map.len() as f64, "array")),
        Value::Null | Value::Bool(_) => None,
    }
}

impl Rule for SizeValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        let Some(value) = value else {
            return;
        };

        let (size, kind) = measure(value, ctx.is_numeric()).unwrap_or((f64::NAN, "string"));
        let name = self.name();
        let key = format!("validation.{}.{}", name, kind);

        // NaN never satisfies a comparison, so unmeasurable values fail
        match &self.constraint {
            Constraint::Min(min) => {
                if !(size >= min.value) {
                    fail.add(key).with("min", &min.text);
                }
            }
            Constraint::Max(max) => {
                if !(size <= max.value) {
                    fail.add(key).with("max", &max.text);
                }
            }
            Constraint::Between(min, max) => {
                if !(size >= min.value && size <= max.value) {
                    fail.add(key).with("min", &min.text).with("max", &max.text);
                }
            }
            Constraint::Exact(exact) => {
                if size != exact.value {
                    fail.add(key).with("size", &exact.text);
                }
            }
        }
    }

    fn name(&self) -> &str {
        match self.constraint {
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::Between(..) => "between",
            Constraint::Exact(_) => "size",
        }
    }
}
