//! Core validation traits for the elif framework

use serde_json::Value;

use crate::document;

/// A single composable check applied to one field's value.
///
/// `value` is `None` when the field is absent from the input. A rule reports
/// failure by calling [`Fail::add`] zero or more times.
pub trait Rule: Send + Sync {
    /// Check a value and record failures
    fn validate(&self, attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>);

    /// Rule name used for message lookup (`validation.<name>`)
    fn name(&self) -> &str;

    /// Implicit rules run on absent and empty values, and a failure stops the
    /// remaining rules of the field.
    fn is_implicit(&self) -> bool {
        false
    }

    /// Marks the field as numeric so size rules compare values, not lengths
    fn is_numeric(&self) -> bool {
        false
    }
}

/// Read access to the whole document while a field is being checked.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    data: &'a Value,
    numeric: bool,
}

impl<'a> RuleContext<'a> {
    /// Context over the whole input document
    pub fn new(data: &'a Value) -> Self {
        Self { data, numeric: false }
    }

    /// Mark the field as numeric
    pub fn with_numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }

    /// The whole input document
    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// Look up another field by dot path
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        document::get(self.data, path)
    }

    /// Whether the field under validation carries a numeric type rule
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

/// One recorded failure: a message key (or a literal message) plus named
/// parameters substituted into the template.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub rule: String,
    pub key: String,
    pub params: Vec<(String, String)>,
}

impl Failure {
    /// Attach a named parameter, replacing `:name` in the message
    pub fn with(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        let name = name.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Value of a named parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Failure collector handed to every rule.
#[derive(Debug)]
pub struct Fail {
    rule: String,
    failures: Vec<Failure>,
}

impl Fail {
    /// Collector for failures of the named rule
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            failures: Vec::new(),
        }
    }

    /// Record a failure. `key` is a translation key such as
    /// `validation.custom.uppercase` or a literal message.
    pub fn add(&mut self, key: impl Into<String>) -> &mut Failure {
        self.failures.push(Failure {
            rule: self.rule.clone(),
            key: key.into(),
            params: Vec::new(),
        });
        let last = self.failures.len() - 1;
        &mut self.failures[last]
    }

    /// Whether any failure was recorded
    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Finish collecting
    pub fn into_outcome(self) -> ValidationOutcome {
        if self.failures.is_empty() {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::Fail(self.failures)
        }
    }
}

/// Result of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Pass,
    Fail(Vec<Failure>),
}

impl ValidationOutcome {
    /// Check if the rule passed
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationOutcome::Pass)
    }

    /// Recorded failures; empty on pass
    pub fn failures(&self) -> &[Failure] {
        match self {
            ValidationOutcome::Pass => &[],
            ValidationOutcome::Fail(failures) => failures,
        }
    }
}

/// Run a single rule and collect its outcome
pub fn evaluate(
    rule: &dyn Rule,
    attribute: &str,
    value: Option<&Value>,
    ctx: &RuleContext<'_>,
) -> ValidationOutcome {
    let mut fail = Fail::new(rule.name());
    rule.validate(attribute, value, &mut fail, ctx);
    fail.into_outcome()
}

/// Whether a value counts as empty for the required family of rules
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// Text form of a scalar for membership and comparison checks
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
