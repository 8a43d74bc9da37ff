//! Required-family validators: required, required_if, required_with, present, filled

use serde_json::Value;

use crate::traits::{is_empty_value, scalar_text, Fail, Rule, RuleContext};

/// Ensures a field is present and not empty.
///
/// Fails for absent fields, `null`, blank strings and empty arrays/objects.
/// Numbers and booleans are never empty, `0` and `false` included.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator;

impl RequiredValidator {
    /// Create a new required validator
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RequiredValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        if is_empty_value(value) {
            fail.add("validation.required");
        }
    }

    fn name(&self) -> &str {
        "required"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// `required_if:other,value1,value2` - required when another field holds one
/// of the listed values.
#[derive(Debug, Clone)]
pub struct RequiredIfValidator {
    other: String,
    values: Vec<String>,
}

impl RequiredIfValidator {
    /// Required when `other` equals one of `values`
    pub fn new<I, S>(other: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            other: other.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for RequiredIfValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        let triggered = ctx
            .get(&self.other)
            .and_then(scalar_text)
            .is_some_and(|other| self.values.contains(&other));

        if triggered && is_empty_value(value) {
            fail.add("validation.required_if")
                .with("other", &self.other)
                .with("value", self.values.join(", "));
        }
    }

    fn name(&self) -> &str {
        "required_if"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// `required_with:a,b` - required when any of the listed fields is filled.
#[derive(Debug, Clone)]
pub struct RequiredWithValidator {
    others: Vec<String>,
}

impl RequiredWithValidator {
    /// Required when any of `others` is present
    pub fn new<I, S>(others: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            others: others.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for RequiredWithValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        let triggered = self
            .others
            .iter()
            .any(|other| !is_empty_value(ctx.get(other)));

        if triggered && is_empty_value(value) {
            fail.add("validation.required_with")
                .with("values", self.others.join(" / "));
        }
    }

    fn name(&self) -> &str {
        "required_with"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// The field must exist in the input, empty values allowed.
#[derive(Debug, Clone, Default)]
pub struct PresentValidator;

impl Rule for PresentValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        if value.is_none() {
            fail.add("validation.present");
        }
    }

    fn name(&self) -> &str {
        "present"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// The field may be absent, but must not be empty when present.
#[derive(Debug, Clone, Default)]
pub struct FilledValidator;

impl Rule for FilledValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        if value.is_some() && is_empty_value(value) {
            fail.add("validation.filled");
        }
    }

    fn name(&self) -> &str {
        "filled"
    }

    fn is_implicit(&self) -> bool {
        true
    }
}
