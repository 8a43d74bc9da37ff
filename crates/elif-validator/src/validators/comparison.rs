//! Cross-field validators: same, different and confirmed

use serde_json::Value;

use crate::traits::{Fail, Rule, RuleContext};

/// The value must equal another field's value
#[derive(Debug, Clone)]
pub struct SameValidator {
    other: String,
}

impl SameValidator {
    /// Field must equal `other`
    pub fn new(other: impl Into<String>) -> Self {
        Self { other: other.into() }
    }
}

impl Rule for SameValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        if value != ctx.get(&self.other) {
            fail.add("validation.same").with("other", &self.other);
        }
    }

    fn name(&self) -> &str {
        "same"
    }
}

/// The value must differ from another field's value; passes when the other
/// field is absent.
#[derive(Debug, Clone)]
pub struct DifferentValidator {
    other: String,
}

impl DifferentValidator {
    /// Field must differ from `other`
    pub fn new(other: impl Into<String>) -> Self {
        Self { other: other.into() }
    }
}

impl Rule for DifferentValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        if let Some(other) = ctx.get(&self.other) {
            if value == Some(other) {
                fail.add("validation.different").with("other", &self.other);
            }
        }
    }

    fn name(&self) -> &str {
        "different"
    }
}

/// `password` must be matched by `password_confirmation`
#[derive(Debug, Clone, Default)]
pub struct ConfirmedValidator;

impl Rule for ConfirmedValidator {
    fn validate(&self, attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        let confirmation = ctx.get(&format!("{}_confirmation", attribute));
        if value != confirmation {
            fail.add("validation.confirmed");
        }
    }

    fn name(&self) -> &str {
        "confirmed"
    }
}
