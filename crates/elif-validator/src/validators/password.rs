//! Composable password policy

use serde_json::Value;

use crate::traits::{Fail, Rule, RuleContext};

/// Password policy built fluently:
///
/// ```
/// use elif_validator::Password;
///
/// let policy = Password::min(6).letters().numbers().symbols();
/// assert!(policy.check("admin123@email.id").is_empty());
/// ```
///
/// Every unmet requirement produces its own failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password {
    min: usize,
    max: Option<usize>,
    letters: bool,
    mixed_case: bool,
    numbers: bool,
    symbols: bool,
}

/// A single unmet password requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRequirement {
    Min(usize),
    Max(usize),
    Letters,
    MixedCase,
    Numbers,
    Symbols,
}

impl PasswordRequirement {
    fn key(&self) -> &'static str {
        match self {
            PasswordRequirement::Min(_) => "validation.min.string",
            PasswordRequirement::Max(_) => "validation.max.string",
            PasswordRequirement::Letters => "validation.password.letters",
            PasswordRequirement::MixedCase => "validation.password.mixed",
            PasswordRequirement::Numbers => "validation.password.numbers",
            PasswordRequirement::Symbols => "validation.password.symbols",
        }
    }
}

impl Password {
    /// Start a policy with a minimum length
    pub fn min(min: usize) -> Self {
        Self {
            min,
            max: None,
            letters: false,
            mixed_case: false,
            numbers: false,
            symbols: false,
        }
    }

    /// Policy used by the bare `password` rule token
    pub fn defaults() -> Self {
        Self::min(8)
    }

    /// Set a maximum length
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Require at least one letter
    pub fn letters(mut self) -> Self {
        self.letters = true;
        self
    }

    /// Require at least one uppercase and one lowercase letter
    pub fn mixed_case(mut self) -> Self {
        self.mixed_case = true;
        self
    }

    /// Require at least one digit
    pub fn numbers(mut self) -> Self {
        self.numbers = true;
        self
    }

    /// Require at least one symbol (punctuation, symbol or separator)
    pub fn symbols(mut self) -> Self {
        self.symbols = true;
        self
    }

    /// Unmet requirements for a candidate password
    pub fn check(&self, password: &str) -> Vec<PasswordRequirement> {
        let mut unmet = Vec::new();
        let length = password.chars().count();

        if length < self.min {
            unmet.push(PasswordRequirement::Min(self.min));
        }
        if let Some(max) = self.max.filter(|max| length > *max) {
            unmet.push(PasswordRequirement::Max(max));
        }
        if self.letters && !password.chars().any(char::is_alphabetic) {
            unmet.push(PasswordRequirement::Letters);
        }
        if self.mixed_case
            && !(password.chars().any(char::is_uppercase) && password.chars().any(char::is_lowercase))
        {
            unmet.push(PasswordRequirement::MixedCase);
        }
        if self.numbers && !password.chars().any(char::is_numeric) {
            unmet.push(PasswordRequirement::Numbers);
        }
        if self.symbols && !password.chars().any(|c| !c.is_alphanumeric()) {
            unmet.push(PasswordRequirement::Symbols);
        }

        unmet
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Rule for Password {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        let Some(password) = value.and_then(Value::as_str) else {
            fail.add("validation.string");
            return;
        };

        for requirement in self.check(password) {
            let failure = fail.add(requirement.key());
            match requirement {
                PasswordRequirement::Min(min) => {
                    failure.with("min", min);
                }
                PasswordRequirement::Max(max) => {
                    failure.with("max", max);
                }
                _ => {}
            }
        }
    }

    fn name(&self) -> &str {
        "password"
    }
}
