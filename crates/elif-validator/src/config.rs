//! Validator configuration loaded from the environment

use std::env;

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired { field: String, hint: String },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    /// Create a missing required field error
    pub fn missing_required(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Settings shared by every validator a factory creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Active locale for messages
    pub locale: String,
    /// Locale consulted when the active one has no line for a key
    pub fallback_locale: String,
    /// Stop evaluating further fields once one field has failed
    pub stop_on_first_failure: bool,
}

impl ValidatorConfig {
    pub const LOCALE_VAR: &'static str = "ELIF_LOCALE";
    pub const FALLBACK_LOCALE_VAR: &'static str = "ELIF_FALLBACK_LOCALE";
    pub const STOP_ON_FIRST_FAILURE_VAR: &'static str = "ELIF_VALIDATION_STOP_ON_FIRST_FAILURE";

    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            locale: "en".to_string(),
            fallback_locale: "en".to_string(),
            stop_on_first_failure: false,
        }
    }

    /// Load configuration from environment variables, defaulting unset ones
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(locale) = env::var(Self::LOCALE_VAR) {
            config.locale = locale.trim().to_string();
        }
        if let Ok(fallback) = env::var(Self::FALLBACK_LOCALE_VAR) {
            config.fallback_locale = fallback.trim().to_string();
        }
        if let Ok(raw) = env::var(Self::STOP_ON_FIRST_FAILURE_VAR) {
            config.stop_on_first_failure = parse_bool(Self::STOP_ON_FIRST_FAILURE_VAR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the active locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the fallback locale
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Set whether evaluation stops after the first failed field
    pub fn stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_locale("locale", &self.locale)?;
        validate_locale("fallback_locale", &self.fallback_locale)?;
        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_locale(field: &str, locale: &str) -> Result<(), ConfigError> {
    if locale.is_empty() {
        return Err(ConfigError::missing_required(
            field,
            "Set a locale tag such as 'en' or 'id'",
        ));
    }

    let valid = locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ConfigError::invalid_value(
            field,
            locale,
            "a locale tag made of letters, digits, '-' or '_'",
        ));
    }

    Ok(())
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, raw, "true or false")),
    }
}
