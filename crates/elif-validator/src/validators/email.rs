//! Email format validator

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::traits::{Fail, Rule, RuleContext};

// ASCII-only, no consecutive dots at the edges, TLD of two letters or more
static ASCII_WITH_TLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$")
        .expect("static email pattern compiles")
});

static ASCII_NO_TLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?$")
        .expect("static email pattern compiles")
});

static UNICODE_WITH_TLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@.]+[^\s@]*@[^\s@.]+[^\s@]*\.[^\s@]+$").expect("static email pattern compiles")
});

static UNICODE_NO_TLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@.]+[^\s@]*@[^\s@.]+[^\s@]*$").expect("static email pattern compiles")
});

/// Validator for email address format
#[derive(Debug, Clone)]
pub struct EmailValidator {
    /// Allow international domain names
    pub allow_unicode: bool,
    /// Require top-level domain (e.g., .com, .org)
    pub require_tld: bool,
}

impl EmailValidator {
    /// Create a new email validator with default settings
    pub fn new() -> Self {
        Self {
            allow_unicode: false,
            require_tld: true,
        }
    }

    /// Allow unicode characters in the address (internationalized domains)
    pub fn allow_unicode(mut self, allow: bool) -> Self {
        self.allow_unicode = allow;
        self
    }

    /// Require top-level domain (e.g., .com, .org)
    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        self
    }

    fn pattern(&self) -> &'static Regex {
        match (self.allow_unicode, self.require_tld) {
            (true, true) => Lazy::force(&UNICODE_WITH_TLD),
            (true, false) => Lazy::force(&UNICODE_NO_TLD),
            (false, true) => Lazy::force(&ASCII_WITH_TLD),
            (false, false) => Lazy::force(&ASCII_NO_TLD),
        }
    }

    /// Check an address against the configured syntax
    pub fn is_valid(&self, email: &str) -> bool {
        let Some((local_part, domain_part)) = email.split_once('@') else {
            return false;
        };

        if domain_part.contains('@') || local_part.is_empty() || domain_part.is_empty() {
            return false;
        }

        // RFC 5321 limits
        if local_part.len() > 64 || domain_part.len() > 255 {
            return false;
        }

        self.pattern().is_match(email)
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EmailValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        let valid = value
            .and_then(Value::as_str)
            .is_some_and(|email| self.is_valid(email));

        if !valid {
            fail.add("validation.email");
        }
    }

    fn name(&self) -> &str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::evaluate;
    use serde_json::json;

    fn passes(validator: &EmailValidator, value: Value) -> bool {
        let data = json!({});
        evaluate(validator, "email", Some(&value), &RuleContext::new(&data)).is_pass()
    }

    #[test]
    fn test_email_validator_valid_emails() {
        let validator = EmailValidator::new();

        let valid_emails = vec![
            "test@example.com",
            "user.name@domain.co.uk",
            "first+last@subdomain.example.org",
            "user123@test-domain.com",
            "admin@email.id",
            "a@b.co",
        ];

        for email in valid_emails {
            assert!(passes(&validator, json!(email)), "Email '{}' should be valid", email);
        }
    }

    #[test]
    fn test_email_validator_invalid_emails() {
        let validator = EmailValidator::new();

        let toolong_email = format!("toolong{}@domain.com", "a".repeat(60));
        let invalid_emails = vec![
            "",                   // Empty
            "admin",              // No @
            "wah",                // No @
            "@missingdomain.com", // No local part
            "missing@.com",       // No domain name
            "double@@domain.com", // Double @
            "spaces @domain.com", // Spaces
            &toolong_email,       // Local part too long
            "test@",              // No domain
            "test@domain",        // No TLD (when required)
        ];

        for email in invalid_emails {
            assert!(!passes(&validator, json!(email)), "Email '{}' should be invalid", email);
        }
    }

    #[test]
    fn test_email_validator_without_tld_requirement() {
        let validator = EmailValidator::new().require_tld(false);

        assert!(passes(&validator, json!("test@localhost")));
        assert!(passes(&validator, json!("admin@intranet")));
    }

    #[test]
    fn test_email_validator_unicode_domain() {
        let validator = EmailValidator::new().allow_unicode(true);

        assert!(passes(&validator, json!("test@тест.рф")));
        assert!(!passes(&EmailValidator::new(), json!("test@тест.рф")));
    }

    #[test]
    fn test_email_validator_non_string() {
        let validator = EmailValidator::new();

        assert!(!passes(&validator, json!(42)));
        assert!(!passes(&validator, Value::Null));
    }
}
