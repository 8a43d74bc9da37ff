//! # elif-validator
//!
//! Declarative input validation for the elif framework. Rules are declared per
//! field path, either as pipe strings (`"required|email|max:100"`) or as lists
//! mixing names, rule objects and closures. A run produces an ordered error bag
//! with localized messages, or the validated subset of the input.
//!
//! ```
//! use elif_validator::{Factory, RuleSet};
//! use serde_json::json;
//!
//! let factory = Factory::new();
//! let data = json!({"username": "admin", "password": ""});
//! let rules = RuleSet::new()
//!     .field("username", "required")
//!     .field("password", "required");
//!
//! let result = factory.make(&data, rules).unwrap().run();
//! assert!(!result.passed);
//! assert_eq!(result.errors.first("password"), Some("The password field is required."));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod lang;
pub mod messages;
pub mod rules;
pub mod traits;
pub mod validator;
pub mod validators;

// Re-exports for easy access
pub use config::{ConfigError, ValidatorConfig};
pub use document::{FieldPath, InputDocument};
pub use error::{ErrorBag, RuleError, ValidationFailed, ValidationResult};
pub use messages::Translator;
pub use rules::{rule_fn, RuleRegistry, RuleSet, RuleSpec, RuleToken};
pub use traits::{Fail, Failure, Rule, RuleContext, ValidationOutcome};
pub use validator::{validate, AfterHook, Factory, Validator};

// Built-in validators
pub use validators::{
    ClosureRule, ConfirmedValidator, DifferentValidator, EmailValidator, In, NotIn, Password,
    PatternValidator, RequiredValidator, SameValidator, SizeValidator, TypeValidator,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_imports() {
        let rules = RuleSet::new().field("username", "required|email");
        let result = validate(&json!({"username": "admin@email.id"}), rules).unwrap();

        assert!(result.passed);
        assert!(ErrorBag::new().is_empty());
    }
}
