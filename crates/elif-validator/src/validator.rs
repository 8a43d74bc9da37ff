//! Validation engine: the caller-owned factory and per-input validators

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::config::{ConfigError, ValidatorConfig};
use crate::document::FieldPath;
use crate::error::{ErrorBag, RuleError, ValidationFailed, ValidationResult};
use crate::messages::{replace_placeholders, Translator};
use crate::rules::{arity, ResolvedSpec, RuleRegistry, RuleSet};
use crate::traits::{evaluate, Failure, Rule, RuleContext, ValidationOutcome};

/// Post-validation hook with write access to the working document and errors
pub type AfterHook = Arc<dyn Fn(&mut Value, &mut ErrorBag) + Send + Sync>;

static DEFAULT_FACTORY: Lazy<Factory> = Lazy::new(Factory::new);

/// Validate with the default factory (English messages, built-in rules)
pub fn validate(data: &Value, rules: impl Into<RuleSet>) -> Result<ValidationResult, RuleError> {
    Ok(DEFAULT_FACTORY.make(data, rules)?.run())
}

/// Owns everything validators share: messages, named rules and the active
/// locale. Changing the locale needs `&mut self`, so it cannot happen while a
/// validator borrowed from this factory is alive.
#[derive(Debug, Clone)]
pub struct Factory {
    translator: Translator,
    registry: RuleRegistry,
    config: ValidatorConfig,
}

impl Factory {
    /// Factory with built-in rules, `en`/`id` messages and default config
    pub fn new() -> Self {
        Self {
            translator: Translator::with_defaults(),
            registry: RuleRegistry::with_builtins(),
            config: ValidatorConfig::default(),
        }
    }

    /// Factory from an explicit configuration, validated first
    pub fn with_config(config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut factory = Self::new();
        factory.warn_on_missing_locale(&config.locale);
        factory.config = config;
        Ok(factory)
    }

    /// Factory configured from `ELIF_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_config(ValidatorConfig::from_env()?)
    }

    /// Active locale
    pub fn locale(&self) -> &str {
        &self.config.locale
    }

    /// Change the active locale for validators made afterwards
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.warn_on_missing_locale(&locale);
        tracing::debug!("Validation locale set to '{}'", locale);
        self.config.locale = locale;
    }

    /// Locale consulted when the active one lacks a line
    pub fn fallback_locale(&self) -> &str {
        &self.config.fallback_locale
    }

    /// Change the fallback locale
    pub fn set_fallback_locale(&mut self, locale: impl Into<String>) {
        self.config.fallback_locale = locale.into();
    }

    /// Current configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Message tables
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Mutable message tables, for adding lines at runtime
    pub fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    /// Named rules available to the string syntax
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Register a parameterized named rule usable from the string syntax
    pub fn extend<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&[String]) -> Result<Arc<dyn Rule>, RuleError> + Send + Sync + 'static,
    {
        self.registry.register(name, constructor);
    }

    /// Register a rule object under a name; the token takes no parameters
    pub fn extend_rule(&mut self, name: impl Into<String>, rule: impl Rule + 'static) {
        let name = name.into();
        let rule: Arc<dyn Rule> = Arc::new(rule);
        let rule_name = name.clone();
        self.registry.register(name, move |args| {
            arity(&rule_name, args, 0, Some(0))?;
            Ok(Arc::clone(&rule))
        });
    }

    /// Resolve a rule set against an input document.
    ///
    /// Malformed paths and unknown or badly parameterized rules are reported
    /// here, before any field is evaluated.
    pub fn make(&self, data: &Value, rules: impl Into<RuleSet>) -> Result<Validator<'_>, RuleError> {
        let rules = rules.into();
        let mut fields = Vec::with_capacity(rules.len());

        for (path, spec) in rules.iter() {
            let path = FieldPath::parse(path)?;
            let resolved = self.registry.resolve(spec)?;
            fields.push((path, resolved));
        }

        tracing::debug!("Resolved validation rules for {} field(s)", fields.len());

        Ok(Validator {
            factory: self,
            data: data.clone(),
            fields,
            messages: HashMap::new(),
            attributes: HashMap::new(),
            after: Vec::new(),
            stop_on_first_failure: self.config.stop_on_first_failure,
        })
    }

    fn warn_on_missing_locale(&self, locale: &str) {
        if !self.translator.has_locale(locale) {
            tracing::warn!(
                "No validation messages for locale '{}', falling back to '{}'",
                locale,
                self.config.fallback_locale
            );
        }
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

/// A rule set bound to one input document.
pub struct Validator<'f> {
    factory: &'f Factory,
    data: Value,
    fields: Vec<(FieldPath, ResolvedSpec)>,
    messages: HashMap<String, String>,
    attributes: HashMap<String, String>,
    after: Vec<AfterHook>,
    stop_on_first_failure: bool,
}

impl<'f> Validator<'f> {
    /// Inline messages keyed by `rule` or `field.rule`
    pub fn messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.messages
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Display names substituted for `:attribute`
    pub fn attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a hook that runs once after every field has been checked
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Value, &mut ErrorBag) + Send + Sync + 'static,
    {
        self.after.push(Arc::new(hook));
        self
    }

    /// Stop evaluating further fields once one has failed
    pub fn stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    /// The input being validated
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Evaluate every rule and return the outcome
    pub fn run(&self) -> ValidationResult {
        let mut document = self.data.clone();
        let mut errors = ErrorBag::new();

        for (path, spec) in &self.fields {
            if self.stop_on_first_failure && !errors.is_empty() {
                break;
            }
            self.check_field(path, spec, &document, &mut errors);
        }

        for hook in &self.after {
            hook(&mut document, &mut errors);
        }

        let passed = errors.is_empty();
        let validated_data = passed.then(|| self.collect_validated());

        tracing::debug!(
            "Validation finished: {} field(s), passed={}, {} error(s)",
            self.fields.len(),
            passed,
            errors.total()
        );

        ValidationResult {
            passed,
            errors,
            validated_data,
        }
    }

    /// Check if a fresh run passes
    pub fn passes(&self) -> bool {
        self.run().passed
    }

    /// Check if a fresh run fails
    pub fn fails(&self) -> bool {
        !self.passes()
    }

    /// Error bag of a fresh run
    pub fn errors(&self) -> ErrorBag {
        self.run().errors
    }

    /// Fail-fast form: the validated subset, or the error bag as an error
    pub fn validate(&self) -> Result<Value, ValidationFailed> {
        self.run().into_result()
    }

    /// Alias of [`Validator::validate`]
    pub fn validated(&self) -> Result<Value, ValidationFailed> {
        self.validate()
    }

    fn check_field(&self, path: &FieldPath, spec: &ResolvedSpec, document: &Value, errors: &mut ErrorBag) {
        let value = path.resolve(document);
        if spec.sometimes && value.is_none() {
            return;
        }

        let ctx = RuleContext::new(document).with_numeric(spec.is_numeric());
        let optional = match value {
            None => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Null) => spec.nullable,
            Some(_) => false,
        };

        for rule in &spec.rules {
            if optional && !rule.is_implicit() {
                continue;
            }

            if let ValidationOutcome::Fail(failures) = evaluate(rule.as_ref(), path.as_str(), value, &ctx) {
                tracing::trace!("Rule '{}' failed for '{}'", rule.name(), path);
                for failure in &failures {
                    errors.add(path.as_str(), self.render(path.as_str(), failure));
                }
                if rule.is_implicit() || spec.bail {
                    break;
                }
            }
        }
    }

    fn collect_validated(&self) -> Value {
        let mut validated = Value::Object(Map::new());
        for (path, _) in &self.fields {
            path.copy_into(&self.data, &mut validated);
        }
        validated
    }

    fn render(&self, attribute: &str, failure: &Failure) -> String {
        let mut params = failure.params.clone();
        if failure.param("attribute").is_none() {
            params.push(("attribute".to_string(), self.display_name(attribute)));
        }
        if let Some((_, other)) = params.iter_mut().find(|(name, _)| name == "other") {
            *other = self.display_name(other);
        }

        match self.template(attribute, failure) {
            Some(template) => replace_placeholders(template, &params),
            None => {
                tracing::debug!("No message template for '{}', using it verbatim", failure.key);
                replace_placeholders(&failure.key, &params)
            }
        }
    }

    fn template(&self, attribute: &str, failure: &Failure) -> Option<&str> {
        let rule = failure.rule.as_str();
        let suffix = failure.key.strip_prefix("validation.");

        let inline = self
            .messages
            .get(&format!("{}.{}", attribute, rule))
            .or_else(|| self.messages.get(rule))
            .or_else(|| {
                let suffix = suffix?;
                self.messages
                    .get(&format!("{}.{}", attribute, suffix))
                    .or_else(|| self.messages.get(suffix))
            });
        if let Some(template) = inline {
            return Some(template.as_str());
        }

        let translator = &self.factory.translator;
        let (locale, fallback) = (self.factory.locale(), self.factory.fallback_locale());
        translator
            .find(locale, fallback, &format!("validation.custom.{}.{}", attribute, rule))
            .or_else(|| translator.find(locale, fallback, &failure.key))
    }

    fn display_name(&self, attribute: &str) -> String {
        if let Some(name) = self.attributes.get(attribute) {
            return name.clone();
        }

        let key = format!("validation.attributes.{}", attribute);
        match self
            .factory
            .translator
            .find(self.factory.locale(), self.factory.fallback_locale(), &key)
        {
            Some(name) => name.to_string(),
            None => attribute.replace('_', " "),
        }
    }
}

impl fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("locale", &self.factory.locale())
            .field("fields", &self.fields)
            .field("messages", &self.messages.len())
            .field("after_hooks", &self.after.len())
            .field("stop_on_first_failure", &self.stop_on_first_failure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSpec;
    use crate::traits::Fail;
    use crate::validators::{ClosureRule, In, Password};
    use serde_json::json;

    fn login_rules() -> RuleSet {
        RuleSet::new()
            .field("username", "required")
            .field("password", "required")
    }

    #[test]
    fn test_passes_with_required_fields() {
        let factory = Factory::new();
        let data = json!({"username": "admin", "password": "12345"});

        let validator = factory.make(&data, login_rules()).unwrap();
        assert!(validator.passes());
        assert!(!validator.fails());

        let result = validator.run();
        assert!(result.errors.is_empty());
        assert_eq!(result.validated_data, Some(data));
    }

    #[test]
    fn test_fails_with_empty_fields() {
        let factory = Factory::new();
        let data = json!({"username": "", "password": ""});

        let result = factory.make(&data, login_rules()).unwrap().run();
        assert!(!result.passed);
        assert_eq!(result.validated_data, None);
        assert_eq!(
            result.errors.first("username"),
            Some("The username field is required.")
        );
        assert_eq!(
            result.errors.first("password"),
            Some("The password field is required.")
        );
    }

    #[test]
    fn test_required_blocks_later_rules() {
        let factory = Factory::new();
        let data = json!({"username": ""});

        let errors = factory
            .make(&data, RuleSet::new().field("username", "required|email|max:100"))
            .unwrap()
            .errors();
        assert_eq!(errors.get("username").len(), 1);
    }

    #[test]
    fn test_non_blocking_rules_accumulate() {
        let factory = Factory::new();
        let data = json!({"username": "wah!"});

        let errors = factory
            .make(&data, RuleSet::new().field("username", "required|email|min:6|alpha"))
            .unwrap()
            .errors();
        assert_eq!(
            errors.get("username"),
            [
                "The username field must be a valid email address.",
                "The username field must be at least 6 characters.",
                "The username field must only contain letters.",
            ]
        );
    }

    #[test]
    fn test_bail_stops_at_first_failure() {
        let factory = Factory::new();
        let data = json!({"username": "wah!"});

        let errors = factory
            .make(&data, RuleSet::new().field("username", "bail|email|min:6"))
            .unwrap()
            .errors();
        assert_eq!(errors.get("username").len(), 1);
    }

    #[test]
    fn test_optional_fields_skip_non_implicit_rules() {
        let factory = Factory::new();
        let data = json!({"nickname": "", "bio": null});

        let rules = RuleSet::new()
            .field("street", "max:200")
            .field("nickname", "min:3")
            .field("bio", "nullable|string|max:10");
        assert!(factory.make(&data, rules).unwrap().passes());

        // null without nullable still reaches the rule
        let rules = RuleSet::new().field("bio", "string");
        assert!(factory.make(&data, rules).unwrap().fails());
    }

    #[test]
    fn test_sometimes_skips_absent_fields() {
        let factory = Factory::new();

        let rules = || RuleSet::new().field("email", "sometimes|required|email");
        assert!(factory.make(&json!({}), rules()).unwrap().passes());
        assert!(factory.make(&json!({"email": ""}), rules()).unwrap().fails());
    }

    #[test]
    fn test_inline_messages() {
        let factory = Factory::new();
        let data = json!({"username": "admin", "password": "admin"});
        let rules = RuleSet::new()
            .field("username", "required|email|max:100")
            .field("password", ["required", "min:6", "max:20"]);

        let errors = factory
            .make(&data, rules)
            .unwrap()
            .messages([
                ("required", ":attribute harus diisi."),
                ("email", ":attribute harus berupa email."),
                ("min", ":attribute minimal :min karakter."),
                ("password.max", ":attribute maksimal :max karakter."),
            ])
            .errors();

        assert_eq!(errors.first("username"), Some("username harus berupa email."));
        assert_eq!(errors.first("password"), Some("password minimal 6 karakter."));
    }

    #[test]
    fn test_field_specific_inline_message_wins() {
        let factory = Factory::new();
        let data = json!({"username": ""});

        let errors = factory
            .make(&data, RuleSet::new().field("username", "required"))
            .unwrap()
            .messages([
                ("required", "generic"),
                ("username.required", "Please enter your :attribute."),
            ])
            .errors();
        assert_eq!(errors.first("username"), Some("Please enter your username."));
    }

    #[test]
    fn test_custom_attribute_names() {
        let factory = Factory::new();
        let data = json!({"first_name": "", "name": {"last": ""}});

        let errors = factory
            .make(
                &data,
                RuleSet::new()
                    .field("first_name", "required")
                    .field("name.last", "required"),
            )
            .unwrap()
            .attributes([("name.last", "last name")])
            .errors();
        assert_eq!(errors.first("first_name"), Some("The first name field is required."));
        assert_eq!(errors.first("name.last"), Some("The last name field is required."));
    }

    #[test]
    fn test_locale_changes_text_only() {
        let mut factory = Factory::new();
        let data = json!({"username": "wah", "password": "rahasia"});
        let rules = || {
            RuleSet::new()
                .field("username", "required|email|max:100")
                .field("password", "required|min:6|max:20")
        };

        let english = factory.make(&data, rules()).unwrap().run();
        factory.set_locale("id");
        let indonesian = factory.make(&data, rules()).unwrap().run();

        assert_eq!(english.passed, indonesian.passed);
        assert_eq!(
            english.errors.keys().collect::<Vec<_>>(),
            indonesian.errors.keys().collect::<Vec<_>>()
        );
        assert_eq!(
            indonesian.errors.first("username"),
            Some("username harus berupa alamat surel yang valid.")
        );
        assert_eq!(factory.locale(), "id");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let mut factory = Factory::new();
        factory.set_locale("fr");
        let errors = factory
            .make(&json!({}), RuleSet::new().field("username", "required"))
            .unwrap()
            .errors();
        assert_eq!(errors.first("username"), Some("The username field is required."));
    }

    #[test]
    fn test_after_hook_adds_errors() {
        let factory = Factory::new();
        let data = json!({"username": "admin@email.id", "password": "admin@email.id"});
        let rules = RuleSet::new()
            .field("username", "required|email|max:100")
            .field("password", ["required", "min:6", "max:20"]);

        let validator = factory.make(&data, rules).unwrap().after(|data, errors| {
            if data["username"] == data["password"] {
                errors.add("password", "Password tidak boleh sama dengan username");
            }
        });

        let result = validator.run();
        assert!(!result.passed);
        assert_eq!(
            result.errors.get("password"),
            ["Password tidak boleh sama dengan username"]
        );
    }

    #[test]
    fn test_after_hook_does_not_touch_caller_input() {
        let factory = Factory::new();
        let data = json!({"username": "admin"});

        let validator = factory
            .make(&data, RuleSet::new().field("username", "required"))
            .unwrap()
            .after(|data, _| {
                data["username"] = json!("changed");
            });

        let result = validator.run();
        assert!(result.passed);
        assert_eq!(data["username"], "admin");
        assert_eq!(validator.data()["username"], "admin");
        assert_eq!(result.validated_data.unwrap()["username"], "admin");
    }

    #[test]
    fn test_validated_data_contains_only_ruled_fields() {
        let factory = Factory::new();
        let data = json!({
            "username": "admin@email.id",
            "password": "rahasia",
            "admin": true,
            "others": false,
        });
        let rules = RuleSet::new()
            .field("username", "required|email|max:100")
            .field("password", "required|min:6|max:20");

        let validated = factory.make(&data, rules).unwrap().validate().unwrap();
        assert_eq!(
            validated,
            json!({"username": "admin@email.id", "password": "rahasia"})
        );
    }

    #[test]
    fn test_validate_and_run_share_errors() {
        let factory = Factory::new();
        let data = json!({"username": "", "password": ""});

        let validator = factory.make(&data, login_rules()).unwrap();
        let failure = validator.validate().unwrap_err();
        assert_eq!(failure.errors, validator.run().errors);
        assert_eq!(failure.status(), 422);
    }

    #[test]
    fn test_stop_on_first_failure() {
        let factory = Factory::new();
        let data = json!({"username": "", "password": ""});

        let errors = factory
            .make(&data, login_rules())
            .unwrap()
            .stop_on_first_failure(true)
            .errors();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["username"]);
    }

    #[test]
    fn test_configuration_errors_at_make() {
        let factory = Factory::new();
        let data = json!({});

        let err = factory
            .make(&data, RuleSet::new().field("name..first", "required"))
            .unwrap_err();
        assert!(matches!(err, RuleError::MalformedPath { .. }));

        let err = factory
            .make(&data, RuleSet::new().field("username", "required|unknown_rule"))
            .unwrap_err();
        assert_eq!(err, RuleError::unknown_rule("unknown_rule"));

        let err = factory
            .make(&data, RuleSet::new().field("username", "between:1"))
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidArity { .. }));
    }

    #[test]
    fn test_numeric_fields_compare_values() {
        let factory = Factory::new();
        let rules = || RuleSet::new().field("age", "numeric|min:18");

        assert!(factory.make(&json!({"age": "21"}), rules()).unwrap().passes());
        let errors = factory.make(&json!({"age": "17"}), rules()).unwrap().errors();
        assert_eq!(errors.first("age"), Some("The age field must be at least 18."));
    }

    #[test]
    fn test_cross_field_other_uses_display_name() {
        let factory = Factory::new();
        let data = json!({"password": "rahasia", "password_confirm": "other"});

        let errors = factory
            .make(&data, RuleSet::new().field("password", "same:password_confirm"))
            .unwrap()
            .errors();
        assert_eq!(
            errors.first("password"),
            Some("The password field must match password confirm.")
        );
    }

    #[test]
    fn test_extend_with_named_rules() {
        let mut factory = Factory::new();
        factory.extend_rule(
            "shouting",
            ClosureRule::named("shouting", |_, value, fail: &mut Fail, _| {
                if value.as_str().is_some_and(|s| s != s.to_uppercase()) {
                    fail.add("validation.custom.shouting");
                }
            }),
        );
        factory
            .translator_mut()
            .add_lines("en", [("validation.custom.shouting", "The :attribute must be shouted.")]);

        let errors = factory
            .make(&json!({"greeting": "hello"}), RuleSet::new().field("greeting", "required|shouting"))
            .unwrap()
            .errors();
        assert_eq!(errors.first("greeting"), Some("The greeting must be shouted."));

        assert!(factory
            .make(&json!({}), RuleSet::new().field("greeting", "shouting:loud"))
            .is_err());
    }

    #[test]
    fn test_rule_objects_in_lists() {
        let factory = Factory::new();
        let data = json!({"username": "wahyudi", "password": "admin123@email.id"});
        let rules = RuleSet::new()
            .field(
                "username",
                RuleSpec::new().push("required").push(In::new(["wahyudi", "budi", "andrian"])),
            )
            .field(
                "password",
                RuleSpec::new()
                    .push("required")
                    .push(Password::min(6).letters().numbers().symbols()),
            );

        assert!(factory.make(&data, rules).unwrap().passes());
    }

    #[test]
    fn test_default_factory_validate() {
        let result = validate(&json!({"username": "admin"}), login_rules()).unwrap();
        assert!(!result.passed);
        assert!(result.errors.has("password"));
    }
}
