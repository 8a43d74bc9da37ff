//! Rule specifications: string DSL parsing, rule sets and the rule registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::RuleError;
use crate::traits::{Fail, Rule, RuleContext};
use crate::validators::*;

/// Rule names that only change how a field is evaluated
const MARKERS: [&str; 3] = ["bail", "nullable", "sometimes"];

/// One entry of a rule specification
#[derive(Clone)]
pub enum RuleToken {
    /// A registry rule by name, e.g. `max:100` -> `Named { "max", ["100"] }`
    Named { name: String, args: Vec<String> },
    /// A rule object
    Object(Arc<dyn Rule>),
    /// A closure rule
    Function(ClosureRule),
}

impl RuleToken {
    /// Split a `name:arg1,arg2` token. Never fails; unknown or empty names are
    /// rejected when the spec is resolved.
    pub fn named(token: &str) -> Self {
        let token = token.trim();
        let (name, rest) = match token.split_once(':') {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (token, None),
        };

        let args = match rest {
            None | Some("") => Vec::new(),
            // patterns may contain commas
            Some(rest) if name == "regex" || name == "not_regex" => vec![rest.to_string()],
            Some(rest) => rest.split(',').map(|arg| arg.trim().to_string()).collect(),
        };

        RuleToken::Named {
            name: name.to_string(),
            args,
        }
    }

    /// Token from a rule object
    pub fn object(rule: impl Rule + 'static) -> Self {
        RuleToken::Object(Arc::new(rule))
    }

    /// Token from a closure
    pub fn function<F>(callback: F) -> Self
    where
        F: Fn(&str, &Value, &mut Fail, &RuleContext<'_>) + Send + Sync + 'static,
    {
        RuleToken::Function(ClosureRule::new(callback))
    }
}

impl fmt::Debug for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleToken::Named { name, args } => f
                .debug_struct("Named")
                .field("name", name)
                .field("args", args)
                .finish(),
            RuleToken::Object(rule) => f.debug_tuple("Object").field(&rule.name()).finish(),
            RuleToken::Function(rule) => f.debug_tuple("Function").field(rule).finish(),
        }
    }
}

impl From<&str> for RuleToken {
    fn from(token: &str) -> Self {
        RuleToken::named(token)
    }
}

impl From<String> for RuleToken {
    fn from(token: String) -> Self {
        RuleToken::named(&token)
    }
}

impl<R: Rule + 'static> From<R> for RuleToken {
    fn from(rule: R) -> Self {
        RuleToken::Object(Arc::new(rule))
    }
}

/// Closure rule token, for mixing closures into rule lists
pub fn rule_fn<F>(callback: F) -> RuleToken
where
    F: Fn(&str, &Value, &mut Fail, &RuleContext<'_>) + Send + Sync + 'static,
{
    RuleToken::function(callback)
}

/// Ordered rules bound to one field path.
///
/// Built from a pipe-delimited string (`"required|email|max:100"`) or from a
/// list of tokens; both forms resolve to the same rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSpec {
    tokens: Vec<RuleToken>,
    source: Option<String>,
}

impl RuleSpec {
    /// Create an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the string form, rejecting empty tokens immediately
    pub fn parse(spec: &str) -> Result<Self, RuleError> {
        let parsed = Self::from_pipe_string(spec);
        if parsed.has_empty_token() {
            return Err(RuleError::EmptyRule {
                spec: spec.to_string(),
            });
        }
        Ok(parsed)
    }

    fn from_pipe_string(spec: &str) -> Self {
        Self {
            tokens: spec.split('|').map(RuleToken::named).collect(),
            source: Some(spec.to_string()),
        }
    }

    fn has_empty_token(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, RuleToken::Named { name, .. } if name.is_empty()))
    }

    /// Append a token
    pub fn push(mut self, token: impl Into<RuleToken>) -> Self {
        self.tokens.push(token.into());
        self
    }

    /// Tokens in declaration order
    pub fn tokens(&self) -> &[RuleToken] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the spec has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn extend(&mut self, other: RuleSpec) {
        self.tokens.extend(other.tokens);
        if self.source.is_none() {
            self.source = other.source;
        }
    }

    fn describe(&self) -> String {
        self.source.clone().unwrap_or_else(|| {
            self.tokens
                .iter()
                .map(|token| match token {
                    RuleToken::Named { name, .. } => name.clone(),
                    RuleToken::Object(rule) => rule.name().to_string(),
                    RuleToken::Function(rule) => rule.name().to_string(),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
    }
}

impl From<&str> for RuleSpec {
    fn from(spec: &str) -> Self {
        Self::from_pipe_string(spec)
    }
}

impl From<String> for RuleSpec {
    fn from(spec: String) -> Self {
        Self::from_pipe_string(&spec)
    }
}

impl<T: Into<RuleToken>> From<Vec<T>> for RuleSpec {
    fn from(tokens: Vec<T>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            source: None,
        }
    }
}

impl<T: Into<RuleToken>, const N: usize> From<[T; N]> for RuleSpec {
    fn from(tokens: [T; N]) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            source: None,
        }
    }
}

/// Field path -> rule spec, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<(String, RuleSpec)>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field; repeated paths append to the existing spec
    pub fn field(mut self, path: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        self.add(path, spec);
        self
    }

    /// Add rules for a field in place; repeated paths append
    pub fn add(&mut self, path: impl Into<String>, spec: impl Into<RuleSpec>) {
        let path = path.into();
        let spec = spec.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == path) {
            Some((_, existing)) => existing.extend(spec),
            None => self.fields.push((path, spec)),
        }
    }

    /// Fields with their specs, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.fields.iter().map(|(path, spec)| (path.as_str(), spec))
    }

    /// Field paths in declaration order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(path, _)| path.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field has rules
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, S> FromIterator<(K, S)> for RuleSet
where
    K: Into<String>,
    S: Into<RuleSpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (path, spec) in iter {
            set.add(path, spec);
        }
        set
    }
}

/// Rules resolved for one field, plus the evaluation markers it carries
#[derive(Clone, Default)]
pub struct ResolvedSpec {
    pub rules: Vec<Arc<dyn Rule>>,
    pub bail: bool,
    pub nullable: bool,
    pub sometimes: bool,
}

impl ResolvedSpec {
    /// Whether any rule makes size rules compare numerically
    pub fn is_numeric(&self) -> bool {
        self.rules.iter().any(|rule| rule.is_numeric())
    }

    /// Names of the resolved rules, in order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl fmt::Debug for ResolvedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSpec")
            .field("rules", &self.rule_names())
            .field("bail", &self.bail)
            .field("nullable", &self.nullable)
            .field("sometimes", &self.sometimes)
            .finish()
    }
}

/// Builds a rule from its string parameters
pub type RuleConstructor = Arc<dyn Fn(&[String]) -> Result<Arc<dyn Rule>, RuleError> + Send + Sync>;

/// Named rule constructors used to resolve string tokens
#[derive(Clone)]
pub struct RuleRegistry {
    constructors: HashMap<String, RuleConstructor>,
}

impl RuleRegistry {
    /// Registry without any rules
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with every built-in rule
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();

        registry.register("required", |args| {
            arity("required", args, 0, Some(0))?;
            Ok(Arc::new(RequiredValidator::new()))
        });
        registry.register("required_if", |args| {
            arity("required_if", args, 2, None)?;
            Ok(Arc::new(RequiredIfValidator::new(args[0].clone(), args[1..].to_vec())))
        });
        registry.register("required_with", |args| {
            arity("required_with", args, 1, None)?;
            Ok(Arc::new(RequiredWithValidator::new(args.to_vec())))
        });
        registry.register("present", |args| {
            arity("present", args, 0, Some(0))?;
            Ok(Arc::new(PresentValidator))
        });
        registry.register("filled", |args| {
            arity("filled", args, 0, Some(0))?;
            Ok(Arc::new(FilledValidator))
        });
        registry.register("email", |args| {
            arity("email", args, 0, Some(0))?;
            Ok(Arc::new(EmailValidator::new()))
        });
        registry.register("min", |args| {
            arity("min", args, 1, Some(1))?;
            Ok(Arc::new(SizeValidator::min_bound(bound("min", &args[0])?)))
        });
        registry.register("max", |args| {
            arity("max", args, 1, Some(1))?;
            Ok(Arc::new(SizeValidator::max_bound(bound("max", &args[0])?)))
        });
        registry.register("between", |args| {
            arity("between", args, 2, Some(2))?;
            let (min, max) = (bound("between", &args[0])?, bound("between", &args[1])?);
            if min.value > max.value {
                return Err(RuleError::invalid_parameter(
                    "between",
                    args.join(","),
                    "minimum is greater than maximum",
                ));
            }
            Ok(Arc::new(SizeValidator::between_bounds(min, max)))
        });
        registry.register("size", |args| {
            arity("size", args, 1, Some(1))?;
            Ok(Arc::new(SizeValidator::exact_bound(bound("size", &args[0])?)))
        });
        registry.register("in", |args| {
            arity("in", args, 1, None)?;
            Ok(Arc::new(In::new(args.to_vec())))
        });
        registry.register("not_in", |args| {
            arity("not_in", args, 1, None)?;
            Ok(Arc::new(NotIn::new(args.to_vec())))
        });
        for kind in [
            TypeValidator::Numeric,
            TypeValidator::Integer,
            TypeValidator::String,
            TypeValidator::Boolean,
            TypeValidator::Alpha,
            TypeValidator::AlphaNum,
            TypeValidator::Uppercase,
            TypeValidator::Lowercase,
            TypeValidator::Date,
            TypeValidator::Uuid,
        ] {
            let name = kind.name().to_string();
            registry.register(name.clone(), move |args| {
                arity(&name, args, 0, Some(0))?;
                Ok(Arc::new(kind))
            });
        }
        registry.register("regex", |args| {
            arity("regex", args, 1, Some(1))?;
            Ok(Arc::new(PatternValidator::parse(&args[0])?))
        });
        registry.register("not_regex", |args| {
            arity("not_regex", args, 1, Some(1))?;
            Ok(Arc::new(PatternValidator::parse(&args[0])?.negate(true)))
        });
        registry.register("same", |args| {
            arity("same", args, 1, Some(1))?;
            Ok(Arc::new(SameValidator::new(args[0].clone())))
        });
        registry.register("different", |args| {
            arity("different", args, 1, Some(1))?;
            Ok(Arc::new(DifferentValidator::new(args[0].clone())))
        });
        registry.register("confirmed", |args| {
            arity("confirmed", args, 0, Some(0))?;
            Ok(Arc::new(ConfirmedValidator))
        });
        registry.register("password", |args| {
            arity("password", args, 0, Some(0))?;
            Ok(Arc::new(Password::defaults()))
        });

        registry
    }

    /// Register (or replace) a named rule
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&[String]) -> Result<Arc<dyn Rule>, RuleError> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
    }

    /// Whether a name is a registered rule or a marker
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name) || MARKERS.contains(&name)
    }

    /// Build a single named rule
    pub fn build(&self, name: &str, args: &[String]) -> Result<Arc<dyn Rule>, RuleError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RuleError::unknown_rule(name))?;
        constructor(args)
    }

    /// Resolve every token of a spec into rule objects
    pub fn resolve(&self, spec: &RuleSpec) -> Result<ResolvedSpec, RuleError> {
        let mut resolved = ResolvedSpec::default();

        for token in spec.tokens() {
            match token {
                RuleToken::Named { name, args } => {
                    if name.is_empty() {
                        return Err(RuleError::EmptyRule {
                            spec: spec.describe(),
                        });
                    }
                    if MARKERS.contains(&name.as_str()) {
                        arity(name, args, 0, Some(0))?;
                        match name.as_str() {
                            "bail" => resolved.bail = true,
                            "nullable" => resolved.nullable = true,
                            _ => resolved.sometimes = true,
                        }
                        continue;
                    }
                    resolved.rules.push(self.build(name, args)?);
                }
                RuleToken::Object(rule) => resolved.rules.push(Arc::clone(rule)),
                RuleToken::Function(rule) => resolved.rules.push(Arc::new(rule.clone())),
            }
        }

        Ok(resolved)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.constructors.keys().collect();
        names.sort();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

/// Check the number of parameters a rule received
pub fn arity(rule: &str, args: &[String], min: usize, max: Option<usize>) -> Result<(), RuleError> {
    let ok = args.len() >= min && max.map_or(true, |max| args.len() <= max);
    if ok {
        return Ok(());
    }

    let expected = match max {
        Some(max) if max == min => format!("exactly {}", min),
        Some(max) => format!("between {} and {}", min, max),
        None => format!("at least {}", min),
    };
    Err(RuleError::invalid_arity(rule, expected, args.len()))
}

fn bound(rule: &str, arg: &str) -> Result<Bound, RuleError> {
    Bound::parse(arg).ok_or_else(|| RuleError::invalid_parameter(rule, arg, "expected a number"))
}
