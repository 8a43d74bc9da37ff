//! Pattern-based validators using regular expressions

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::RuleError;
use crate::traits::{Fail, Rule, RuleContext};

/// Validator for regular expression patterns (`regex` / `not_regex`)
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    negate: bool,
}

impl PatternValidator {
    /// Create a validator from a bare pattern
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern)
            .map_err(|e| RuleError::invalid_parameter("regex", pattern, e.to_string()))?;
        Ok(Self::from_regex(regex))
    }

    /// Parse a delimited pattern such as `/^[a-z]+$/i`.
    ///
    /// Supported flags: `i` (case-insensitive), `m` (multi-line), `s` (dot
    /// matches newline), `x` (ignore whitespace), `u` (accepted, always on).
    /// Undelimited input is used as-is.
    pub fn parse(spec: &str) -> Result<Self, RuleError> {
        let Some(body) = spec.strip_prefix('/') else {
            return Self::new(spec);
        };
        let Some(end) = body.rfind('/') else {
            return Err(RuleError::invalid_parameter("regex", spec, "missing closing delimiter"));
        };

        let (pattern, flags) = (&body[..end], &body[end + 1..]);
        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'u' => builder.unicode(true),
                other => {
                    return Err(RuleError::invalid_parameter(
                        "regex",
                        spec,
                        format!("unsupported flag '{}'", other),
                    ))
                }
            };
        }

        let regex = builder
            .build()
            .map_err(|e| RuleError::invalid_parameter("regex", spec, e.to_string()))?;
        Ok(Self::from_regex(regex))
    }

    /// Wrap an already compiled regex
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            pattern: regex,
            negate: false,
        }
    }

    /// Fail when the pattern matches instead of when it does not
    pub fn negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    /// Source text of the pattern
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for PatternValidator {
    fn validate(&self, _attribute: &str, value: Option<&Value>, fail: &mut Fail, _ctx: &RuleContext<'_>) {
        let matched = match value.and_then(Value::as_str) {
            Some(text) => self.pattern.is_match(text),
            None => {
                fail.add(format!("validation.{}", self.name()));
                return;
            }
        };

        if matched == self.negate {
            fail.add(format!("validation.{}", self.name()));
        }
    }

    fn name(&self) -> &str {
        if self.negate {
            "not_regex"
        } else {
            "regex"
        }
    }
}
