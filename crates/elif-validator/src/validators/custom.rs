//! Closure-based rules for one-off checks

use std::sync::Arc;

use serde_json::Value;

use crate::traits::{Fail, Rule, RuleContext};

/// Signature of a closure rule: attribute name, value, failure collector and
/// read access to the whole document
pub type ClosureFn = Arc<dyn Fn(&str, &Value, &mut Fail, &RuleContext<'_>) + Send + Sync>;

/// Rule backed by a closure instead of a named type.
///
/// Like other non-implicit rules it is skipped for absent and blank values.
#[derive(Clone)]
pub struct ClosureRule {
    name: String,
    callback: ClosureFn,
}

impl ClosureRule {
    /// Closure rule reported under the name `closure`
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str, &Value, &mut Fail, &RuleContext<'_>) + Send + Sync + 'static,
    {
        Self::named("closure", callback)
    }

    /// Closure rule with a name used for inline message lookup
    pub fn named<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str, &Value, &mut Fail, &RuleContext<'_>) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }
}

impl std::fmt::Debug for ClosureRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureRule").field("name", &self.name).finish()
    }
}

impl Rule for ClosureRule {
    fn validate(&self, attribute: &str, value: Option<&Value>, fail: &mut Fail, ctx: &RuleContext<'_>) {
        if let Some(value) = value {
            (self.callback)(attribute, value, fail, ctx);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
