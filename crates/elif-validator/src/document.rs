//! Input documents and dot-delimited field paths

use std::fmt;

use serde_json::{Map, Value};

use crate::error::RuleError;

/// Nested key/value input handed to the validator.
pub type InputDocument = Value;

/// A dot-delimited address into an [`InputDocument`], e.g. `address.city`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a path, rejecting empty and wildcard segments
    pub fn parse(path: &str) -> Result<Self, RuleError> {
        if path.is_empty() {
            return Err(RuleError::malformed_path(path, "path is empty"));
        }

        let mut segments = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(RuleError::malformed_path(path, "path contains an empty segment"));
            }
            if segment == "*" {
                return Err(RuleError::malformed_path(path, "wildcard segments are not supported"));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path segments split on dots
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Look the path up in a document; `None` means absent
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| step(current, segment))
    }

    /// Copy the value at this path from `source` into `target`, creating the
    /// same container kinds the source has along the way. Array slots below
    /// a copied index are filled with `null`. Returns `false` when the path is
    /// absent from `source`.
    pub fn copy_into(&self, source: &Value, target: &mut Value) -> bool {
        if self.resolve(source).is_none() {
            return false;
        }

        let mut from = source;
        let mut slot = target;
        for segment in &self.segments {
            let Some(next) = step(from, segment) else {
                return false;
            };
            slot = child_slot(slot, from, segment);
            from = next;
        }
        *slot = from.clone();
        true
    }
}

fn child_slot<'a>(slot: &'a mut Value, parent: &Value, segment: &str) -> &'a mut Value {
    let index = match parent {
        Value::Array(_) => segment.parse::<usize>().ok(),
        _ => None,
    };

    match index {
        Some(index) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            match slot {
                Value::Array(items) => {
                    if items.len() <= index {
                        items.resize(index + 1, Value::Null);
                    }
                    &mut items[index]
                }
                _ => unreachable!("replaced with an array above"),
            }
        }
        None => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                _ => unreachable!("replaced with an object above"),
            }
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Resolve a dot path without validating it first; used by cross-field rules.
pub fn get<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| step(current, segment))
}

/// Build a document from decoded form pairs.
///
/// Keys may use dots (`name.first`) or brackets (`name[first]`); a trailing
/// `[]` appends to an array (`tags[]=a&tags[]=b`).
pub fn from_pairs<I, K, V>(pairs: I) -> InputDocument
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut document = Value::Object(Map::new());

    for (key, value) in pairs {
        let (segments, append) = split_form_key(key.as_ref());
        if segments.is_empty() {
            continue;
        }

        let mut current = &mut document;
        for segment in segments {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                unreachable!("replaced with an object above");
            };
            current = map.entry(segment).or_insert(Value::Null);
        }

        let value = Value::String(value.into());
        if append {
            match current {
                Value::Array(items) => items.push(value),
                other => *other = Value::Array(vec![value]),
            }
        } else {
            *current = value;
        }
    }

    document
}

fn split_form_key(key: &str) -> (Vec<String>, bool) {
    let (key, append) = match key.strip_suffix("[]") {
        Some(stripped) => (stripped, true),
        None => (key, false),
    };

    let segments = key
        .split(|c: char| c == '[' || c == '.')
        .map(|segment| segment.trim_end_matches(']'))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    (segments, append)
}
