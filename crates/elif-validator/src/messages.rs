//! Locale message tables and placeholder substitution

use std::collections::HashMap;

use serde_json::Value;

use crate::lang;

/// Message templates per locale.
///
/// Lookups never change the active locale; the caller passes it explicitly.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    lines: HashMap<String, HashMap<String, String>>,
}

impl Translator {
    /// Translator without any lines
    pub fn empty() -> Self {
        Self::default()
    }

    /// Translator with the built-in `en` and `id` tables
    pub fn with_defaults() -> Self {
        let mut translator = Self::empty();
        translator.add_lines("en", lang::EN.iter().copied());
        translator.add_lines("id", lang::ID.iter().copied());
        translator
    }

    /// Add or replace lines for a locale
    pub fn add_lines<I, K, V>(&mut self, locale: &str, lines: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.lines.entry(locale.to_string()).or_default();
        for (key, template) in lines {
            table.insert(key.into(), template.into());
        }
    }

    /// Add lines from a nested JSON object.
    ///
    /// `{"validation": {"custom": {"uppercase": "..."}}}` adds the key
    /// `validation.custom.uppercase`. Non-string leaves are ignored. Returns the
    /// number of lines added.
    pub fn add_json(&mut self, locale: &str, lines: &Value) -> usize {
        let mut flat = Vec::new();
        flatten("", lines, &mut flat);
        let count = flat.len();
        self.add_lines(locale, flat);
        count
    }

    /// Whether any lines are loaded for a locale
    pub fn has_locale(&self, locale: &str) -> bool {
        self.lines.contains_key(locale)
    }

    /// Loaded locales, sorted
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.lines.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Template for a key in one locale
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.lines
            .get(locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Template from the locale, then the fallback locale
    pub fn find(&self, locale: &str, fallback: &str, key: &str) -> Option<&str> {
        self.get(locale, key).or_else(|| self.get(fallback, key))
    }

    /// Translate a key, falling back to the key itself, and substitute params
    pub fn trans(&self, locale: &str, fallback: &str, key: &str, params: &[(String, String)]) -> String {
        let template = self.find(locale, fallback, key).unwrap_or(key);
        replace_placeholders(template, params)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, out);
            }
        }
        Value::String(template) if !prefix.is_empty() => out.push((prefix.to_string(), template.clone())),
        _ => {}
    }
}

/// Replace `:name` placeholders in one left-to-right pass, so substituted
/// values are never scanned again. At each `:` the longest matching name
/// wins, so `:min` never clobbers `:minimum`. `:Name` and `:NAME` receive
/// capitalized and upper-cased values.
pub fn replace_placeholders(template: &str, params: &[(String, String)]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        message.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match placeholder(after, params) {
            Some((len, value)) => {
                message.push_str(&value);
                rest = &after[len..];
            }
            None => {
                message.push(':');
                rest = after;
            }
        }
    }

    message.push_str(rest);
    message
}

/// Longest parameter name (in any of its three casings) starting `text`
fn placeholder(text: &str, params: &[(String, String)]) -> Option<(usize, String)> {
    let mut best: Option<(usize, String)> = None;

    for (name, value) in params.iter().filter(|(name, _)| !name.is_empty()) {
        let forms = [
            (name.clone(), value.clone()),
            (capitalize(name), capitalize(value)),
            (name.to_uppercase(), value.to_uppercase()),
        ];
        for (key, replacement) in forms {
            let longer = best.as_ref().map_or(true, |(len, _)| key.len() > *len);
            if longer && text.starts_with(key.as_str()) {
                best = Some((key.len(), replacement));
            }
        }
    }

    best
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replace_placeholders() {
        let message = replace_placeholders(
            "The :attribute field must be between :min and :max characters.",
            &params(&[("attribute", "password"), ("min", "6"), ("max", "20")]),
        );
        assert_eq!(message, "The password field must be between 6 and 20 characters.");
    }

    #[test]
    fn test_replace_capitalized_placeholders() {
        let message = replace_placeholders(
            ":Attribute wajib diisi. (:ATTRIBUTE)",
            &params(&[("attribute", "username")]),
        );
        assert_eq!(message, "Username wajib diisi. (USERNAME)");
    }

    #[test]
    fn test_longer_names_first() {
        let message = replace_placeholders(":minimum / :min", &params(&[("min", "1"), ("minimum", "5")]));
        assert_eq!(message, "5 / 1");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let message = replace_placeholders(
            "Got :input, need :min",
            &params(&[("input", "x:min"), ("min", "6")]),
        );
        assert_eq!(message, "Got x:min, need 6");
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let message = replace_placeholders("Ratio 1:2 for :attribute at 10:30", &params(&[("attribute", "score")]));
        assert_eq!(message, "Ratio 1:2 for score at 10:30");
    }

    #[test]
    fn test_locale_and_fallback() {
        let mut translator = Translator::with_defaults();
        translator.add_lines("fr", [("validation.required", "Le champ :attribute est obligatoire.")]);

        let p = params(&[("attribute", "username")]);
        assert_eq!(
            translator.trans("id", "en", "validation.required", &p),
            "username wajib diisi."
        );
        assert_eq!(
            translator.trans("fr", "en", "validation.required", &p),
            "Le champ username est obligatoire."
        );
        // missing key in fr falls back to en
        assert_eq!(
            translator.trans("fr", "en", "validation.email", &p),
            "The username field must be a valid email address."
        );
        // unknown key falls back to the key itself
        assert_eq!(
            translator.trans("id", "en", "The :attribute must be UPPERCASE", &p),
            "The username must be UPPERCASE"
        );
    }

    #[test]
    fn test_add_json_flattens() {
        let mut translator = Translator::empty();
        let added = translator.add_json(
            "en",
            &json!({
                "validation": {
                    "custom": {"registration": "Registration failed for :attribute."},
                    "attributes": {"username": "user name"},
                    "ignored": 3
                }
            }),
        );

        assert_eq!(added, 2);
        assert_eq!(
            translator.get("en", "validation.custom.registration"),
            Some("Registration failed for :attribute.")
        );
        assert_eq!(translator.locales(), vec!["en"]);
    }

    #[test]
    fn test_builtin_tables_cover_same_keys() {
        let translator = Translator::with_defaults();
        for (key, _) in lang::EN {
            assert!(translator.get("id", key).is_some(), "missing id line for {}", key);
        }
    }
}
