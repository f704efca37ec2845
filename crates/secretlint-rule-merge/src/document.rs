//! Field names and accessors for the rules/options/patterns document shape.
//!
//! Documents stay as `serde_json::Value`; only the handful of keys below carry
//! meaning. Everything else is passed through untouched.

use serde_json::{Map, Value};

pub const RULES: &str = "rules";
pub const ID: &str = "id";
pub const OPTIONS: &str = "options";
pub const PATTERNS: &str = "patterns";
pub const NAME: &str = "name";
pub const PATTERN: &str = "pattern";

/// Rule identity, if the rule carries a string `id`.
pub fn rule_id(rule: &Value) -> Option<&str> {
    rule.get(ID).and_then(Value::as_str)
}

/// Pattern identity, if the pattern carries a string `name`.
pub fn pattern_name(pattern: &Value) -> Option<&str> {
    pattern.get(NAME).and_then(Value::as_str)
}

/// Regex literal text of a pattern record.
pub fn pattern_text(pattern: &Value) -> Option<&str> {
    pattern.get(PATTERN).and_then(Value::as_str)
}

/// The `rules` array of a document, if present.
pub fn rules(document: &Value) -> Option<&Vec<Value>> {
    document.get(RULES).and_then(Value::as_array)
}

/// True when a document carries a non-empty `rules` array.
pub fn has_rules(document: &Value) -> bool {
    rules(document).is_some_and(|rules| !rules.is_empty())
}

/// Copy every key of `source` onto `target`; `source` wins on collision.
///
/// Keys already in `target` keep their position; new keys are appended.
pub fn shallow_merge(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}
