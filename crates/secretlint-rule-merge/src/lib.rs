//! Rule and pattern merge for secretlint configuration documents.
//!
//! Merges a default document with an external override. Rules are matched by
//! `id`, their `options` are merged, and same-named patterns with different
//! regex literals are combined into a single alternation. All other top-level
//! keys of the external document overwrite the default's.
//!
//! The merge is pure: both inputs are borrowed and the result shares nothing
//! with them.

mod document;
mod error;
mod literal;
mod options;
mod patterns;
mod report;

pub use document::{has_rules, pattern_name, pattern_text, rule_id, rules};
pub use error::{LiteralError, MergeError};
pub use literal::{Flags, RegexLiteral, DEFAULT_FLAGS, SUPPORTED_FLAGS};
pub use options::merge_options;
pub use patterns::{merge_patterns, COMBINED_SUFFIX};
pub use report::{DuplicateId, MergeReport, Side};

use std::collections::HashMap;

use serde_json::{Map, Value};

use document::{OPTIONS, RULES};
use report::find_duplicates;

/// Merged document plus what the merge did.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub config: Value,
    pub report: MergeReport,
}

/// Merge `external_config` into `default_config`, returning the merged document.
pub fn merge(default_config: &Value, external_config: &Value) -> Result<Value, MergeError> {
    merge_config(default_config, external_config).map(|outcome| outcome.config)
}

/// Merge `external_config` into `default_config`, returning the merged
/// document and a report.
///
/// External rules are only considered when `rules` is a non-empty array.
/// Top-level keys other than `rules` are always copied over.
pub fn merge_config(
    default_config: &Value,
    external_config: &Value,
) -> Result<MergeOutcome, MergeError> {
    let mut merged = default_config
        .as_object()
        .cloned()
        .ok_or(MergeError::NotAnObject {
            document: Side::Default,
        })?;
    let external = external_config.as_object().ok_or(MergeError::NotAnObject {
        document: Side::External,
    })?;

    let mut report = MergeReport::default();

    let Some(Value::Array(merged_rules)) = merged.get_mut(RULES) else {
        return Err(MergeError::MissingRules);
    };
    report.default_rules = merged_rules.len();
    report.duplicate_ids = find_duplicates(merged_rules, Side::Default);

    if let Some(incoming) = document::rules(external_config).filter(|r| !r.is_empty()) {
        report.external_rules = incoming.len();
        report
            .duplicate_ids
            .extend(find_duplicates(incoming, Side::External));

        let index = index_rules(merged_rules);
        for rule in incoming {
            match rule_id(rule).and_then(|id| index.get(id)) {
                Some(&position) => merge_rule(&mut merged_rules[position], rule, &mut report)?,
                None => {
                    tracing::debug!(rule = ?rule_id(rule), "appending rule");
                    merged_rules.push(rule.clone());
                    report.rules_added += 1;
                }
            }
        }
    } else {
        tracing::debug!("external document has no rules; keeping default rules");
    }

    for (key, value) in external.iter().filter(|(key, _)| key.as_str() != RULES) {
        merged.insert(key.clone(), value.clone());
        report.overridden_keys.push(key.clone());
    }

    Ok(MergeOutcome {
        config: Value::Object(merged),
        report,
    })
}

/// Map rule id to position. A repeated id keeps its last position.
fn index_rules(rules: &[Value]) -> HashMap<String, usize> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(position, rule)| rule_id(rule).map(|id| (id.to_string(), position)))
        .collect()
}

/// Apply an external rule to the existing rule with the same id.
fn merge_rule(
    existing: &mut Value,
    incoming: &Value,
    report: &mut MergeReport,
) -> Result<(), MergeError> {
    let id = rule_id(incoming).unwrap_or_default();

    let Some(incoming_options) = incoming.get(OPTIONS).filter(|o| !o.is_null()) else {
        report.rules_unchanged += 1;
        return Ok(());
    };
    let Some(rule) = existing.as_object_mut() else {
        return Ok(());
    };

    let options = match (
        rule.get(OPTIONS).and_then(Value::as_object),
        incoming_options.as_object(),
    ) {
        (Some(current), Some(overrides)) => {
            Value::Object(merge_options(id, current, overrides, report)?)
        }
        _ => incoming_options.clone(),
    };

    tracing::debug!(rule = id, "merged rule options");
    rule.insert(OPTIONS.to_string(), options);
    report.rules_merged += 1;
    Ok(())
}

/// An empty external document, for callers that only need the default.
pub fn empty_document() -> Value {
    Value::Object(Map::new())
}
