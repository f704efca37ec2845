//! Pattern merge
//!
//! Combines a rule's existing `options.patterns` with an incoming list,
//! matching entries by `name`:
//! - new name: appended
//! - same name, same literal: fields shallow-merged, incoming wins
//! - same name, different literal: replaced in place by a combined entry
//!   whose regex matches either literal

use serde_json::Value;

use crate::document::{pattern_name, pattern_text, shallow_merge, NAME, PATTERN};
use crate::error::MergeError;
use crate::literal::RegexLiteral;
use crate::report::MergeReport;

/// Suffix appended to the name of a combined pattern.
pub const COMBINED_SUFFIX: &str = " (Combined)";

/// Merge `incoming` patterns into a copy of `existing`.
///
/// Existing entries keep their order; new entries are appended in incoming
/// order. Matching looks at the list as built so far, so a name repeated in
/// `incoming` merges into the entry appended for its first occurrence.
pub fn merge_patterns(
    rule_id: &str,
    existing: &[Value],
    incoming: &[Value],
    report: &mut MergeReport,
) -> Result<Vec<Value>, MergeError> {
    let mut merged = existing.to_vec();

    for pattern in incoming {
        let position = pattern_name(pattern)
            .and_then(|name| merged.iter().position(|p| pattern_name(p) == Some(name)));

        let Some(index) = position else {
            tracing::debug!(rule = rule_id, pattern = ?pattern_name(pattern), "adding pattern");
            merged.push(pattern.clone());
            report.patterns_added += 1;
            continue;
        };

        let differs = match (pattern_text(&merged[index]), pattern_text(pattern)) {
            (Some(current), Some(other)) => current != other,
            _ => false,
        };

        if differs {
            let combined = combine(rule_id, &merged[index], pattern)?;
            merged[index] = combined;
            report.patterns_combined += 1;
        } else {
            // Both sides are records here: matching requires a `name` field.
            if let (Some(fields), Some(overrides)) =
                (merged[index].as_object_mut(), pattern.as_object())
            {
                shallow_merge(fields, overrides);
            }
            report.patterns_updated += 1;
        }
    }

    Ok(merged)
}

/// Build the entry replacing two same-named patterns with different literals.
fn combine(rule_id: &str, existing: &Value, incoming: &Value) -> Result<Value, MergeError> {
    let name = pattern_name(existing).unwrap_or_default();
    let parse = |pattern: &Value| {
        RegexLiteral::parse(pattern_text(pattern).unwrap_or_default())
            .map_err(|e| MergeError::from_literal(e, rule_id, name))
    };

    let literal = parse(existing)?.union(&parse(incoming)?);

    let mut fields = existing.as_object().cloned().unwrap_or_default();
    if let Some(overrides) = incoming.as_object() {
        shallow_merge(&mut fields, overrides);
    }
    fields.insert(PATTERN.to_string(), Value::String(literal.to_string()));
    fields.insert(NAME.to_string(), Value::String(format!("{}{}", name, COMBINED_SUFFIX)));

    tracing::debug!(rule = rule_id, pattern = name, combined = %literal, "combined differing patterns");

    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn test_new_pattern_appended() {
        let existing = list(json!([{"name": "A", "pattern": "/a/g"}]));
        let incoming = list(json!([{"name": "B", "pattern": "/b/g"}]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(
            Value::Array(merged),
            json!([
                {"name": "A", "pattern": "/a/g"},
                {"name": "B", "pattern": "/b/g"}
            ])
        );
        assert_eq!(report.patterns_added, 1);
    }

    #[test]
    fn test_identical_literal_merges_fields() {
        let existing = list(json!([
            {"name": "A", "pattern": "/a/g", "severity": "error", "tag": "x"}
        ]));
        let incoming = list(json!([
            {"name": "A", "pattern": "/a/g", "severity": "warning"}
        ]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(
            Value::Array(merged),
            json!([{"name": "A", "pattern": "/a/g", "severity": "warning", "tag": "x"}])
        );
        assert_eq!(report.patterns_updated, 1);
        assert_eq!(report.patterns_combined, 0);
    }

    #[test]
    fn test_idempotent_with_itself() {
        let patterns = list(json!([
            {"name": "A", "pattern": "/a/g"},
            {"name": "B", "pattern": "/b/i"}
        ]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &patterns, &patterns, &mut report).unwrap();

        assert_eq!(merged, patterns);
    }

    #[test]
    fn test_differing_literal_combined_in_place() {
        let existing = list(json!([
            {"name": "Secret", "pattern": "/abc/gi", "message": "old"},
            {"name": "Other", "pattern": "/o/g"}
        ]));
        let incoming = list(json!([
            {"name": "Secret", "pattern": "/xyz/g", "message": "new"}
        ]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[0],
            json!({"name": "Secret (Combined)", "pattern": "/(abc)|(xyz)/gi", "message": "new"})
        );
        assert_eq!(merged[1]["name"], "Other");
        assert_eq!(report.patterns_combined, 1);
    }

    #[test]
    fn test_combined_name_no_longer_matches() {
        let existing = list(json!([{"name": "S", "pattern": "/a/g"}]));
        let incoming = list(json!([
            {"name": "S", "pattern": "/b/g"},
            {"name": "S", "pattern": "/c/g"}
        ]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0]["name"], "S (Combined)");
        assert_eq!(merged[1], json!({"name": "S", "pattern": "/c/g"}));
    }

    #[test]
    fn test_unnamed_patterns_always_appended() {
        let existing = list(json!([{"pattern": "/a/g"}]));
        let incoming = list(json!([{"pattern": "/a/g"}]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(report.patterns_added, 1);
    }

    #[test]
    fn test_missing_literal_is_field_merge() {
        let existing = list(json!([{"name": "A", "pattern": "/a/g"}]));
        let incoming = list(json!([{"name": "A", "disabled": true}]));
        let mut report = MergeReport::default();

        let merged = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(
            merged,
            list(json!([{"name": "A", "pattern": "/a/g", "disabled": true}]))
        );
    }

    #[test]
    fn test_unsupported_flag_error() {
        let existing = list(json!([{"name": "A", "pattern": "/a/g"}]));
        let incoming = list(json!([{"name": "A", "pattern": "/b/gz"}]));
        let mut report = MergeReport::default();

        let err = merge_patterns("rule-1", &existing, &incoming, &mut report).unwrap_err();

        assert_eq!(
            err,
            MergeError::UnsupportedFlag {
                rule: "rule-1".to_string(),
                pattern: "A".to_string(),
                flag: 'z',
            }
        );
    }

    #[test]
    fn test_inputs_not_mutated() {
        let existing = list(json!([{"name": "A", "pattern": "/a/g"}]));
        let incoming = list(json!([{"name": "A", "pattern": "/b/g"}]));
        let before = existing.clone();
        let mut report = MergeReport::default();

        let _ = merge_patterns("r", &existing, &incoming, &mut report).unwrap();

        assert_eq!(existing, before);
    }
}
