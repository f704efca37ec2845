//! Options merge for a rule present in both documents.

use serde_json::{Map, Value};

use crate::document::{shallow_merge, PATTERNS};
use crate::error::MergeError;
use crate::patterns::merge_patterns;
use crate::report::MergeReport;

/// Merge two `options` mappings.
///
/// Keys other than `patterns` are shallow-merged with `incoming` winning.
/// `patterns` depends on which side has a pattern list:
/// - both: pattern merge
/// - only incoming: incoming list taken as is
/// - only existing: existing list kept
///
/// A merged `patterns` list keeps the key position it had in `existing`,
/// the same as assigning to a key that is already present. Keys new to
/// `existing` are appended after it.
pub fn merge_options(
    rule_id: &str,
    existing: &Map<String, Value>,
    incoming: &Map<String, Value>,
    report: &mut MergeReport,
) -> Result<Map<String, Value>, MergeError> {
    let mut merged = existing.clone();

    let Some(current) = existing.get(PATTERNS).and_then(Value::as_array) else {
        shallow_merge(&mut merged, incoming);
        return Ok(merged);
    };

    for (key, value) in incoming.iter().filter(|(key, _)| key.as_str() != PATTERNS) {
        merged.insert(key.clone(), value.clone());
    }

    if let Some(additions) = incoming.get(PATTERNS).and_then(Value::as_array) {
        let patterns = merge_patterns(rule_id, current, additions, report)?;
        merged.insert(PATTERNS.to_string(), Value::Array(patterns));
    }

    Ok(merged)
}
