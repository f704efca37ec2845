//! Merge report: what a merge did, for summaries and diagnostics.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::rule_id;

/// Which input document something came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Default,
    External,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Default => "default",
            Side::External => "external",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule id that occurs more than once within one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateId {
    pub side: Side,
    pub id: String,
    pub occurrences: usize,
}

impl DuplicateId {
    /// What the merge does with the repeated occurrences.
    pub fn effect(&self) -> &'static str {
        match self.side {
            Side::Default => "earlier occurrences are unreachable; only the last is merged",
            Side::External => "every occurrence is applied in order",
        }
    }
}

/// Counters and diagnostics collected during a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Rules in the default document
    pub default_rules: usize,

    /// Rules in the external document (0 when rule merging was skipped)
    pub external_rules: usize,

    /// External rules appended because their id was new
    pub rules_added: usize,

    /// Existing rules whose options were replaced or merged
    pub rules_merged: usize,

    /// External rules matched by id but carrying no options
    pub rules_unchanged: usize,

    pub patterns_added: usize,
    pub patterns_updated: usize,
    pub patterns_combined: usize,

    /// Rule ids repeated within one document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicate_ids: Vec<DuplicateId>,

    /// Top-level keys copied from the external document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overridden_keys: Vec<String>,
}

impl MergeReport {
    /// Rules in the merged document.
    pub fn total_rules(&self) -> usize {
        self.default_rules + self.rules_added
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.duplicate_ids.is_empty()
    }
}

/// Find rule ids occurring more than once, in order of first occurrence.
pub(crate) fn find_duplicates(rules: &[Value], side: Side) -> Vec<DuplicateId> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for id in rules.iter().filter_map(rule_id) {
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }

    let duplicates: Vec<DuplicateId> = order
        .into_iter()
        .filter(|id| counts[id] > 1)
        .map(|id| DuplicateId {
            side,
            id: id.to_string(),
            occurrences: counts[id],
        })
        .collect();

    for dup in &duplicates {
        tracing::warn!(
            side = %dup.side,
            id = %dup.id,
            occurrences = dup.occurrences,
            effect = dup.effect(),
            "duplicate rule id"
        );
    }

    duplicates
}
