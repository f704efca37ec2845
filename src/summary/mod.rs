//! Merge summaries
//!
//! Human-readable and JSON renderings of an [`EffectiveConfig`]: which inputs
//! were used, how the output was produced, and the rule and pattern counts.

use serde::{Deserialize, Serialize};

use secretlint_rule_merge::DuplicateId;

use crate::config::{DocumentSource, EffectiveConfig, Resolution};

/// Rule counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCounts {
    pub default: usize,
    pub external: usize,
    pub added: usize,
    pub merged: usize,
    pub unchanged: usize,
    pub total: usize,
}

/// Pattern counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCounts {
    pub added: usize,
    pub updated: usize,
    pub combined: usize,
}

/// Summary of one merge run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSummary {
    pub resolution: Resolution,

    /// Where the output was written (None for dry runs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    pub sources: Vec<DocumentSource>,
    pub rules: RuleCounts,
    pub patterns: PatternCounts,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicate_ids: Vec<DuplicateId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overridden_keys: Vec<String>,
}

impl MergeSummary {
    pub fn from_effective(effective: &EffectiveConfig, output_path: Option<&str>) -> Self {
        let report = &effective.report;
        Self {
            resolution: effective.resolution,
            output_path: output_path.map(str::to_string),
            sources: effective.sources.clone(),
            rules: RuleCounts {
                default: report.default_rules,
                external: report.external_rules,
                added: report.rules_added,
                merged: report.rules_merged,
                unchanged: report.rules_unchanged,
                total: effective.rule_count(),
            },
            patterns: PatternCounts {
                added: report.patterns_added,
                updated: report.patterns_updated,
                combined: report.patterns_combined,
            },
            duplicate_ids: report.duplicate_ids.clone(),
            overridden_keys: report.overridden_keys.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let mut lines = vec![self.resolution.describe().to_string(), String::new()];

        for source in &self.sources {
            lines.push(format!(
                "  {:<9} {} (sha256 {})",
                format!("{}:", source.origin),
                source.path,
                short_digest(&source.digest)
            ));
        }

        lines.push(format!(
            "  Rules:    {} default, {} external -> {} total",
            self.rules.default, self.rules.external, self.rules.total
        ));
        if self.resolution == Resolution::Merged {
            lines.push(format!(
                "            {} added, {} merged, {} unchanged",
                self.rules.added, self.rules.merged, self.rules.unchanged
            ));
            let p = &self.patterns;
            if p.added + p.updated + p.combined > 0 {
                lines.push(format!(
                    "  Patterns: {} added, {} updated, {} combined",
                    p.added, p.updated, p.combined
                ));
            }
        }
        if !self.overridden_keys.is_empty() {
            lines.push(format!("  Settings: {}", self.overridden_keys.join(", ")));
        }
        for dup in &self.duplicate_ids {
            lines.push(format!(
                "  Warning: rule id '{}' appears {} times in {} config; {}",
                dup.id,
                dup.occurrences,
                dup.side,
                dup.effect()
            ));
        }
        if let Some(ref path) = self.output_path {
            lines.push(String::new());
            lines.push(format!("Wrote: {}", path));
        }

        lines.join("\n")
    }
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
