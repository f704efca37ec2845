//! secretlint config merge
//!
//! Merges a default secretlint configuration with an optional external
//! override into a single document. The merge itself lives in
//! `secretlint-rule-merge`; this crate adds loading, fallback handling,
//! output and summaries.

pub mod config;
pub mod summary;

pub use config::{ConfigError, DocumentSource, EffectiveConfig, MergeDefaults, Resolution};
pub use secretlint_rule_merge::{merge, merge_config, MergeError, MergeOutcome, MergeReport, Side};
pub use summary::MergeSummary;
