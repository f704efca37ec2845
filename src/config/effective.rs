//! Effective configuration
//!
//! Resolves the default and external documents into the merged output,
//! handling the fallbacks that bypass rule merging:
//! - no external document given
//! - external document missing or empty
//! - external document without rules (only its other top-level keys apply)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use secretlint_rule_merge::{empty_document, has_rules, merge_config, MergeOutcome, MergeReport, Side};

use super::source::{load_document, DocumentSource, Loaded};
use super::ConfigError;

/// How the output was produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// No external document was given
    DefaultOnly,
    /// External path does not exist
    ExternalMissing,
    /// External file is empty
    ExternalEmpty,
    /// External document has no rules; only its other keys were applied
    NoExternalRules,
    /// Rules were merged
    Merged,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::DefaultOnly => "default_only",
            Resolution::ExternalMissing => "external_missing",
            Resolution::ExternalEmpty => "external_empty",
            Resolution::NoExternalRules => "no_external_rules",
            Resolution::Merged => "merged",
        }
    }

    /// Human description
    pub fn describe(&self) -> &'static str {
        match self {
            Resolution::DefaultOnly => "No external config given; using default config",
            Resolution::ExternalMissing => "External config not found; using default config",
            Resolution::ExternalEmpty => "External config is empty; using default config",
            Resolution::NoExternalRules => {
                "External config has no rules; applied its top-level settings to default config"
            }
            Resolution::Merged => "Merged external rules into default config",
        }
    }

    /// True when the external document was wanted but could not be used
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::ExternalMissing | Resolution::ExternalEmpty)
    }
}

/// Merged configuration with provenance
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    /// How the output was produced
    pub resolution: Resolution,

    /// The merged document
    pub config: Value,

    /// Contributing documents, default first
    pub sources: Vec<DocumentSource>,

    /// What the merge did
    pub report: MergeReport,
}

impl EffectiveConfig {
    /// Load the default document and the optional external document and
    /// merge them.
    pub fn build(default_path: &Path, external_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (default, default_source) = match load_document(default_path, Side::Default)? {
            (Loaded::Document(doc), source) => (doc, source),
            (Loaded::Empty, source) => {
                return Err(ConfigError::Empty {
                    origin: Side::Default,
                    path: source.path,
                })
            }
        };
        let mut sources = vec![default_source];

        let Some(external_path) = external_path else {
            return Self::resolve(Resolution::DefaultOnly, &default, &empty_document(), sources);
        };

        let external = match load_document(external_path, Side::External) {
            Ok((Loaded::Document(doc), source)) => {
                sources.push(source);
                doc
            }
            Ok((Loaded::Empty, source)) => {
                tracing::warn!(path = %source.path, "external config is empty");
                sources.push(source);
                return Self::resolve(Resolution::ExternalEmpty, &default, &empty_document(), sources);
            }
            Err(ConfigError::NotFound { path, .. }) => {
                tracing::warn!(path = %path, "external config not found");
                return Self::resolve(Resolution::ExternalMissing, &default, &empty_document(), sources);
            }
            Err(e) => return Err(e),
        };

        let resolution = if has_rules(&external) {
            Resolution::Merged
        } else {
            Resolution::NoExternalRules
        };
        Self::resolve(resolution, &default, &external, sources)
    }

    /// Build from documents already in memory.
    pub fn from_documents(default: &Value, external: Option<&Value>) -> Result<Self, ConfigError> {
        let (resolution, external) = match external {
            None => (Resolution::DefaultOnly, empty_document()),
            Some(doc) if has_rules(doc) => (Resolution::Merged, doc.clone()),
            Some(doc) => (Resolution::NoExternalRules, doc.clone()),
        };
        Self::resolve(resolution, default, &external, Vec::new())
    }

    fn resolve(
        resolution: Resolution,
        default: &Value,
        external: &Value,
        sources: Vec<DocumentSource>,
    ) -> Result<Self, ConfigError> {
        let MergeOutcome { config, report } = merge_config(default, external)?;

        tracing::debug!(
            resolution = resolution.as_str(),
            rules = report.total_rules(),
            "resolved effective config"
        );

        Ok(Self {
            resolution,
            config,
            sources,
            report,
        })
    }

    /// Number of rules in the merged document
    pub fn rule_count(&self) -> usize {
        secretlint_rule_merge::rules(&self.config).map_or(0, Vec::len)
    }

    /// Pretty-printed merged document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.config)
    }

    /// Write the merged document, creating parent directories as needed
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };

        let mut json = self.to_json().map_err(|e| ConfigError::Serialize(e.to_string()))?;
        json.push('\n');

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, json).map_err(write_err)
    }
}
