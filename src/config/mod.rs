//! Configuration loading and resolution
//!
//! Reads the default and external documents, picks the fallback or merge
//! path, and writes the merged result.

mod defaults;
mod effective;
mod source;

pub use defaults::{MergeDefaults, DEFAULT_DOCUMENT_PATH, OUTPUT_PATH};
pub use effective::{EffectiveConfig, Resolution};
pub use source::{load_document, DocumentSource, Loaded};

use secretlint_rule_merge::{MergeError, Side};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{origin} config not found: {path}")]
    NotFound { origin: Side, path: String },

    #[error("{origin} config is empty: {path}")]
    Empty { origin: Side, path: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
