//! Reading input documents with provenance
//!
//! Each document is read once; the SHA-256 digest of its raw bytes is kept so
//! a summary can say exactly which inputs produced the output.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use secretlint_rule_merge::Side;

use super::ConfigError;

/// A contributing document with provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    /// Which side of the merge this document is
    pub origin: Side,

    /// File path as given
    pub path: String,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// Result of reading a document that exists
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    /// Parsed JSON document
    Document(Value),
    /// File holds nothing but whitespace
    Empty,
}

/// Read and parse a JSON document.
///
/// A missing file is reported as [`ConfigError::NotFound`] so callers can
/// decide whether that is fatal.
pub fn load_document(path: &Path, origin: Side) -> Result<(Loaded, DocumentSource), ConfigError> {
    let display = path.display().to_string();

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            origin,
            path: display.clone(),
        },
        _ => ConfigError::Io {
            path: display.clone(),
            source: e,
        },
    })?;

    let source = DocumentSource {
        origin,
        path: display.clone(),
        digest: digest(&bytes),
    };

    let contents = String::from_utf8(bytes).map_err(|e| ConfigError::Parse {
        path: display.clone(),
        message: format!("Invalid UTF-8: {}", e),
    })?;

    if contents.trim().is_empty() {
        return Ok((Loaded::Empty, source));
    }

    let value: Value = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: display,
        message: format!("JSON parse error: {}", e),
    })?;

    Ok((Loaded::Document(value), source))
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
