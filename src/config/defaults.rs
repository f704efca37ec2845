//! Built-in defaults
//!
//! Conventional locations of the default document and the merged output.
//! Command-line flags override both.

use std::path::{Path, PathBuf};

/// Default document location, relative to the working directory
pub const DEFAULT_DOCUMENT_PATH: &str = ".secretlint/secretlintrc.default.json";

/// Merged output location, relative to the working directory
pub const OUTPUT_PATH: &str = ".secretlintrc.json";

/// Built-in path defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDefaults {
    /// Path of the default document
    pub default_path: PathBuf,

    /// Path the merged document is written to
    pub output_path: PathBuf,
}

impl Default for MergeDefaults {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl MergeDefaults {
    /// Apply command-line overrides on top of the defaults
    pub fn with_overrides(mut self, default_path: Option<PathBuf>, output_path: Option<PathBuf>) -> Self {
        if let Some(path) = default_path {
            self.default_path = path;
        }
        if let Some(path) = output_path {
            self.output_path = path;
        }
        self
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
