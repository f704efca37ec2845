//! Test fixtures for merge scenarios
//!
//! JSON documents under `tests/fixtures/documents`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Directory holding the fixture documents
pub fn documents_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/documents")
}

/// Path to a fixture document
pub fn document_path(name: &str) -> PathBuf {
    documents_dir().join(name)
}

/// Load and parse a fixture document
pub fn load(name: &str) -> Value {
    let contents = fs::read_to_string(document_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", name, e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", name, e))
}
