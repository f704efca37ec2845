//! Loading, fallback and output tests
//!
//! Runs `EffectiveConfig` against fixture files and temp directories.

mod fixtures;

use std::fs;

use secretlint_config_merge::{ConfigError, EffectiveConfig, MergeSummary, Resolution, Side};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn test_merge_fixture_files() {
    let config = EffectiveConfig::build(
        &fixtures::document_path("default.json"),
        Some(&fixtures::document_path("external.json")),
    )
    .unwrap();

    assert_eq!(config.resolution, Resolution::Merged);
    assert_eq!(config.config, fixtures::load("expected_merged.json"));
    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.sources[1].origin, Side::External);
}

#[test]
fn test_settings_only_external() {
    let config = EffectiveConfig::build(
        &fixtures::document_path("default.json"),
        Some(&fixtures::document_path("settings_only.json")),
    )
    .unwrap();

    let default = fixtures::load("default.json");
    assert_eq!(config.resolution, Resolution::NoExternalRules);
    assert_eq!(config.config["rules"], default["rules"]);
    assert_eq!(config.config["messages"], "en");
    assert_eq!(config.config["version"], 1);
}

#[test]
fn test_empty_external_fixture() {
    let config = EffectiveConfig::build(
        &fixtures::document_path("default.json"),
        Some(&fixtures::document_path("empty.json")),
    )
    .unwrap();

    assert_eq!(config.resolution, Resolution::ExternalEmpty);
    assert_eq!(config.config, fixtures::load("default.json"));
}

#[test]
fn test_missing_default_fails() {
    let dir = TempDir::new().unwrap();
    let result = EffectiveConfig::build(&dir.path().join("absent.json"), None);

    assert!(matches!(
        result,
        Err(ConfigError::NotFound {
            origin: Side::Default,
            ..
        })
    ));
}

#[test]
fn test_written_output_round_trips() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join(".secretlintrc.json");

    let config = EffectiveConfig::build(
        &fixtures::document_path("default.json"),
        Some(&fixtures::document_path("external.json")),
    )
    .unwrap();
    config.write_to_file(&out).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.ends_with("}\n"));
    assert!(written.contains("\n  \"rules\": ["));

    let reparsed: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(reparsed, config.config);
}

#[test]
fn test_summary_for_fixture_merge() {
    let config = EffectiveConfig::build(
        &fixtures::document_path("default.json"),
        Some(&fixtures::document_path("external.json")),
    )
    .unwrap();

    let summary = MergeSummary::from_effective(&config, Some(".secretlintrc.json"));

    assert_eq!(summary.rules.default, 2);
    assert_eq!(summary.rules.external, 2);
    assert_eq!(summary.rules.added, 1);
    assert_eq!(summary.rules.merged, 1);
    assert_eq!(summary.rules.total, 3);
    assert_eq!(summary.patterns.added, 1);
    assert_eq!(summary.patterns.updated, 1);
    assert_eq!(summary.patterns.combined, 1);

    let text = summary.to_human();
    assert!(text.contains("default:"));
    assert!(text.contains("external:"));
}
