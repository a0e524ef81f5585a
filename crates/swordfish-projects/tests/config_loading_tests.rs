//! Config file loading tests.

use std::io::Write;

use swordfish_projects::{load_view_config, ConfigError, ViewConfig};
use tempfile::NamedTempFile;

#[test]
fn test_load_view_config_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{ "chromeAllowance": 90, "dateMinWidth": 140, "logging": {{ "filter": "debug", "json": true }} }}"#
    )
    .expect("Failed to write config");

    let config = load_view_config(file.path()).expect("config should load");
    assert_eq!(config.chrome_allowance, 90);
    assert_eq!(config.date_min_width, 140);
    assert_eq!(config.logging.filter, "debug");
    assert!(config.logging.json);
    assert_eq!(config.row_style().date_min_width, 140);
}

#[test]
fn test_load_view_config_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing.json");

    let result = load_view_config(&path);
    match result {
        Err(ConfigError::ReadFile { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ReadFile error, got {:?}", other),
    }
}

#[test]
fn test_config_round_trips_through_json() {
    let config = ViewConfig::default();
    let json = serde_json::to_string(&config).expect("serialize");
    assert!(json.contains("\"chromeAllowance\":65"));
}
