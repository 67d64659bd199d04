//! Tests for YAML configuration loading and parsing

use api_changelog::{ChangelogConfig, ChangelogError};

#[test]
fn test_load_yaml_config() {
    let yaml_content = r#"
changelog:
  title: Payments API Changelog
  ignore_properties:
    - description
    - x-internal
  date_format: "%d.%m.%Y"
"#;

    let config = ChangelogConfig::from_yaml_str(yaml_content).unwrap();

    assert_eq!(config.title, "Payments API Changelog");
    assert_eq!(config.ignore_properties, vec!["description", "x-internal"]);
    assert_eq!(config.date_format, "%d.%m.%Y");
}

#[test]
fn test_load_minimal_yaml_config() {
    let yaml_content = r#"
changelog:
  title: Minimal
"#;

    let config = ChangelogConfig::from_yaml_str(yaml_content).unwrap();

    assert_eq!(config.title, "Minimal");
    assert!(config.ignore_properties.is_empty());
    assert_eq!(config.date_format, "%Y-%m-%d");
}

#[test]
fn test_missing_section_yields_defaults() {
    let config = ChangelogConfig::from_yaml_str("other_tool:\n  enabled: true\n").unwrap();
    assert_eq!(config, ChangelogConfig::default());
    assert_eq!(config.title, "API Changelog");
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = ChangelogConfig::from_yaml_str("changelog:\n  ignore_properties: 42\n").unwrap_err();
    assert!(err.to_string().starts_with("failed to load configuration"));

    let err = ChangelogConfig::from_yaml_file("tests/data/no_such_config.yaml").unwrap_err();
    assert!(err.to_string().contains("no_such_config.yaml"));
}

#[test]
fn test_load_config_file() {
    let config = ChangelogConfig::from_yaml_file("tests/data/changelog_config.yaml").unwrap();
    assert_eq!(config.title, "Petstore Changelog");
    assert_eq!(config.ignore_properties, vec!["summary", "version"]);
}

#[test]
fn test_unknown_date_specifier_is_rejected() {
    let yaml_content = r#"
changelog:
  date_format: "%Q"
"#;

    let err = ChangelogConfig::from_yaml_str(yaml_content).unwrap_err();
    assert!(matches!(err, ChangelogError::Config { .. }));
    assert!(err.to_string().contains("%Q"));
}
