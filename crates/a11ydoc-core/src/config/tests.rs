//! Tests for settings loading

use std::path::PathBuf;

use super::*;

#[test]
fn test_load_config_from_toml() {
    let toml = r#"
[analysis]
disabled = ["images", "links"]
parallel = true

[sections]
template = "/etc/a11ydoc/sections.toml"

[annotation]
enabled = false
"#;

    let settings = Settings::from_toml_str(toml).unwrap();

    assert_eq!(settings.analysis.disabled, vec!["images", "links"]);
    assert!(settings.analysis.parallel);
    assert_eq!(
        settings.sections.template,
        Some(PathBuf::from("/etc/a11ydoc/sections.toml"))
    );
    assert!(!settings.annotation.enabled);
}

#[test]
fn test_empty_config_uses_defaults() {
    let settings = Settings::from_toml_str("").unwrap();
    assert_eq!(settings, Settings::default());
    assert!(!settings.analysis.parallel);
    assert!(settings.annotation.enabled);
    assert!(settings.sections.template.is_none());
}

#[test]
fn test_partial_config_uses_defaults() {
    let settings = Settings::from_toml_str("[analysis]\nparallel = true\n").unwrap();
    assert!(settings.analysis.parallel);
    assert!(settings.analysis.disabled.is_empty());
    assert!(settings.annotation.enabled);
}

#[test]
fn test_invalid_type_rejected() {
    let result = Settings::from_toml_str("[analysis]\nparallel = \"yes\"\n");
    assert!(result.is_err());
}

#[test]
fn test_relative_template_resolved_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a11ydoc.toml");
    std::fs::write(&path, "[sections]\ntemplate = \"sections.toml\"\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(
        settings.sections.template,
        Some(dir.path().join("sections.toml"))
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, crate::error::TemplateError::Io { .. }));
}
