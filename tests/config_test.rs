//! Integration tests for Settings config loading.
//!
//! These tests use an explicit local config file only; they do not set
//! HUFFCODE_* variables so they can run in parallel with other tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use huffcode::application::ApplicationError;
use huffcode::config::Settings;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("huffcode.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
delimiter = ","
show_frequencies = false
"#,
    );

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.delimiter, ',');
    assert!(!settings.show_frequencies);
    assert_eq!(settings.separator, ':', "unspecified field keeps its default");
}

#[test]
fn given_missing_local_config_when_load_then_errors() {
    let result = Settings::load(Some(Path::new("/nonexistent/huffcode.toml")));
    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "delimiter = [\n");

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_multi_char_delimiter_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "delimiter = \";;\"\n");

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_clashing_delimiter_and_separator_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "delimiter = \":\"\n");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("must differ"));
}
