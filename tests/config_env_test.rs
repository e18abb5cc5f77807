//! HUFFCODE_* environment overrides.
//!
//! Kept in its own test binary, and in a single test, because it mutates the
//! process environment.

use std::fs;

use tempfile::TempDir;

use huffcode::config::Settings;

#[test]
fn given_env_vars_when_load_then_override_config_file() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huffcode.toml");
    fs::write(&path, "delimiter = \",\"\nshow_frequencies = true\n").unwrap();
    std::env::set_var("HUFFCODE_DELIMITER", "|");
    std::env::set_var("HUFFCODE_SHOW_FREQUENCIES", "false");

    // Act
    let settings = Settings::load(Some(&path));

    // Cleanup
    std::env::remove_var("HUFFCODE_DELIMITER");
    std::env::remove_var("HUFFCODE_SHOW_FREQUENCIES");

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.delimiter, '|');
    assert!(!settings.show_frequencies);
    assert_eq!(settings.separator, ':');

    // Act: an env value that is not a single character is rejected
    std::env::set_var("HUFFCODE_SEPARATOR", "==");
    let result = Settings::load(Some(&path));
    std::env::remove_var("HUFFCODE_SEPARATOR");

    // Assert
    let err = result.unwrap_err();
    assert!(err.to_string().contains("HUFFCODE_SEPARATOR"));
}
