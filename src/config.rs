//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/huffcode/huffcode.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `HUFFCODE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt};

/// Unified configuration for huffcode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separates `symbol:freq` tokens (default `;`)
    pub delimiter: char,
    /// Separates a symbol from its frequency (default `:`)
    pub separator: char,
    /// Print the parsed frequency list before the codes
    pub show_frequencies: bool,
    /// Colorize terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: ';',
            separator: ':',
            show_frequencies: true,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<char>,
    pub separator: Option<char>,
    pub show_frequencies: Option<bool>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for huffcode.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "huffcode").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("huffcode.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            separator: overlay.separator.unwrap_or(self.separator),
            show_frequencies: overlay.show_frequencies.unwrap_or(self.show_frequencies),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional config file; unlike the global file it must exist
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(local_path) = local_config {
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply HUFFCODE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("HUFFCODE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = single_char("HUFFCODE_DELIMITER", &val)?;
        }
        if let Ok(val) = config.get_string("separator") {
            settings.separator = single_char("HUFFCODE_SEPARATOR", &val)?;
        }
        if let Ok(val) = config.get_bool("show_frequencies") {
            settings.show_frequencies = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Delimiter and separator must be distinct, visible characters.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.delimiter == self.separator {
            return Err(ApplicationError::Config {
                message: format!(
                    "delimiter and separator must differ (both are {:?})",
                    self.delimiter
                ),
            });
        }
        for (name, c) in [("delimiter", self.delimiter), ("separator", self.separator)] {
            if c.is_whitespace() {
                return Err(ApplicationError::Config {
                    message: format!("{name} must not be whitespace"),
                });
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# huffcode configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/huffcode/huffcode.toml
#   Local:  file given with --config
#   Env:    HUFFCODE_* environment variables

# Separator between symbol:freq tokens
# delimiter = ";"

# Separator between a symbol and its frequency
# separator = ":"

# Print the frequency list before the code table
# show_frequencies = true

# Colorize output (NO_COLOR is honoured regardless)
# color = true
"#
        .to_string()
    }
}

fn single_char(name: &str, value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("{name} must be a single character, got {value:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
