//! Configuration for clockzone.
//!
//! Load extrapolation and dump settings from TOML or YAML so analyses can be
//! tuned without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use clockzone_config::ZoneConfig;
//!
//! let config = ZoneConfig::from_toml_str(r#"
//!     log_filter = "clockzone_zone=debug"
//!
//!     [extrapolation]
//!     max_constant = 10
//!
//!     [dump]
//!     convert = true
//!     show_strictness = true
//! "#).unwrap();
//!
//! assert_eq!(config.max_constant(), Some(10));
//! assert_eq!(config.dump.column_width, 14);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use clockzone_config::ZoneConfig;
//!
//! let config = ZoneConfig::load("clockzone.toml").unwrap_or_default();
//! assert_eq!(config.max_constant(), None);
//! ```

use std::path::Path;

use clockzone_zone::DumpOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main zone engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ZoneConfig {
    /// Maximal-bounds extrapolation.
    #[serde(default)]
    pub extrapolation: ExtrapolationConfig,

    /// Diagnostic dump layout.
    #[serde(default)]
    pub dump: DumpConfig,

    /// `EnvFilter` directive for console logging.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl ZoneConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Sets the extrapolation constant.
    pub fn with_max_constant(mut self, constant: i32) -> Self {
        self.extrapolation.max_constant = Some(constant);
        self
    }

    /// Replaces the dump section.
    pub fn with_dump(mut self, dump: DumpConfig) -> Self {
        self.dump = dump;
        self
    }

    /// Returns the extrapolation constant, if configured.
    ///
    /// Feed it to `Zone::extrapolate_with`.
    pub fn max_constant(&self) -> Option<i32> {
        self.extrapolation.max_constant
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if let Some(constant) = self.extrapolation.max_constant {
            if constant < 0 {
                return Err(ConfigError::Invalid(format!(
                    "extrapolation.max_constant must be non-negative, got {}",
                    constant
                )));
            }
        }
        if self.dump.column_width == 0 {
            return Err(ConfigError::Invalid(
                "dump.column_width must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Extrapolation configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtrapolationConfig {
    /// Constant applied to every clock; `None` disables extrapolation.
    pub max_constant: Option<i32>,
}

/// Dump configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DumpConfig {
    /// Decode raw entries to bound values.
    pub convert: bool,

    /// Append strictness markers.
    pub show_strictness: bool,

    /// Minimum column width.
    pub column_width: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self::from(DumpOptions::default())
    }
}

impl DumpConfig {
    /// Returns the equivalent dump options for `Zone::dump`.
    pub fn to_options(&self) -> DumpOptions {
        DumpOptions {
            convert: self.convert,
            show_strictness: self.show_strictness,
            column_width: self.column_width,
        }
    }
}

impl From<DumpOptions> for DumpConfig {
    fn from(options: DumpOptions) -> Self {
        Self {
            convert: options.convert,
            show_strictness: options.show_strictness,
            column_width: options.column_width,
        }
    }
}
