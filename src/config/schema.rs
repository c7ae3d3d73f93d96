//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `posanon.toml`.

use crate::adapters::encoding;
use crate::adapters::tabular::{self, ReadOptions, WriteOptions};
use crate::anonymization::{AnonymizationConfig, AuditConfig};
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main posanon configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PosanonConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input file settings
    #[serde(default)]
    pub input: InputConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Client sampling and substitution settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Audit log settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PosanonConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.anonymization.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (anonymize and report, but don't write the output file)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Input file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Point-of-sale CSV export; can also be given on the command line
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Zero-based index of the header line
    #[serde(default = "default_header_row")]
    pub header_row: usize,

    /// Encoding label, or "auto" to detect
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: default_delimiter(),
            header_row: default_header_row(),
            encoding: default_encoding(),
        }
    }
}

impl InputConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        tabular::delimiter_byte(&self.delimiter).map_err(|e| e.to_string())?;
        if !encoding::is_known_label(&self.encoding) {
            return Err(format!("Unknown input encoding '{}'", self.encoding));
        }
        Ok(())
    }

    /// Reader settings derived from this section
    pub fn read_options(&self) -> Result<ReadOptions> {
        Ok(ReadOptions {
            delimiter: tabular::delimiter_byte(&self.delimiter)?,
            header_row: self.header_row,
            encoding: self.encoding.clone(),
        })
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file; defaults to `Filtered_<input file name>` next to the input
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Write a UTF-8 byte-order mark
    #[serde(default = "default_true")]
    pub bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: default_delimiter(),
            bom: true,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        tabular::delimiter_byte(&self.delimiter).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Writer settings derived from this section
    pub fn write_options(&self) -> Result<WriteOptions> {
        Ok(WriteOptions {
            delimiter: tabular::delimiter_byte(&self.delimiter)?,
            bom: self.bom,
        })
    }

    /// Configured output path, or the default derived from `input`
    pub fn resolve_path(&self, input: &Path) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| tabular::default_output_path(input))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_header_row() -> usize {
    1
}

fn default_encoding() -> String {
    encoding::AUTO.to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
