//! Anonymization configuration

use crate::domain::{PosanonError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Marker used by the point-of-sale software for anonymous walk-in sales
pub const DEFAULT_SENTINEL: &str = "PASSAGE passage";

/// Settings for client sampling and vendor/name substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Fraction of distinct clients removed from the output (0.0 - 1.0)
    #[serde(default = "default_removal_fraction")]
    pub removal_fraction: f64,

    /// Seed for removal sampling
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Seed for vendor and name draws; entropy when unset
    #[serde(default)]
    pub assignment_seed: Option<u64>,

    /// Column holding the client identity
    #[serde(default = "default_client_column")]
    pub client_column: String,

    /// Column holding the vendor reference
    #[serde(default = "default_vendor_column")]
    pub vendor_column: String,

    /// Client value denoting walk-in sales
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Substitute vendor codes
    #[serde(default = "default_vendor_pool")]
    pub vendor_pool: Vec<String>,

    /// Path to the JSON name pool (`last_names` / `first_names`)
    #[serde(default = "default_name_pool")]
    pub name_pool: PathBuf,

    /// Columns removed before anonymization
    #[serde(default)]
    pub drop_columns: Vec<String>,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            removal_fraction: default_removal_fraction(),
            seed: default_seed(),
            assignment_seed: None,
            client_column: default_client_column(),
            vendor_column: default_vendor_column(),
            sentinel: default_sentinel(),
            vendor_pool: default_vendor_pool(),
            name_pool: default_name_pool(),
            drop_columns: Vec::new(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    ///
    /// Pool contents are checked when the pools are built, not here, so that an
    /// empty pool surfaces as [`PosanonError::EmptyPool`].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.removal_fraction) {
            return Err(PosanonError::Validation(format!(
                "removal_fraction must be between 0.0 and 1.0, got {}",
                self.removal_fraction
            )));
        }
        if self.client_column.trim().is_empty() {
            return Err(PosanonError::Validation(
                "client_column cannot be empty".to_string(),
            ));
        }
        if self.vendor_column.trim().is_empty() {
            return Err(PosanonError::Validation(
                "vendor_column cannot be empty".to_string(),
            ));
        }
        if self.client_column == self.vendor_column {
            return Err(PosanonError::Validation(format!(
                "client_column and vendor_column must differ, both are '{}'",
                self.client_column
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("POSANON_ANONYMIZATION_REMOVAL_FRACTION") {
            self.removal_fraction = val.parse().map_err(|_| {
                PosanonError::Configuration(format!(
                    "Invalid POSANON_ANONYMIZATION_REMOVAL_FRACTION value: {val}"
                ))
            })?;
        }

        if let Ok(val) = std::env::var("POSANON_ANONYMIZATION_SEED") {
            self.seed = val.parse().map_err(|_| {
                PosanonError::Configuration(format!(
                    "Invalid POSANON_ANONYMIZATION_SEED value: {val}"
                ))
            })?;
        }

        if let Ok(val) = std::env::var("POSANON_ANONYMIZATION_ASSIGNMENT_SEED") {
            self.assignment_seed = Some(val.parse().map_err(|_| {
                PosanonError::Configuration(format!(
                    "Invalid POSANON_ANONYMIZATION_ASSIGNMENT_SEED value: {val}"
                ))
            })?);
        }

        if let Ok(val) = std::env::var("POSANON_ANONYMIZATION_NAME_POOL") {
            self.name_pool = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("POSANON_ANONYMIZATION_VENDOR_POOL") {
            self.vendor_pool = split_list(&val);
        }

        if let Ok(val) = std::env::var("POSANON_ANONYMIZATION_DROP_COLUMNS") {
            self.drop_columns = split_list(&val);
        }

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("POSANON_AUDIT_ENABLED") {
            self.enabled = val.parse().map_err(|_| {
                PosanonError::Configuration(format!("Invalid POSANON_AUDIT_ENABLED value: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("POSANON_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("POSANON_AUDIT_JSON_FORMAT") {
            self.json_format = val.parse().map_err(|_| {
                PosanonError::Configuration(format!(
                    "Invalid POSANON_AUDIT_JSON_FORMAT value: {val}"
                ))
            })?;
        }

        Ok(())
    }
}

/// Splits a comma-separated list, dropping blanks
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_removal_fraction() -> f64 {
    0.5
}

fn default_seed() -> u64 {
    42
}

fn default_client_column() -> String {
    "Client".to_string()
}

fn default_vendor_column() -> String {
    "RefVendeur".to_string()
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

fn default_vendor_pool() -> Vec<String> {
    ["V001", "V002", "V003", "V004", "V005"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_name_pool() -> PathBuf {
    PathBuf::from("names.json")
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/posanon.log")
}

fn default_audit_json_format() -> bool {
    true
}
