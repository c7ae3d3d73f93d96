//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod anonymize;
pub mod init;
pub mod validate;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::config::{load_config, load_config_from_str, PosanonConfig};
use crate::domain::Result;
use std::path::Path;

/// Load the configuration file, or defaults when the default file is absent
///
/// An explicitly named file that does not exist is still an error.
pub fn load_or_default(config_path: &str) -> Result<PosanonConfig> {
    if config_path == DEFAULT_CONFIG_PATH && !Path::new(config_path).exists() {
        tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
        return load_config_from_str("");
    }
    load_config(config_path)
}
