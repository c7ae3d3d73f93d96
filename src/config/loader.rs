//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PosanonConfig;
use crate::domain::errors::PosanonError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PosanonConfig
/// 4. Applies environment variable overrides (POSANON_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PosanonError::Configuration`] if any of these steps fails.
///
/// # Examples
///
/// ```no_run
/// use posanon::config::loader::load_config;
///
/// let config = load_config("posanon.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PosanonConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(PosanonError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        PosanonError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text (substitution, overrides and validation included)
pub fn load_config_from_str(contents: &str) -> Result<PosanonConfig> {
    // Perform environment variable substitution
    let contents = substitute_env_vars(contents)?;

    // Parse TOML
    let mut config: PosanonConfig = toml::from_str(&contents)?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config)?;

    // Validate configuration
    config.validate().map_err(|e| {
        PosanonError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PosanonError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PosanonError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using POSANON_* prefix
///
/// Environment variables follow the pattern: POSANON_<SECTION>_<KEY>
/// For example: POSANON_INPUT_PATH, POSANON_ANONYMIZATION_SEED
fn apply_env_overrides(config: &mut PosanonConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("POSANON_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("POSANON_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Input overrides
    if let Ok(val) = std::env::var("POSANON_INPUT_PATH") {
        config.input.path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("POSANON_INPUT_ENCODING") {
        config.input.encoding = val;
    }
    if let Ok(val) = std::env::var("POSANON_INPUT_HEADER_ROW") {
        config.input.header_row = val.parse().map_err(|_| {
            PosanonError::Configuration(format!("Invalid POSANON_INPUT_HEADER_ROW value: {val}"))
        })?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("POSANON_OUTPUT_PATH") {
        config.output.path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("POSANON_OUTPUT_BOM") {
        config.output.bom = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("POSANON_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("POSANON_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    config.anonymization.apply_env_overrides()?;
    config.audit.apply_env_overrides()?;

    Ok(())
}
