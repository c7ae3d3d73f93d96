//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file and the pools it references.

use crate::anonymization::{NamePool, VendorPool};
use crate::cli::commands::load_or_default;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates the schema
        let config = match load_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let anonymization = &config.anonymization;

        if let Err(e) = VendorPool::new(anonymization.vendor_pool.clone()) {
            println!("❌ {e}");
            return Ok(e.exit_code());
        }
        println!("✅ Vendor pool: {} codes", anonymization.vendor_pool.len());

        if let Err(e) = NamePool::from_file(&anonymization.name_pool) {
            println!("❌ Name pool {}: {e}", anonymization.name_pool.display());
            return Ok(e.exit_code());
        }
        println!("✅ Name pool: {}", anonymization.name_pool.display());

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        match &config.input.path {
            Some(path) => println!("  Input: {}", path.display()),
            None => println!("  Input: (pass --input)"),
        }
        println!("  Delimiter: '{}'", config.input.delimiter);
        println!("  Header Row: {}", config.input.header_row);
        println!("  Encoding: {}", config.input.encoding);
        println!("  Removal Fraction: {}", anonymization.removal_fraction);
        println!("  Seed: {}", anonymization.seed);
        println!("  Client Column: {}", anonymization.client_column);
        println!("  Vendor Column: {}", anonymization.vendor_column);
        println!("  Walk-in Marker: {}", anonymization.sentinel);
        println!("  Drop Columns: {:?}", anonymization.drop_columns);
        println!("  Audit Log: {}", config.audit.enabled);
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_missing_explicit_file() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/custom.toml").unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_validate_empty_vendor_pool() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[anonymization]\nvendor_pool = []\n").unwrap();

        let code = ValidateArgs {}.execute(path.to_str().unwrap()).unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn test_validate_complete() {
        let dir = tempdir().unwrap();
        let names = dir.path().join("names.json");
        fs::write(&names, r#"{"last_names": ["A"], "first_names": ["B"]}"#).unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            format!(
                "[anonymization]\nname_pool = {:?}\n",
                names.to_string_lossy()
            ),
        )
        .unwrap();

        let code = ValidateArgs {}.execute(path.to_str().unwrap()).unwrap();
        assert_eq!(code, 0);
    }
}
