//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: it applies CLI overrides
//! on top of the configuration and runs the [`AnonymizationPipeline`].

use crate::cli::commands::load_or_default;
use crate::config::PosanonConfig;
use crate::core::AnonymizationPipeline;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Point-of-sale CSV export to anonymize
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (default: Filtered_<input file name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for removal sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed for vendor and name draws (random when omitted)
    #[arg(long)]
    pub assignment_seed: Option<u64>,

    /// Fraction of distinct clients to remove (0.0 - 1.0)
    #[arg(long)]
    pub fraction: Option<f64>,

    /// JSON file with `last_names` and `first_names` arrays
    #[arg(long)]
    pub name_pool: Option<PathBuf>,

    /// Column to drop before anonymizing (repeatable)
    #[arg(long)]
    pub drop_column: Vec<String>,

    /// Anonymize and report without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymize command");

        let mut config = match load_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(e.exit_code());
            }
        };

        self.apply_overrides(&mut config);

        // Bad anonymization parameters are data errors, not configuration errors
        if let Err(e) = config.anonymization.validate() {
            eprintln!("❌ {e}");
            return Ok(e.exit_code());
        }

        if let Err(e) = config.validate() {
            eprintln!("❌ Invalid configuration: {e}");
            return Ok(2);
        }

        let pipeline = match AnonymizationPipeline::new(config) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                tracing::error!(error = %e, "Failed to prepare anonymization");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        match pipeline.run() {
            Ok(summary) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!("{}", summary.format_console());
                }
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Anonymization failed");
                eprintln!("❌ {e}");
                Ok(e.exit_code())
            }
        }
    }

    /// Apply command-line values on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut PosanonConfig) {
        if let Some(input) = &self.input {
            config.input.path = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(seed) = self.seed {
            tracing::info!(seed, "Overriding removal seed from CLI");
            config.anonymization.seed = seed;
        }
        if let Some(seed) = self.assignment_seed {
            config.anonymization.assignment_seed = Some(seed);
        }
        if let Some(fraction) = self.fraction {
            tracing::info!(fraction, "Overriding removal fraction from CLI");
            config.anonymization.removal_fraction = fraction;
        }
        if let Some(name_pool) = &self.name_pool {
            config.anonymization.name_pool = name_pool.clone();
        }
        if !self.drop_column.is_empty() {
            config.anonymization.drop_columns = self.drop_column.clone();
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args() -> AnonymizeArgs {
        AnonymizeArgs {
            input: None,
            output: None,
            seed: None,
            assignment_seed: None,
            fraction: None,
            name_pool: None,
            drop_column: Vec::new(),
            dry_run: false,
            json: false,
        }
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = PosanonConfig::default();
        args().apply_overrides(&mut config);
        assert_eq!(config.anonymization.seed, 42);
        assert!(config.input.path.is_none());
        assert!(!config.application.dry_run);
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = PosanonConfig::default();
        let args = AnonymizeArgs {
            input: Some(PathBuf::from("2023.csv")),
            seed: Some(1),
            assignment_seed: Some(2),
            fraction: Some(0.25),
            drop_column: vec!["Email".to_string()],
            dry_run: true,
            ..args()
        };

        args.apply_overrides(&mut config);

        assert_eq!(config.input.path, Some(PathBuf::from("2023.csv")));
        assert_eq!(config.anonymization.seed, 1);
        assert_eq!(config.anonymization.assignment_seed, Some(2));
        assert_eq!(config.anonymization.removal_fraction, 0.25);
        assert_eq!(config.anonymization.drop_columns, vec!["Email"]);
        assert!(config.application.dry_run);
    }

    #[test]
    fn test_out_of_range_fraction_is_data_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(&config_path, "").unwrap();

        let args = AnonymizeArgs {
            input: Some(dir.path().join("2023.csv")),
            fraction: Some(1.5),
            ..args()
        };

        let code = args.execute(config_path.to_str().unwrap()).unwrap();
        assert_eq!(code, 3);
    }
}
