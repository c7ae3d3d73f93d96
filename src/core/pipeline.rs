//! Anonymization pipeline
//!
//! Orchestrates one run over a point-of-sale export: read and decode the
//! input, drop configured columns, anonymize, write the output and record the
//! run in the audit log.

use crate::adapters::tabular::{self, ReadOptions, WriteOptions};
use crate::anonymization::{AnonymizationEngine, AnonymizationSummary, AuditLogger};
use crate::config::PosanonConfig;
use crate::domain::{PosanonError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Summary of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Input file
    pub input: PathBuf,

    /// Output file; `None` in dry-run mode
    pub output: Option<PathBuf>,

    /// Encoding the input was decoded with
    pub encoding: String,

    /// Input rows skipped for having more fields than the header
    pub skipped_rows: usize,

    /// Columns removed before anonymization
    pub dropped_columns: Vec<String>,

    /// Whether the output write was skipped
    pub dry_run: bool,

    /// Anonymization counters
    pub anonymization: AnonymizationSummary,

    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl RunSummary {
    /// Format summary for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("📄 Input:    {} ({})\n", self.input.display(), self.encoding));
        match &self.output {
            Some(path) => output.push_str(&format!("💾 Output:   {}\n", path.display())),
            None => output.push_str("💾 Output:   (dry run, nothing written)\n"),
        }
        if !self.dropped_columns.is_empty() {
            output.push_str(&format!("🗑️  Dropped:  {}\n", self.dropped_columns.join(", ")));
        }
        if self.skipped_rows > 0 {
            output.push_str(&format!("⚠️  Skipped malformed rows: {}\n", self.skipped_rows));
        }
        output.push_str(&self.anonymization.format_console());
        output.push_str(&format!("⏱️  Completed in {} ms\n", self.duration_ms));
        output
    }
}

/// One configured anonymization run
pub struct AnonymizationPipeline {
    input: PathBuf,
    output: PathBuf,
    read_options: ReadOptions,
    write_options: WriteOptions,
    drop_columns: Vec<String>,
    dry_run: bool,
    assignment_seed: Option<u64>,
    engine: AnonymizationEngine,
    audit: AuditLogger,
}

impl AnonymizationPipeline {
    /// Build a pipeline from configuration
    ///
    /// Loads the name pool and prepares the audit log directory.
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::Configuration`] when no input file is configured,
    /// [`PosanonError::EmptyPool`] for empty pools, or an I/O / serialization
    /// error when the name pool cannot be loaded.
    pub fn new(config: PosanonConfig) -> Result<Self> {
        let input = config.input.path.clone().ok_or_else(|| {
            PosanonError::Configuration(
                "No input file: set [input] path or pass --input".to_string(),
            )
        })?;
        let output = config.output.resolve_path(&input);

        let read_options = config.input.read_options()?;
        let write_options = config.output.write_options()?;

        let drop_columns = config.anonymization.drop_columns.clone();
        let assignment_seed = config.anonymization.assignment_seed;
        let engine = AnonymizationEngine::from_config(config.anonymization)?;

        let audit = AuditLogger::new(
            config.audit.log_path.clone(),
            config.audit.json_format,
            config.audit.enabled,
        )?;

        Ok(Self {
            input,
            output,
            read_options,
            write_options,
            drop_columns,
            dry_run: config.application.dry_run,
            assignment_seed,
            engine,
            audit,
        })
    }

    /// Input file path
    pub fn input(&self) -> &PathBuf {
        &self.input
    }

    /// Output file path (written unless in dry-run mode)
    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    /// Run with the configured assignment seed, or entropy when none is set
    pub fn run(&self) -> Result<RunSummary> {
        let mut rng = match self.assignment_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Run with an explicit random source for vendor and name draws
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunSummary> {
        let start = Instant::now();
        tracing::info!(
            input = %self.input.display(),
            dry_run = self.dry_run,
            "Starting anonymization run"
        );

        let loaded = tabular::read_dataset(&self.input, &self.read_options)?;
        let mut dataset = loaded.dataset;

        let dropped_columns = dataset.drop_columns(&self.drop_columns);
        if !dropped_columns.is_empty() {
            tracing::info!(columns = ?dropped_columns, "Columns dropped");
        }

        let outcome = self.engine.anonymize(&dataset, rng)?;

        let output = if self.dry_run {
            tracing::info!("Dry-run mode, output not written");
            None
        } else {
            tabular::write_dataset(&self.output, &outcome.dataset, &self.write_options)?;
            Some(self.output.clone())
        };

        self.audit.log_run(&self.input, &outcome, self.dry_run)?;

        let summary = RunSummary {
            input: self.input.clone(),
            output,
            encoding: loaded.encoding.to_string(),
            skipped_rows: loaded.skipped_rows,
            dropped_columns,
            dry_run: self.dry_run,
            anonymization: outcome.summary,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            output_rows = summary.anonymization.output_rows,
            duration_ms = summary.duration_ms,
            "Anonymization run completed"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_input_path() {
        let result = AnonymizationPipeline::new(PosanonConfig::default());
        assert!(matches!(result, Err(PosanonError::Configuration(_))));
    }

    #[test]
    fn test_empty_vendor_pool_rejected() {
        let dir = tempdir().unwrap();
        let names = dir.path().join("names.json");
        fs::write(&names, r#"{"last_names": ["A"], "first_names": ["B"]}"#).unwrap();

        let mut config = PosanonConfig::default();
        config.input.path = Some(dir.path().join("2023.csv"));
        config.anonymization.name_pool = names;
        config.anonymization.vendor_pool = Vec::new();

        let result = AnonymizationPipeline::new(config);
        assert!(matches!(result, Err(PosanonError::EmptyPool(_))));
    }

    #[test]
    fn test_output_defaults_next_to_input() {
        let dir = tempdir().unwrap();
        let names = dir.path().join("names.json");
        fs::write(&names, r#"{"last_names": ["A"], "first_names": ["B"]}"#).unwrap();

        let mut config = PosanonConfig::default();
        config.input.path = Some(dir.path().join("2023.csv"));
        config.anonymization.name_pool = names;

        let pipeline = AnonymizationPipeline::new(config).unwrap();
        assert_eq!(pipeline.output(), &dir.path().join("Filtered_2023.csv"));
    }

    #[test]
    fn test_run_summary_console() {
        let summary = RunSummary {
            input: PathBuf::from("2023.csv"),
            output: None,
            encoding: "windows-1252".to_string(),
            skipped_rows: 2,
            dropped_columns: vec!["Telephone".to_string()],
            dry_run: true,
            anonymization: AnonymizationSummary::default(),
            duration_ms: 3,
        };
        let text = summary.format_console();
        assert!(text.contains("2023.csv (windows-1252)"));
        assert!(text.contains("dry run"));
        assert!(text.contains("Telephone"));
        assert!(text.contains("Skipped malformed rows: 2"));
    }
}
