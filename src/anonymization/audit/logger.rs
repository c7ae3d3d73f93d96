//! Audit logger for anonymization runs

use crate::anonymization::engine::AnonymizedDataset;
use crate::domain::{PosanonError, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    input_file: String,
    seed: u64,
    removal_fraction: f64,
    input_rows: usize,
    output_rows: usize,
    distinct_clients: usize,
    renamed_clients: usize,
    dry_run: bool,
    /// SHA-256 hashes of removed client identities (never log plaintext names)
    removed_client_hashes: Vec<String>,
}

/// Audit logger for anonymization runs
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            // Ensure parent directory exists
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PosanonError::Io(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Log one anonymization run
    pub fn log_run(&self, input: &Path, outcome: &AnonymizedDataset, dry_run: bool) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let summary = &outcome.summary;
        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            input_file: input.display().to_string(),
            seed: summary.seed,
            removal_fraction: summary.removal_fraction,
            input_rows: summary.input_rows,
            output_rows: summary.output_rows,
            distinct_clients: summary.distinct_clients,
            renamed_clients: summary.renamed_clients,
            dry_run,
            removed_client_hashes: outcome
                .removed_clients
                .iter()
                .map(|c| self.hash_client(c))
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Hash a client identity using SHA-256
    fn hash_client(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}")
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                PosanonError::Io(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        if self.json_format {
            let json_line = serde_json::to_string(entry)?;
            writeln!(file, "{json_line}")?;
        } else {
            // Plain text format
            writeln!(
                file,
                "[{}] Input: {} | Rows: {} -> {} | Removed clients: {} | Renamed: {} | Seed: {} | Dry run: {}",
                entry.timestamp,
                entry.input_file,
                entry.input_rows,
                entry.output_rows,
                entry.removed_client_hashes.len(),
                entry.renamed_clients,
                entry.seed,
                entry.dry_run
            )?;
        }

        tracing::debug!(path = %self.log_path.display(), "Audit entry written");
        Ok(())
    }
}
