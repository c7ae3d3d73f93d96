//! Run summaries for the anonymization filter
//!
//! This module provides the counters collected while a dataset is filtered
//! and anonymized, with console and JSON renderings.

use serde::{Deserialize, Serialize};

/// Counters describing one anonymization pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationSummary {
    /// Records in the input dataset
    pub input_rows: usize,

    /// Records in the output dataset
    pub output_rows: usize,

    /// Distinct clients in the input, sentinel excluded
    pub distinct_clients: usize,

    /// Clients removed by sampling
    pub removed_clients: usize,

    /// Records dropped along with the removed clients
    pub removed_rows: usize,

    /// Walk-in records kept in the output
    pub sentinel_rows: usize,

    /// Distinct vendor codes assigned to non-sentinel clients
    pub vendor_assignments: usize,

    /// Clients whose name was replaced
    pub renamed_clients: usize,

    /// Fraction used for removal sampling
    pub removal_fraction: f64,

    /// Seed used for removal sampling
    pub seed: u64,
}

impl AnonymizationSummary {
    /// Whether client names were replaced during the pass
    pub fn names_replaced(&self) -> bool {
        self.renamed_clients > 0
    }

    /// Format summary for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                   ANONYMIZATION SUMMARY                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 ROWS\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Input Rows:                  {}\n", self.input_rows));
        output.push_str(&format!("  Output Rows:                 {}\n", self.output_rows));
        output.push_str(&format!("  Removed Rows:                {}\n", self.removed_rows));
        output.push_str(&format!("  Walk-in Rows:                {}\n", self.sentinel_rows));
        output.push('\n');

        output.push_str("👥 CLIENTS\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Distinct Clients:            {}\n",
            self.distinct_clients
        ));
        output.push_str(&format!(
            "  Removed Clients:             {} (fraction {:.2}, seed {})\n",
            self.removed_clients, self.removal_fraction, self.seed
        ));
        output.push_str(&format!(
            "  Vendor Codes Assigned:       {}\n",
            self.vendor_assignments
        ));
        output.push_str(&format!(
            "  Renamed Clients:             {}\n",
            self.renamed_clients
        ));
        output.push('\n');

        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output
    }

    /// Format summary as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
