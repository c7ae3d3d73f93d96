//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file and, optionally, a starter name pool.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "posanon.toml")]
    pub output: String,

    /// Also write a starter name pool to this path
    #[arg(long, value_name = "PATH")]
    pub name_pool: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing posanon configuration");
        println!();

        if let Some(code) = self.write_file(&self.output, &Self::generate_config()) {
            return Ok(code);
        }

        if let Some(ref name_pool) = self.name_pool {
            if let Some(code) = self.write_file(name_pool, &Self::generate_name_pool()) {
                return Ok(code);
            }
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. Fill the name pool with last and first names");
        println!("  3. Validate configuration: posanon validate-config");
        println!("  4. Run: posanon anonymize --input 2023.csv");
        println!();
        Ok(0)
    }

    /// Writes one file, returning an exit code on failure
    fn write_file(&self, path: &str, content: &str) -> Option<i32> {
        if Path::new(path).exists() && !self.force {
            println!("❌ File already exists: {path}");
            println!("   Use --force to overwrite");
            return Some(2);
        }

        match fs::write(path, content) {
            Ok(_) => {
                println!("✅ Created: {path}");
                None
            }
            Err(e) => {
                println!("❌ Failed to write {path}");
                println!("   Error: {e}");
                Some(5)
            }
        }
    }

    /// Generate the configuration template
    fn generate_config() -> String {
        r#"# posanon configuration
# Anonymizes point-of-sale CSV exports

[application]
log_level = "info"
dry_run = false

[input]
# path = "2023.csv"
delimiter = ";"
# Zero-based line of the header; exports start with a title line
header_row = 1
# "auto" detects BOM / UTF-8 / Windows-1252, or give a label such as "latin1"
encoding = "auto"

[output]
# Defaults to Filtered_<input file name> next to the input
# path = "Filtered_2023.csv"
delimiter = ";"
bom = true

[anonymization]
removal_fraction = 0.5
seed = 42
# Fix vendor and name draws for reproducible output
# assignment_seed = 7
client_column = "Client"
vendor_column = "RefVendeur"
sentinel = "PASSAGE passage"
vendor_pool = ["V001", "V002", "V003", "V004", "V005"]
name_pool = "names.json"
drop_columns = []

[audit]
enabled = false
log_path = "./audit/posanon.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate a starter name pool
    fn generate_name_pool() -> String {
        r#"{
  "last_names": ["MARTIN", "BERNARD", "THOMAS", "PETIT", "ROBERT", "RICHARD", "DURAND", "DUBOIS", "MOREAU", "LAURENT"],
  "first_names": ["Marie", "Jean", "Louise", "Pierre", "Emma", "Lucas", "Chloé", "Hugo", "Alice", "Jules"]
}
"#
        .to_string()
    }
}
