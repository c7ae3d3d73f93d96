//! Core orchestration for posanon.
//!
//! # Workflow
//!
//! 1. **Read**: load the export bytes and resolve the encoding
//! 2. **Parse**: split with the configured delimiter, header at the configured offset
//! 3. **Drop**: remove unneeded columns
//! 4. **Anonymize**: sample out clients, substitute vendors and names
//! 5. **Write**: UTF-8 CSV with byte-order mark (skipped in dry-run mode)
//! 6. **Audit**: append a run entry with hashed client identities
//!
//! # Example
//!
//! ```rust,no_run
//! use posanon::config::load_config;
//! use posanon::core::AnonymizationPipeline;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("posanon.toml")?;
//! let pipeline = AnonymizationPipeline::new(config)?;
//! let summary = pipeline.run()?;
//! println!("{} rows written", summary.anonymization.output_rows);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;

pub use pipeline::{AnonymizationPipeline, RunSummary};
