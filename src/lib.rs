// posanon - Point-of-sale CSV anonymizer
// Copyright (c) 2025 Posanon Contributors
// Licensed under the MIT License

//! # posanon - point-of-sale CSV anonymizer
//!
//! posanon turns a retail point-of-sale CSV export into a dataset that can be
//! shared: a seeded sample of clients is removed entirely, vendor references
//! are replaced with synthetic codes, and client names are replaced with
//! synthetic full names whenever walk-in sales are present.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Run orchestration (read, drop columns, anonymize, write, audit)
//! - [`anonymization`] - Client sampling, vendor/name substitution, audit log
//! - [`adapters`] - Encoding detection, CSV reading and writing
//! - [`domain`] - Dataset model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use posanon::config::load_config;
//! use posanon::core::AnonymizationPipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("posanon.toml")?;
//!     let pipeline = AnonymizationPipeline::new(config)?;
//!     let summary = pipeline.run()?;
//!
//!     println!("Kept {} of {} rows", summary.anonymization.output_rows, summary.anonymization.input_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Reproducibility
//!
//! Removal sampling depends only on the configured seed. Vendor and name draws
//! use a random source passed in by the caller:
//!
//! ```rust,no_run
//! use posanon::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn example(dataset: &posanon::domain::Dataset) -> posanon::domain::Result<()> {
//! let engine = AnonymizationEngine::from_config(AnonymizationConfig::default())?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = engine.anonymize(dataset, &mut rng)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! posanon uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(rows = 120, "Input parsed");
//! warn!(column = "Telephone", "Column to drop not found, skipping");
//! ```

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
