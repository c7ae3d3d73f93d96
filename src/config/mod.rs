//! Configuration management for posanon.
//!
//! posanon reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `POSANON_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use posanon::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("posanon.toml")?;
//! println!("Removal fraction: {}", config.anonymization.removal_fraction);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run flag
//! - [`InputConfig`] - Input path, delimiter, header offset, encoding
//! - [`OutputConfig`] - Output path, delimiter, byte-order mark
//! - [`crate::anonymization::AnonymizationConfig`] - Sampling, pools, columns
//! - [`crate::anonymization::AuditConfig`] - Audit log
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! path = "2023.csv"
//! header_row = 1
//!
//! [anonymization]
//! removal_fraction = 0.5
//! seed = 42
//! vendor_pool = ["V001", "V002", "V003"]
//! name_pool = "${POSANON_NAME_POOL}"
//! drop_columns = ["Telephone", "Email"]
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{ApplicationConfig, InputConfig, LoggingConfig, OutputConfig, PosanonConfig};
