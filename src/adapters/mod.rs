//! File-format integrations for posanon.
//!
//! This module isolates the external formats the tool reads and writes:
//!
//! - [`encoding`] - Encoding detection and decoding of raw export bytes
//! - [`tabular`] - CSV parsing with a header row offset, CSV writing with BOM
//!
//! # Example
//!
//! ```rust,no_run
//! use posanon::adapters::tabular::{read_dataset, write_dataset, ReadOptions, WriteOptions};
//!
//! # fn example() -> posanon::domain::Result<()> {
//! let loaded = read_dataset("2023.csv", &ReadOptions::default())?;
//! println!("Decoded as {}", loaded.encoding);
//! write_dataset("Filtered_2023.csv", &loaded.dataset, &WriteOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod encoding;
pub mod tabular;
