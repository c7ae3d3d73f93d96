//! Domain models and types for posanon.
//!
//! The domain layer provides:
//! - **Tabular data** ([`Dataset`], [`Record`]) as parsed from a point-of-sale export
//! - **Error types** ([`PosanonError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PosanonError>`]:
//!
//! ```rust
//! use posanon::domain::{Dataset, Result};
//!
//! fn client_column(dataset: &Dataset) -> Result<usize> {
//!     dataset.require_column("Client")
//! }
//! ```

pub mod dataset;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use dataset::{Dataset, Record};
pub use errors::PosanonError;
pub use result::Result;
