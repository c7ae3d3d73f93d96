//! Domain error types
//!
//! This module defines the error hierarchy for posanon.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main posanon error type
///
/// Every fallible library operation returns this error. The CLI layer maps
/// the variants to process exit codes (see [`PosanonError::exit_code`]).
#[derive(Debug, Error)]
pub enum PosanonError {
    /// A required column is absent from the dataset
    #[error("Missing field: column '{0}' not found in dataset")]
    MissingField(String),

    /// A pool that is sampled from has no candidates
    #[error("Empty pool: {0} has no candidates")]
    EmptyPool(String),

    /// Invalid parameter values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown or undecodable text encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// CSV parsing or writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PosanonError {
    /// Process exit code for this error
    ///
    /// - `2` configuration problems
    /// - `3` data problems (missing columns, empty pools, bad parameters)
    /// - `5` everything else (I/O, decoding, serialization)
    pub fn exit_code(&self) -> i32 {
        match self {
            PosanonError::Configuration(_) => 2,
            PosanonError::MissingField(_)
            | PosanonError::EmptyPool(_)
            | PosanonError::Validation(_) => 3,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PosanonError {
    fn from(err: std::io::Error) -> Self {
        PosanonError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PosanonError {
    fn from(err: serde_json::Error) -> Self {
        PosanonError::Serialization(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for PosanonError {
    fn from(err: csv::Error) -> Self {
        PosanonError::Csv(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PosanonError {
    fn from(err: toml::de::Error) -> Self {
        PosanonError::Configuration(format!("TOML parse error: {err}"))
    }
}
