//! Candidate pools for vendor codes and synthetic names

use crate::domain::{PosanonError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Substitute vendor codes, guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorPool {
    codes: Vec<String>,
}

impl VendorPool {
    /// Creates a vendor pool
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::EmptyPool`] when `codes` is empty.
    pub fn new(codes: Vec<String>) -> Result<Self> {
        if codes.is_empty() {
            return Err(PosanonError::EmptyPool("vendor pool".to_string()));
        }
        Ok(Self { codes })
    }

    /// Uniformly random vendor code
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction
        self.codes
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// All codes in the pool
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

/// Raw JSON shape of a name pool file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NamePoolFile {
    last_names: Vec<String>,
    first_names: Vec<String>,
}

/// Last and first names used to synthesize replacement client identities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePool {
    last_names: Vec<String>,
    first_names: Vec<String>,
}

impl NamePool {
    /// Creates a name pool from two lists
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::EmptyPool`] when either list is empty.
    pub fn new(last_names: Vec<String>, first_names: Vec<String>) -> Result<Self> {
        if last_names.is_empty() {
            return Err(PosanonError::EmptyPool("last name pool".to_string()));
        }
        if first_names.is_empty() {
            return Err(PosanonError::EmptyPool("first name pool".to_string()));
        }
        Ok(Self {
            last_names,
            first_names,
        })
    }

    /// Parses a JSON object with `last_names` and `first_names` arrays
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::Serialization`] for malformed JSON and
    /// [`PosanonError::EmptyPool`] for an empty list.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: NamePoolFile = serde_json::from_str(json)?;
        Self::new(file.last_names, file.first_names)
    }

    /// Loads a name pool file
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::Io`] when the file cannot be read, otherwise the
    /// errors of [`NamePool::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PosanonError::Io(format!(
                "Failed to read name pool {}: {}",
                path.display(),
                e
            ))
        })?;
        let pool = Self::from_json(&contents)?;

        tracing::debug!(
            path = %path.display(),
            last_names = pool.last_names.len(),
            first_names = pool.first_names.len(),
            "Name pool loaded"
        );

        Ok(pool)
    }

    /// Whether some last/first combination differs from `name`
    pub fn can_synthesize_other_than(&self, name: &str) -> bool {
        self.last_names
            .iter()
            .any(|last| self.first_names.iter().any(|first| format!("{last} {first}") != name))
    }

    /// Random `"<last name> <first name>"`
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let last = self.last_names.choose(rng).map(String::as_str).unwrap_or_default();
        let first = self.first_names.choose(rng).map(String::as_str).unwrap_or_default();
        format!("{last} {first}")
    }
}
