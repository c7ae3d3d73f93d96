//! Anonymization module for posanon
//!
//! This module removes a sample of clients from a point-of-sale export and
//! replaces vendor references and client names with synthetic values.
//!
//! # Architecture
//!
//! - **Engine**: seeded removal sampling, vendor substitution, renaming
//! - **Pools**: vendor codes and last/first name lists
//! - **Report**: per-run counters
//! - **Audit**: run log with hashed client identities
//!
//! # Usage
//!
//! ```rust,ignore
//! use posanon::anonymization::{AnonymizationConfig, AnonymizationEngine};
//!
//! let engine = AnonymizationEngine::from_config(AnonymizationConfig::default())?;
//! let outcome = engine.anonymize(&dataset, &mut rand::thread_rng())?;
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod pools;
pub mod report;

// Re-export main types
pub use audit::AuditLogger;
pub use config::{AnonymizationConfig, AuditConfig};
pub use engine::{AnonymizationEngine, AnonymizedDataset};
pub use pools::{NamePool, VendorPool};
pub use report::AnonymizationSummary;
