//! Audit logging module
//!
//! Provides structured audit logging for anonymization runs.

pub mod logger;

pub use logger::AuditLogger;
