//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for posanon using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "posanon.toml";

/// posanon - point-of-sale CSV anonymizer
#[derive(Parser, Debug)]
#[command(name = "posanon")]
#[command(version, about, long_about = None)]
#[command(author = "Posanon Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "POSANON_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "POSANON_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove a sample of clients and substitute vendors and names
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file and pools
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
