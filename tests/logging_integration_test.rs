//! Integration tests for logging functionality

use posanon::config::LoggingConfig;
use posanon::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_logging_directory_creation() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists()); // Not created yet

    // The global subscriber can only be installed once per process; this is
    // the only test in this binary that does so
    let guard = init_logging("debug", &config).expect("Failed to initialize logging");
    tracing::info!(rows = 3, "Logging integration check");
    drop(guard);

    assert!(log_path.is_dir());
}
