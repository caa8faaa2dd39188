//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use pii_guardian::config::{load_config, load_or_default, GuardianConfig};
use pii_guardian::core::scan::ScanCoordinator;
use pii_guardian::domain::GuardianError;
use pii_guardian::io::Delimiter;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::{NamedTempFile, TempDir};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("GUARDIAN_APPLICATION_LOG_LEVEL");
    std::env::remove_var("GUARDIAN_INPUT_DELIMITER");
    std::env::remove_var("GUARDIAN_INPUT_PAYLOAD_COLUMN");
    std::env::remove_var("GUARDIAN_OUTPUT_FLAG_COLUMN");
    std::env::remove_var("GUARDIAN_DETECTION_SAMPLE_LIMIT");
    std::env::remove_var("GUARDIAN_DETECTION_WARNING_LIMIT");
    std::env::remove_var("GUARDIAN_DETECTION_RULES_FILE");
    std::env::remove_var("TEST_PAYLOAD_COLUMN");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let dir = TempDir::new().unwrap();
    let rules_path = dir.path().join("rules.toml");
    std::fs::write(&rules_path, "[fields]\nname = [\"customer\"]\n").unwrap();

    let toml_content = format!(
        r#"
[application]
log_level = "debug"

[input]
payload_column = "payload"
id_column = "uid"
delimiter = "semicolon"

[output]
payload_column = "clean_json"
flag_column = "pii"

[detection]
rules_file = "{}"
sample_limit = 5
warning_limit = 7

[logging]
local_enabled = true
local_path = "/tmp/guardian"
local_rotation = "hourly"
"#,
        rules_path.display()
    );
    let temp_file = write_config(&toml_content);

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.input.payload_column.as_deref(), Some("payload"));
    assert_eq!(config.input.id_column, "uid");
    assert_eq!(config.input.delimiter, Delimiter::Semicolon);
    assert_eq!(config.output.payload_column, "clean_json");
    assert_eq!(config.output.flag_column, "pii");
    assert_eq!(config.detection.rules_file, Some(rules_path));
    assert_eq!(config.detection.sample_limit, 5);
    assert_eq!(config.detection.warning_limit, 7);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/guardian");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[application]\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config, GuardianConfig::default());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_PAYLOAD_COLUMN", "data_json");

    let temp_file = write_config("[input]\npayload_column = \"${TEST_PAYLOAD_COLUMN}\"\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.input.payload_column.as_deref(), Some("data_json"));
    cleanup_env_vars();
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("GUARDIAN_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("GUARDIAN_INPUT_DELIMITER", "comma");
    std::env::set_var("GUARDIAN_OUTPUT_FLAG_COLUMN", "has_pii");
    std::env::set_var("GUARDIAN_DETECTION_SAMPLE_LIMIT", "3");
    std::env::set_var("GUARDIAN_DETECTION_WARNING_LIMIT", "4");

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[input]
delimiter = "semicolon"
"#,
    );
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.input.delimiter, Delimiter::Comma);
    assert_eq!(config.output.flag_column, "has_pii");
    assert_eq!(config.detection.sample_limit, 3);
    assert_eq!(config.detection.warning_limit, 4);
    cleanup_env_vars();
}

#[test]
fn test_env_overrides_apply_without_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("GUARDIAN_INPUT_PAYLOAD_COLUMN", "body");

    let config = load_or_default(None).expect("Failed to build config");

    assert_eq!(config.input.payload_column.as_deref(), Some("body"));
    cleanup_env_vars();
}

#[test]
fn test_invalid_env_delimiter_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("GUARDIAN_INPUT_DELIMITER", "pipe");

    let result = load_or_default(None);
    cleanup_env_vars();

    assert!(matches!(result, Err(GuardianError::Configuration(_))));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[application]\nlog_level = \"verbose\"\n");
    let result = load_config(temp_file.path());

    assert!(matches!(result, Err(GuardianError::Configuration(_))));
}

#[test]
fn test_missing_rules_file_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[detection]\nrules_file = \"/nonexistent/rules.toml\"\n");
    let result = load_config(temp_file.path());

    assert!(matches!(result, Err(GuardianError::Configuration(_))));
}

#[test]
fn test_custom_rules_drive_detection() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rules.toml"),
        r#"
[fields]
name = ["customer"]
address = ["location"]

[address]
keywords = ["avenue"]
"#,
    )
    .unwrap();
    let config_path = dir.path().join("guardian.toml");
    std::fs::write(&config_path, "[detection]\nrules_file = \"rules.toml\"\n").unwrap();

    let config = load_config(&config_path).expect("Failed to load config");
    let coordinator = ScanCoordinator::new(config).unwrap();
    let processor = coordinator.processor();

    let record = [("customer", "Meera Iyer"), ("location", "5th Avenue")]
        .into_iter()
        .collect();
    let verdict = processor.process(&record);

    assert!(verdict.has_pii);
    assert_eq!(verdict.redacted.get("customer"), Some("MXXX IXXX"));
    assert_eq!(verdict.redacted.get("location"), Some("[REDACTED_ADDRESS]"));

    // The built-in field names no longer apply
    let default_names = [("name", "Meera Iyer"), ("location", "5th Avenue")]
        .into_iter()
        .collect();
    assert!(!processor.process(&default_names).has_pii);
}

#[test]
fn test_default_config_scan_coordinator() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_or_default(None).unwrap();
    let coordinator = ScanCoordinator::new(config).unwrap();

    assert_eq!(coordinator.config().detection.rules_file, None::<PathBuf>);
}
