//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GuardianConfig;
use crate::domain::errors::GuardianError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GuardianConfig
/// 4. Applies environment variable overrides (GUARDIAN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`GuardianError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use pii_guardian::config::loader::load_config;
///
/// let config = load_config("guardian.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GuardianConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GuardianError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GuardianError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GuardianConfig = toml::from_str(&contents)
        .map_err(|e| GuardianError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Relative rules paths are resolved against the config file's directory
    if let Some(ref rules) = config.detection.rules_file {
        if rules.is_relative() {
            if let Some(dir) = path.parent() {
                config.detection.rules_file = Some(dir.join(rules));
            }
        }
    }

    finalize(config)
}

/// Loads configuration from `path` when given, otherwise from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_or_default(path: Option<&Path>) -> Result<GuardianConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            tracing::debug!("No configuration file given, using defaults");
            finalize(GuardianConfig::default())
        }
    }
}

fn finalize(mut config: GuardianConfig) -> Result<GuardianConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GuardianError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GuardianError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GuardianError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using GUARDIAN_* prefix
///
/// Environment variables follow the pattern: GUARDIAN_<SECTION>_<KEY>
/// For example: GUARDIAN_INPUT_DELIMITER, GUARDIAN_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut GuardianConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GUARDIAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Input overrides
    if let Ok(val) = std::env::var("GUARDIAN_INPUT_PAYLOAD_COLUMN") {
        config.input.payload_column = Some(val);
    }
    if let Ok(val) = std::env::var("GUARDIAN_INPUT_ID_COLUMN") {
        config.input.id_column = val;
    }
    if let Ok(val) = std::env::var("GUARDIAN_INPUT_DELIMITER") {
        config.input.delimiter = val.parse()?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("GUARDIAN_OUTPUT_PAYLOAD_COLUMN") {
        config.output.payload_column = val;
    }
    if let Ok(val) = std::env::var("GUARDIAN_OUTPUT_FLAG_COLUMN") {
        config.output.flag_column = val;
    }

    // Detection overrides
    config
        .detection
        .apply_env_overrides()
        .map_err(|e| GuardianError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("GUARDIAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GUARDIAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GUARDIAN_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GUARDIAN_LOADER_TEST_VAR", "data_json");
        let input = "payload_column = \"${GUARDIAN_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "payload_column = \"data_json\"\n");
        std::env::remove_var("GUARDIAN_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("GUARDIAN_LOADER_MISSING_VAR");
        let input = "payload_column = \"${GUARDIAN_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(matches!(result, Err(GuardianError::Configuration(_))));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# rules_file = \"${GUARDIAN_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, format!("{input}\n"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(GuardianError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[input]
payload_column = "data_json"
id_column = "id"

[output]
flag_column = "contains_pii"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.input.payload_column.as_deref(), Some("data_json"));
        assert_eq!(config.input.id_column, "id");
        assert_eq!(config.output.flag_column, "contains_pii");
        assert_eq!(config.output.payload_column, "redacted_data_json");
    }

    #[test]
    fn test_relative_rules_file_resolves_next_to_config() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("rules.toml"), "[fields]\nname = [\"nom\"]\n").unwrap();
        let config_path = dir.path().join("guardian.toml");
        std::fs::write(&config_path, "[detection]\nrules_file = \"rules.toml\"\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(
            config.detection.rules_file,
            Some(dir.path().join("rules.toml"))
        );
    }

    #[test]
    fn test_load_config_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nlocal_rotation = \"weekly\"\n")
            .unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(GuardianError::Configuration(_))));
    }
}
