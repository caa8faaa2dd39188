//! Configuration schema types

use crate::detection::config::DetectionConfig;
use crate::io::source::{Delimiter, SourceOptions};
use crate::io::sink::SinkOptions;
use serde::{Deserialize, Serialize};

/// Main pii-guardian configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input file layout
    #[serde(default)]
    pub input: InputConfig,

    /// Output file layout
    #[serde(default)]
    pub output: OutputConfig,

    /// Detection engine settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardianConfig {
    /// Load configuration from a TOML file
    ///
    /// See [`crate::config::load_config`].
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::domain::Result<Self> {
        crate::config::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.detection.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Input file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Payload column; auto-detected (first header containing "json") when absent
    #[serde(default)]
    pub payload_column: Option<String>,

    /// Identifier column carried through to the output
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Column delimiter (auto, comma, semicolon)
    #[serde(default)]
    pub delimiter: Delimiter,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.id_column.trim().is_empty() {
            return Err("input.id_column cannot be empty".to_string());
        }
        if matches!(self.payload_column, Some(ref c) if c.trim().is_empty()) {
            return Err("input.payload_column cannot be empty when set".to_string());
        }
        Ok(())
    }

    /// Source options derived from this section
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            payload_column: self.payload_column.clone(),
            id_column: self.id_column.clone(),
            delimiter: self.delimiter,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            payload_column: None,
            id_column: default_id_column(),
            delimiter: Delimiter::Auto,
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Redacted payload column name
    #[serde(default = "default_output_payload_column")]
    pub payload_column: String,

    /// PII flag column name
    #[serde(default = "default_flag_column")]
    pub flag_column: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.payload_column.trim().is_empty() {
            return Err("output.payload_column cannot be empty".to_string());
        }
        if self.flag_column.trim().is_empty() {
            return Err("output.flag_column cannot be empty".to_string());
        }
        if self.payload_column == self.flag_column {
            return Err("output.payload_column and output.flag_column must differ".to_string());
        }
        Ok(())
    }

    /// Sink options derived from this section and the input id column
    pub fn sink_options(&self, id_column: &str) -> SinkOptions {
        SinkOptions {
            id_column: id_column.to_string(),
            payload_column: self.payload_column.clone(),
            flag_column: self.flag_column.clone(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            payload_column: default_output_payload_column(),
            flag_column: default_flag_column(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_id_column() -> String {
    "record_id".to_string()
}

fn default_output_payload_column() -> String {
    "redacted_data_json".to_string()
}

fn default_flag_column() -> String {
    "is_pii".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
