//! Configuration management for pii-guardian.
//!
//! pii-guardian uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GUARDIAN_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation of every section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pii_guardian::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("guardian.toml")?;
//!
//! println!("Payload column: {:?}", config.input.payload_column);
//! println!("Flag column: {}", config.output.flag_column);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`InputConfig`] - Input columns and delimiter
//! - [`OutputConfig`] - Output column names
//! - [`DetectionConfig`] - Field-name rules and report sampling
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [input]
//! payload_column = "data_json"
//! id_column = "record_id"
//! delimiter = "auto"
//!
//! [output]
//! payload_column = "redacted_data_json"
//! flag_column = "is_pii"
//!
//! [detection]
//! rules_file = "${GUARDIAN_RULES}"
//! sample_limit = 20
//! warning_limit = 50
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::detection::config::DetectionConfig;
pub use loader::{load_config, load_or_default};
pub use schema::{ApplicationConfig, GuardianConfig, InputConfig, LoggingConfig, OutputConfig};
