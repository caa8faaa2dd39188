//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file and the field-name rules it points to.

use crate::cli::commands::load_command_config;
use crate::detection::{PiiCategory, RecordProcessor};
use crate::detection::rules::FieldNameRules;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("(built-in defaults)");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let Some(config) = load_command_config(config_path) else {
            return Ok(2); // Configuration error exit code
        };
        println!("✅ Configuration loaded and valid");

        let rules = match config.detection.rules_file {
            Some(ref path) => FieldNameRules::from_file(path),
            None => FieldNameRules::default_rules(),
        };
        let rules = match rules {
            Ok(rules) => rules,
            Err(e) => {
                println!("❌ Field-name rules are invalid");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        if let Err(e) = RecordProcessor::new(&config.detection) {
            println!("❌ Detection engine could not be built");
            println!("   Error: {e:#}");
            return Ok(2);
        }
        println!("✅ Detection rules are valid");
        println!();

        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Payload Column: {}",
            config
                .input
                .payload_column
                .as_deref()
                .unwrap_or("(auto-detect)")
        );
        println!("  ID Column: {}", config.input.id_column);
        println!("  Delimiter: {:?}", config.input.delimiter);
        println!(
            "  Output Columns: {}, {}, {}",
            config.input.id_column, config.output.payload_column, config.output.flag_column
        );
        println!(
            "  Rules File: {}",
            config
                .detection
                .rules_file
                .as_ref()
                .map_or_else(|| "(built-in)".to_string(), |p| p.display().to_string())
        );
        for category in PiiCategory::COMBINATORIAL {
            println!(
                "    {:12} {} field name(s)",
                category.to_string(),
                rules.field_count(category)
            );
        }
        println!(
            "  Address Keywords: {}",
            if rules.address_keywords().is_some() {
                "custom"
            } else {
                "built-in"
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_defaults() {
        assert_eq!(ValidateArgs {}.execute(None).unwrap(), 0);
    }

    #[test]
    fn test_validate_bad_rules_file() {
        let mut rules = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(rules, "[fields]\nphone = [\"mobile\"]").unwrap();

        let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            config,
            "[detection]\nrules_file = \"{}\"",
            rules.path().display().to_string().replace('\\', "\\\\")
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(config.path().to_str())
            .unwrap();
        assert_eq!(code, 2);
    }
}
