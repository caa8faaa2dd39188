//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "guardian.toml")]
    pub output: String,

    /// Also write the built-in field-name rules next to the configuration
    #[arg(long)]
    pub with_rules: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

/// Built-in field-name rules, as shipped with the crate
const DEFAULT_RULES: &str = include_str!("../../../rules/field_names.toml");

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing pii-guardian configuration");
        println!();

        let output = Path::new(&self.output);
        if output.exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let rules_path = output.with_file_name("field_names.toml");
        if self.with_rules && rules_path.exists() && !self.force {
            println!("❌ Rules file already exists: {}", rules_path.display());
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_rules {
            Self::generate_config(Some("field_names.toml"))
        } else {
            Self::generate_config(None)
        };

        if let Err(e) = fs::write(output, config_content) {
            println!("❌ Failed to write configuration file");
            println!("   Error: {}", e);
            return Ok(5); // Fatal error exit code
        }
        println!("✅ Configuration file created: {}", self.output);

        if self.with_rules {
            if let Err(e) = fs::write(&rules_path, DEFAULT_RULES) {
                println!("❌ Failed to write rules file");
                println!("   Error: {}", e);
                return Ok(5);
            }
            println!("✅ Rules file created: {}", rules_path.display());
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. Validate configuration: pii-guardian --config {} validate-config", self.output);
        println!("  3. Run a scan: pii-guardian --config {} scan <input.csv>", self.output);
        println!();
        Ok(0)
    }

    /// Generate the sample configuration
    fn generate_config(rules_file: Option<&str>) -> String {
        let detection = match rules_file {
            Some(path) => format!("rules_file = \"{path}\""),
            None => "# rules_file = \"field_names.toml\"".to_string(),
        };

        format!(
            r#"# pii-guardian Configuration File
# PII detection and redaction for CSV datasets with JSON payloads

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[input]
# Column holding the JSON payload; the first header containing "json"
# is used when this is not set
# payload_column = "data_json"

# Identifier column carried through to the output
id_column = "record_id"

# Column delimiter: auto | comma | semicolon
delimiter = "auto"

[output]
payload_column = "redacted_data_json"
flag_column = "is_pii"

[detection]
# Field-name rules for name, address, device_id and ip_address
{detection}

# Masked samples kept in the scan report
sample_limit = 20

# Per-row warnings (malformed rows, redaction fallbacks) kept in the report
warning_limit = 50

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        )
    }
}
