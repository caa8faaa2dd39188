//! Classify command implementation
//!
//! Runs the classifier and the redactor on one field value, which is handy
//! when tuning field-name rules.

use crate::cli::commands::load_command_config;
use crate::detection::RecordProcessor;
use clap::Args;
use serde::Serialize;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Field name the value appears under
    pub field: String,

    /// Value to classify
    pub value: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result printed by the classify command
#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    field: &'a str,
    category: crate::detection::PiiCategory,
    is_standalone_pii: bool,
    redacted: Option<String>,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let Some(config) = load_command_config(config_path) else {
            return Ok(2); // Configuration error exit code
        };

        let processor = match RecordProcessor::new(&config.detection) {
            Ok(p) => p,
            Err(e) => {
                println!("❌ Failed to initialize detection engine");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        let classification = processor.classifier().classify(&self.field, Some(&self.value));
        tracing::debug!(
            field = %self.field,
            category = %classification.category,
            "Classified value"
        );

        let output = ClassifyOutput {
            field: &self.field,
            category: classification.category,
            is_standalone_pii: classification.is_standalone_pii,
            redacted: classification
                .is_detected()
                .then(|| processor.redactor().redact(&self.value, classification.category)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(0);
        }

        println!("Field:       {}", output.field);
        println!("Category:    {}", output.category);
        println!(
            "Standalone:  {}",
            if output.is_standalone_pii { "yes" } else { "no" }
        );
        match output.redacted {
            Some(ref redacted) => println!("Redacted:    {redacted}"),
            None => println!("Redacted:    (unchanged)"),
        }
        if classification.category.is_combinatorial() {
            println!();
            println!("ℹ️  {} only counts as PII alongside another", output.category);
            println!("   name/address/device_id/ip_address field, or any standalone PII.");
        }

        Ok(0)
    }
}
