//! Scan command implementation
//!
//! This module implements the `scan` command: read a CSV file, detect and
//! redact PII in its payload column, and write the redacted copy.

use crate::cli::commands::load_command_config;
use crate::core::scan::{default_output_path, ScanCoordinator};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Input CSV file
    pub input: PathBuf,

    /// Output CSV file (defaults to `<input stem>_redacted.csv` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Payload column name (overrides config; auto-detected when unset)
    #[arg(long)]
    pub payload_column: Option<String>,

    /// Identifier column name (overrides config)
    #[arg(long)]
    pub id_column: Option<String>,

    /// Also write the scan report as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Analyze only: print the report without writing the output file
    #[arg(long)]
    pub dry_run: bool,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), dry_run = self.dry_run, "Starting scan command");

        let Some(mut config) = load_command_config(config_path) else {
            return Ok(2); // Configuration error exit code
        };

        if let Some(ref column) = self.payload_column {
            config.input.payload_column = Some(column.clone());
        }
        if let Some(ref column) = self.id_column {
            config.input.id_column = column.clone();
        }
        if let Err(e) = config.validate() {
            println!("❌ Invalid options: {e}");
            return Ok(2);
        }

        let output = if self.dry_run {
            None
        } else {
            Some(
                self.output
                    .clone()
                    .unwrap_or_else(|| default_output_path(&self.input)),
            )
        };

        if output.as_deref() == Some(self.input.as_path()) {
            println!("❌ Output file would overwrite the input: {}", self.input.display());
            return Ok(3); // Input error exit code
        }

        let coordinator = match ScanCoordinator::new(config) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to initialize detection engine");
                println!("❌ Failed to initialize detection engine");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        if self.dry_run {
            println!("🔍 DRY RUN MODE - no output file will be written");
        }
        println!("🔍 Scanning {}", self.input.display());

        let report = match coordinator.execute_scan(&self.input, output.as_deref()) {
            Ok(report) => report,
            Err(e) => {
                log_error_with_context!(&e, "Scan failed");
                println!("❌ Scan failed");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        if self.dry_run {
            print!("{}", report.format_console());
        } else {
            println!();
            println!("📊 Scan Summary");
            println!("═══════════════════════════════════════");
            println!("Records processed:  {}", report.processed_records());
            println!(
                "Records with PII:   {} ({:.1}%)",
                report.records_with_pii,
                report.pii_percentage()
            );
            println!("Fields redacted:    {}", report.fields_redacted);
            println!("Malformed rows:     {}", report.malformed_rows);
            println!("Skipped rows:       {}", report.skipped_rows);
            println!("Duration:           {} ms", report.processing_time_ms);
            if let Some(ref path) = output {
                println!("Output:             {}", path.display());
            }
            println!();
        }

        if let Some(ref path) = self.report_json {
            if let Err(e) = report.write_to_file(path) {
                println!("❌ Failed to write report: {e}");
                return Ok(5); // Fatal error exit code
            }
            println!("📝 Report written to {}", path.display());
        }

        if report.malformed_rows > 0 {
            println!(
                "⚠️  Completed with {} malformed row(s) written back unchanged",
                report.malformed_rows
            );
            Ok(1)
        } else {
            println!("✅ Scan completed successfully");
            Ok(0)
        }
    }
}
