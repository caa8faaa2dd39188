//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pii-guardian using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// pii-guardian - PII detection and redaction for CSV datasets
#[derive(Parser, Debug)]
#[command(name = "pii-guardian")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "GUARDIAN_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GUARDIAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a CSV file and write a redacted copy
    Scan(commands::scan::ScanArgs),

    /// Classify and redact a single field value
    Classify(commands::classify::ClassifyArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["pii-guardian", "scan", "input.csv"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.input, PathBuf::from("input.csv"));
        assert!(args.output.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_scan_options() {
        let cli = Cli::parse_from([
            "pii-guardian",
            "scan",
            "input.csv",
            "-o",
            "out.csv",
            "--payload-column",
            "payload",
            "--id-column",
            "id",
            "--report-json",
            "report.json",
            "--dry-run",
        ]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert_eq!(args.payload_column.as_deref(), Some("payload"));
        assert_eq!(args.id_column.as_deref(), Some("id"));
        assert_eq!(args.report_json, Some(PathBuf::from("report.json")));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["pii-guardian", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["pii-guardian", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_classify() {
        let cli = Cli::parse_from(["pii-guardian", "classify", "phone", "9876543210"]);
        let Commands::Classify(args) = cli.command else {
            panic!("expected classify command");
        };
        assert_eq!(args.field, "phone");
        assert_eq!(args.value, "9876543210");
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["pii-guardian", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
