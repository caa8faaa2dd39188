// pii-guardian - PII detection and redaction for CSV datasets
// Copyright (c) 2025 pii-guardian Contributors
// Licensed under the MIT License

use clap::Parser;
use pii_guardian::cli::{Cli, Commands};
use pii_guardian::config::{load_or_default, LoggingConfig};
use pii_guardian::logging::init_logging;
use std::path::Path;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config when it loads; commands report
    // config errors themselves, so a failure here falls back to defaults
    let (config_level, logging_config) =
        match load_or_default(cli.config.as_deref().map(Path::new)) {
            Ok(config) => (Some(config.application.log_level), config.logging),
            Err(_) => (None, LoggingConfig::default()),
        };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "pii-guardian - PII detection and redaction"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Scan(args) => args.execute(config),
        Commands::Classify(args) => args.execute(config),
        Commands::ValidateConfig(args) => args.execute(config),
        Commands::Init(args) => args.execute(),
    }
}
