//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logs with rotation
//!
//! Raw field values are never logged. Events carry field names, categories,
//! record identifiers and counts only.
//!
//! # Example
//!
//! ```no_run
//! use pii_guardian::logging::init_logging;
//! use pii_guardian::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a scan
///
/// # Example
///
/// ```no_run
/// use pii_guardian::log_scan_start;
/// use std::path::Path;
///
/// log_scan_start!(Path::new("input.csv").display(), false);
/// ```
#[macro_export]
macro_rules! log_scan_start {
    ($input:expr, $dry_run:expr) => {
        tracing::info!(
            input = %$input,
            dry_run = $dry_run,
            "Starting scan"
        );
    };
}

/// Log the completion of a scan
///
/// # Example
///
/// ```no_run
/// use pii_guardian::log_scan_complete;
/// use std::time::Duration;
///
/// log_scan_complete!(100, 12, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($processed:expr, $pii:expr, $duration:expr) => {
        tracing::info!(
            processed = $processed,
            pii_records = $pii,
            duration_ms = $duration.as_millis() as u64,
            "Scan completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pii_guardian::log_error_with_context;
/// use pii_guardian::domain::GuardianError;
///
/// let error = GuardianError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
