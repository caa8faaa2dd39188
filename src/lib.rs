// pii-guardian - PII detection and redaction for CSV datasets
// Copyright (c) 2025 pii-guardian Contributors
// Licensed under the MIT License

//! # pii-guardian
//!
//! pii-guardian scans CSV exports whose rows carry a JSON object in one
//! column, decides per row whether it exposes personally identifiable
//! information, and writes a copy with the sensitive values masked.
//!
//! ## Overview
//!
//! A record is PII when it holds either:
//! - a **standalone** identifier (phone, national id, passport, UPI id), or
//! - **two or more distinct** combinatorial categories (name, email,
//!   address, device/IP) that only identify a person together.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Scan orchestration over one input file
//! - [`detection`] - Classification, combinatorial evaluation and redaction
//! - [`io`] - CSV source/sink, encoding fallback, JSON payloads
//! - [`domain`] - Records and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pii_guardian::config::GuardianConfig;
//! use pii_guardian::core::scan::ScanCoordinator;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GuardianConfig::from_file("guardian.toml")?;
//!     let coordinator = ScanCoordinator::new(config)?;
//!
//!     let report = coordinator.execute_scan(
//!         Path::new("records.csv"),
//!         Some(Path::new("records_redacted.csv")),
//!     )?;
//!
//!     println!("{} of {} records contain PII", report.records_with_pii, report.processed_records());
//!     Ok(())
//! }
//! ```
//!
//! ## Single records
//!
//! ```rust
//! use pii_guardian::detection::RecordProcessor;
//! use pii_guardian::domain::Record;
//!
//! let processor = RecordProcessor::with_defaults()?;
//! let record: Record = [("name", "John Doe"), ("email", "john.doe@example.com")]
//!     .into_iter()
//!     .collect();
//!
//! let verdict = processor.process(&record);
//! assert!(verdict.has_pii);
//! assert_eq!(verdict.redacted.get("name"), Some("JXXX DXXX"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible library operations return [`domain::Result`], whose error type
//! [`domain::GuardianError`] maps onto the process exit code.

pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod io;
pub mod logging;
