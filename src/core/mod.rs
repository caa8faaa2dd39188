//! Core orchestration for pii-guardian.
//!
//! # Modules
//!
//! - [`scan`] - Scans a CSV file row by row and writes the redacted copy
//!
//! # Scan Workflow
//!
//! 1. **Read**: Decode the input file and locate the payload column
//! 2. **Process**: Classify, evaluate and redact each record
//! 3. **Write**: Re-encode each payload and write it with its PII flag
//! 4. **Report**: Aggregate statistics and masked samples
//!
//! # Example
//!
//! ```rust,no_run
//! use pii_guardian::config::GuardianConfig;
//! use pii_guardian::core::scan::ScanCoordinator;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = ScanCoordinator::new(GuardianConfig::default())?;
//! let report = coordinator.execute_scan(Path::new("input.csv"), Some(Path::new("out.csv")))?;
//!
//! println!("PII records: {}", report.records_with_pii);
//! # Ok(())
//! # }
//! ```

pub mod scan;
