//! PII detection and redaction engine
//!
//! This module classifies the fields of a record, decides whether the record
//! contains personally identifiable information, and produces a redacted copy.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Patterns**: compiled value-shape rules per category
//! - **Rules**: field-name allow-lists for combinatorial categories (TOML)
//! - **Classifier**: ordered first-match classification of one field
//! - **Combinator**: PII by association across a record
//! - **Redactor**: category-specific masking
//! - **Processor**: per-record orchestration
//! - **Report**: run statistics over many verdicts
//!
//! # Usage
//!
//! ```rust
//! use pii_guardian::detection::RecordProcessor;
//! use pii_guardian::domain::Record;
//!
//! let processor = RecordProcessor::with_defaults()?;
//! let record: Record = [("upi_id", "user@paytm")].into_iter().collect();
//!
//! let verdict = processor.process(&record);
//! assert_eq!(verdict.redacted.get("upi_id"), Some("useXXX@paytm"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classifier;
pub mod combinator;
pub mod config;
pub mod models;
pub mod patterns;
pub mod processor;
pub mod redactor;
pub mod report;
pub mod rules;

// Re-export main types
pub use classifier::FieldClassifier;
pub use combinator::CombinatorialEvaluator;
pub use config::DetectionConfig;
pub use models::{Classification, Diagnostic, FieldClassification, PiiCategory, RecordVerdict};
pub use patterns::PatternRegistry;
pub use processor::RecordProcessor;
pub use redactor::{RedactionError, Redactor};
pub use report::ScanReport;
pub use rules::FieldNameRules;
