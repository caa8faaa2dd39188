//! Scan reporting
//!
//! This module aggregates record verdicts into run statistics: PII record
//! counts, detections per category, malformed rows and a handful of masked
//! samples. Original values never enter the report.

use crate::detection::models::{PiiCategory, RecordVerdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default cap on the number of masked samples kept
pub const DEFAULT_SAMPLE_LIMIT: usize = 20;

/// Default cap on the number of per-row warnings kept
pub const DEFAULT_WARNING_LIMIT: usize = 50;

/// Masked samples taken from a single record
const SAMPLES_PER_RECORD: usize = 3;

/// Scan report with PII detection statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Rows read from the source, malformed ones included
    pub total_rows: usize,

    /// Records flagged as containing PII
    pub records_with_pii: usize,

    /// Records processed without PII
    pub records_without_pii: usize,

    /// Records flagged through the combinatorial signal
    pub combinatorial_records: usize,

    /// Rows whose payload could not be decoded
    pub malformed_rows: usize,

    /// Rows skipped because they carried no payload
    pub skipped_rows: usize,

    /// Field values rewritten by the redactor
    pub fields_redacted: usize,

    /// Detected fields per category, redacted or not
    pub detections_by_category: BTreeMap<PiiCategory, usize>,

    /// Masked sample values
    pub samples: Vec<RedactionSample>,

    /// Warnings collected during the scan
    pub warnings: Vec<String>,

    /// Per-row warnings dropped once the warning limit was reached
    pub suppressed_warnings: usize,

    /// Wall-clock processing time (ms)
    pub processing_time_ms: u64,

    /// When the scan started
    pub generated_at: DateTime<Utc>,

    #[serde(skip)]
    sample_limit: usize,

    #[serde(skip)]
    warning_limit: usize,
}

/// Masked value as written to the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSample {
    /// Identifier of the record the sample comes from
    pub record_id: String,

    /// Field name inside the payload
    pub field: String,

    /// PII category
    pub category: PiiCategory,

    /// Redacted value
    pub masked: String,
}

impl ScanReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::with_sample_limit(DEFAULT_SAMPLE_LIMIT)
    }

    /// Create a new empty report keeping at most `sample_limit` samples
    pub fn with_sample_limit(sample_limit: usize) -> Self {
        Self {
            total_rows: 0,
            records_with_pii: 0,
            records_without_pii: 0,
            combinatorial_records: 0,
            malformed_rows: 0,
            skipped_rows: 0,
            fields_redacted: 0,
            detections_by_category: BTreeMap::new(),
            samples: Vec::new(),
            warnings: Vec::new(),
            suppressed_warnings: 0,
            processing_time_ms: 0,
            generated_at: Utc::now(),
            sample_limit,
            warning_limit: DEFAULT_WARNING_LIMIT,
        }
    }

    /// Keep at most `warning_limit` per-row warnings
    pub fn with_warning_limit(mut self, warning_limit: usize) -> Self {
        self.warning_limit = warning_limit;
        self
    }

    /// Add the verdict of a processed record
    pub fn add_verdict(&mut self, record_id: &str, verdict: &RecordVerdict) {
        self.total_rows += 1;

        if verdict.has_pii {
            self.records_with_pii += 1;
        } else {
            self.records_without_pii += 1;
        }
        if verdict.combinatorial {
            self.combinatorial_records += 1;
        }

        for result in verdict
            .classifications
            .iter()
            .filter(|c| c.classification.is_detected())
        {
            *self
                .detections_by_category
                .entry(result.classification.category)
                .or_insert(0) += 1;
        }

        let mut taken = 0;
        for result in verdict.redacted_fields() {
            let Some(masked) = verdict.redacted.get(&result.field) else {
                continue;
            };
            self.fields_redacted += 1;

            if taken < SAMPLES_PER_RECORD && self.samples.len() < self.sample_limit {
                self.samples.push(RedactionSample {
                    record_id: record_id.to_string(),
                    field: result.field.clone(),
                    category: result.classification.category,
                    masked: masked.to_string(),
                });
                taken += 1;
            }
        }

        for diagnostic in &verdict.diagnostics {
            self.add_warning(format!("Record {record_id}: {diagnostic}"));
        }
    }

    /// Record a row whose payload could not be decoded
    pub fn add_malformed(&mut self, record_id: &str, reason: &str) {
        self.total_rows += 1;
        self.malformed_rows += 1;
        self.add_warning(format!("Record {record_id}: malformed payload ({reason})"));
    }

    /// Record a row skipped for lack of a payload
    pub fn add_skipped(&mut self) {
        self.skipped_rows += 1;
    }

    /// Add a per-row warning, counting it as suppressed past the limit
    pub fn add_warning(&mut self, warning: String) {
        if self.warnings.len() < self.warning_limit {
            self.warnings.push(warning);
        } else {
            self.suppressed_warnings += 1;
        }
    }

    /// Add a run-level warning; never suppressed
    pub fn add_summary_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Append a summary of suppressed warnings, if any
    pub fn summarize_suppressed(&mut self) {
        if self.suppressed_warnings > 0 {
            self.add_summary_warning(format!(
                "{} further warning(s) suppressed",
                self.suppressed_warnings
            ));
        }
    }

    /// Records that went through the processor
    pub fn processed_records(&self) -> usize {
        self.records_with_pii + self.records_without_pii
    }

    /// Share of processed records flagged as PII, in percent
    pub fn pii_percentage(&self) -> f64 {
        let processed = self.processed_records();
        if processed == 0 {
            return 0.0;
        }
        self.records_with_pii as f64 / processed as f64 * 100.0
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                      PII SCAN REPORT                          \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Started:                     {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("  Total Rows Read:             {}\n", self.total_rows));
        output.push_str(&format!(
            "  Records Processed:           {}\n",
            self.processed_records()
        ));
        output.push_str(&format!(
            "  Records with PII:            {} ({:.2}%)\n",
            self.records_with_pii,
            self.pii_percentage()
        ));
        output.push_str(&format!(
            "  Combinatorial PII Records:   {}\n",
            self.combinatorial_records
        ));
        output.push_str(&format!(
            "  Fields Redacted:             {}\n",
            self.fields_redacted
        ));
        output.push_str(&format!("  Malformed Rows:              {}\n", self.malformed_rows));
        output.push_str(&format!("  Skipped Rows:                {}\n", self.skipped_rows));
        output.push_str(&format!(
            "  Processing Time:             {} ms\n",
            self.processing_time_ms
        ));
        output.push('\n');

        if !self.detections_by_category.is_empty() {
            output.push_str("🔍 PII DETECTIONS BY CATEGORY\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut categories: Vec<_> = self.detections_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));

            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.label(), count));
            }
            output.push('\n');
        }

        if !self.samples.is_empty() {
            output.push_str("📝 SAMPLE REDACTIONS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            for (i, sample) in self.samples.iter().take(10).enumerate() {
                output.push_str(&format!("\n  Sample #{}\n", i + 1));
                output.push_str(&format!("    Record:    {}\n", sample.record_id));
                output.push_str(&format!("    Field:     {}\n", sample.field));
                output.push_str(&format!("    Category:  {}\n", sample.category.label()));
                output.push_str(&format!("    Redacted:  \"{}\"\n", sample.masked));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}
