//! Scan coordinator - orchestrates one pass over an input file
//!
//! Rows are processed strictly in input order, one at a time. A row whose
//! payload cannot be decoded is written back unchanged with the PII flag
//! cleared; it never stops the scan.

use crate::config::GuardianConfig;
use crate::detection::{RecordProcessor, ScanReport};
use crate::domain::{GuardianError, Result};
use crate::io::sink::CsvRecordSink;
use crate::io::source::{CsvRecordSource, RowPayload};
use crate::{log_scan_complete, log_scan_start};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Rows without a payload that get an individual warning
const MAX_SKIP_WARNINGS: usize = 5;

/// Scan coordinator
pub struct ScanCoordinator {
    config: GuardianConfig,
    processor: RecordProcessor,
}

impl ScanCoordinator {
    /// Create a new scan coordinator
    ///
    /// # Errors
    ///
    /// Returns [`GuardianError::Configuration`] if the detection engine
    /// cannot be built from the configuration.
    pub fn new(config: GuardianConfig) -> Result<Self> {
        let processor = RecordProcessor::new(&config.detection)
            .map_err(|e| GuardianError::Configuration(format!("{e:#}")))?;

        Ok(Self { config, processor })
    }

    pub fn config(&self) -> &GuardianConfig {
        &self.config
    }

    pub fn processor(&self) -> &RecordProcessor {
        &self.processor
    }

    /// Scan `input` and write the redacted copy to `output`
    ///
    /// With `output` set to `None` the scan runs without writing anything
    /// (dry run) and only the report is produced.
    pub fn execute_scan(&self, input: &Path, output: Option<&Path>) -> Result<ScanReport> {
        let start_time = Instant::now();
        log_scan_start!(input.display(), output.is_none());

        let source = CsvRecordSource::open(input, &self.config.input.source_options())?;

        let mut report = match output {
            Some(path) => {
                let options = self.config.output.sink_options(&self.config.input.id_column);
                let mut sink = CsvRecordSink::create(path, &options)?;
                let report = self.scan_source(&source, Some(&mut sink))?;
                sink.finish()?;
                tracing::info!(output = %path.display(), "Output written");
                report
            }
            None => self.scan_source::<std::io::Sink>(&source, None)?,
        };

        let elapsed = start_time.elapsed();
        report.processing_time_ms = elapsed.as_millis() as u64;
        log_scan_complete!(report.processed_records(), report.records_with_pii, elapsed);

        Ok(report)
    }

    /// Process every row of `source`, writing results to `sink` when given
    pub fn scan_source<W: Write>(
        &self,
        source: &CsvRecordSource,
        mut sink: Option<&mut CsvRecordSink<W>>,
    ) -> Result<ScanReport> {
        let mut report = ScanReport::with_sample_limit(self.config.detection.sample_limit)
            .with_warning_limit(self.config.detection.warning_limit);

        for row in source.rows() {
            let row = row?;

            match row.payload {
                RowPayload::Parsed(ref payload) => {
                    let verdict = self.processor.process(payload.record());

                    if let Some(sink) = sink.as_deref_mut() {
                        let json = payload.render(&verdict.redacted)?;
                        sink.write_row(&row.record_id, &json, verdict.has_pii)?;
                    }

                    tracing::debug!(
                        row = row.row_number,
                        record_id = %row.record_id,
                        has_pii = verdict.has_pii,
                        redacted_fields = verdict.redacted_fields().count(),
                        "Processed row"
                    );
                    report.add_verdict(&row.record_id, &verdict);
                }
                RowPayload::Malformed { ref reason } => {
                    tracing::warn!(
                        row = row.row_number,
                        record_id = %row.record_id,
                        reason = %reason,
                        "Malformed payload, writing row unchanged"
                    );

                    if let Some(sink) = sink.as_deref_mut() {
                        sink.write_row(&row.record_id, &row.raw_payload, false)?;
                    }
                    report.add_malformed(&row.record_id, reason);
                }
                RowPayload::Missing => {
                    report.add_skipped();
                    if report.skipped_rows <= MAX_SKIP_WARNINGS {
                        tracing::warn!(
                            row = row.row_number,
                            payload_column = %source.payload_column(),
                            columns = %source.headers().join(", "),
                            "No payload found, skipping row"
                        );
                    }
                }
            }
        }

        if report.skipped_rows > 0 {
            report.add_summary_warning(format!(
                "{} row(s) without a payload were skipped",
                report.skipped_rows
            ));
        }
        report.summarize_suppressed();

        Ok(report)
    }
}

/// Default output path: `<input stem>_redacted.csv` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    input.with_file_name(format!("{stem}_redacted.csv"))
}
