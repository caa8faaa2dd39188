//! CSV record sink
//!
//! Writes one output row per processed input row, in input order:
//! identifier, redacted payload JSON and the PII flag.

use crate::domain::{GuardianError, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    pub id_column: String,
    pub payload_column: String,
    pub flag_column: String,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            id_column: "record_id".to_string(),
            payload_column: "redacted_data_json".to_string(),
            flag_column: "is_pii".to_string(),
        }
    }
}

/// Textual form of the PII flag
pub fn flag_text(is_pii: bool) -> &'static str {
    if is_pii {
        "True"
    } else {
        "False"
    }
}

/// CSV writer for redacted rows
pub struct CsvRecordSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvRecordSink<File> {
    /// Create (or truncate) the output file and write the header row
    pub fn create<P: AsRef<Path>>(path: P, options: &SinkOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            GuardianError::Io(format!(
                "Failed to create output file {}: {e}",
                path.display()
            ))
        })?;

        tracing::debug!(path = %path.display(), "Created output file");
        Self::new(file, options)
    }
}

impl<W: Write> CsvRecordSink<W> {
    /// Wrap a writer and write the header row
    pub fn new(writer: W, options: &SinkOptions) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record([
            options.id_column.as_str(),
            options.payload_column.as_str(),
            options.flag_column.as_str(),
        ])?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Write one output row
    pub fn write_row(&mut self, record_id: &str, payload_json: &str, is_pii: bool) -> Result<()> {
        self.writer
            .write_record([record_id, payload_json, flag_text(is_pii)])?;
        self.rows_written += 1;
        Ok(())
    }

    /// Rows written so far, header excluded
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered rows and return the inner writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| GuardianError::Io(format!("Failed to flush output: {}", e.error())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_header_and_rows() {
        let mut sink = CsvRecordSink::new(Vec::new(), &SinkOptions::default()).unwrap();
        sink.write_row("1", r#"{"phone":"98XXXXXX10"}"#, true).unwrap();
        sink.write_row("2", r#"{"city":"New York"}"#, false).unwrap();
        assert_eq!(sink.rows_written(), 2);

        let output = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "record_id,redacted_data_json,is_pii\n\
             1,\"{\"\"phone\"\":\"\"98XXXXXX10\"\"}\",True\n\
             2,\"{\"\"city\"\":\"\"New York\"\"}\",False\n"
        );
    }

    #[test]
    fn test_custom_column_names() {
        let options = SinkOptions {
            id_column: "id".to_string(),
            payload_column: "clean".to_string(),
            flag_column: "pii".to_string(),
        };
        let sink = CsvRecordSink::new(Vec::new(), &options).unwrap();
        let output = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(output, "id,clean,pii\n");
    }

    #[test]
    fn test_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvRecordSink::create(&path, &SinkOptions::default()).unwrap();
        sink.write_row("1", "{}", false).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("record_id,redacted_data_json,is_pii\n"));
        assert!(content.ends_with("1,{},False\n"));
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(matches!(
            CsvRecordSink::create(path, &SinkOptions::default()),
            Err(GuardianError::Io(_))
        ));
    }
}
