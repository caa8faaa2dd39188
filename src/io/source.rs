//! CSV record source
//!
//! Reads a whole CSV file, sniffs its encoding and delimiter, locates the
//! payload and identifier columns, and yields one [`SourceRow`] per data row.
//! The decoded text is kept in memory, so [`CsvRecordSource::rows`] can be
//! iterated any number of times.

use crate::domain::{GuardianError, Record, Result};
use crate::io::encoding::{self, SourceEncoding};
use crate::io::payload::Payload;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column delimiter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `;` when the header line has a semicolon but no comma, else `,`
    #[default]
    Auto,
    Comma,
    Semicolon,
}

impl Delimiter {
    /// Resolve to a concrete delimiter byte using the header line
    pub fn resolve(self, header_line: &str) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Semicolon => b';',
            Self::Auto if header_line.contains(';') && !header_line.contains(',') => b';',
            Self::Auto => b',',
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "comma" | "," => Ok(Self::Comma),
            "semicolon" | ";" => Ok(Self::Semicolon),
            other => Err(GuardianError::Configuration(format!(
                "Invalid delimiter '{other}'. Must be one of: auto, comma, semicolon"
            ))),
        }
    }
}

/// Options controlling how the source interprets its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Payload column name; the first header containing `json` when `None`
    pub payload_column: Option<String>,
    /// Identifier column name
    pub id_column: String,
    pub delimiter: Delimiter,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            payload_column: None,
            id_column: "record_id".to_string(),
            delimiter: Delimiter::Auto,
        }
    }
}

/// Decoded payload cell of a row
#[derive(Debug, Clone, PartialEq)]
pub enum RowPayload {
    /// The cell held a JSON object
    Parsed(Payload),
    /// The cell could not be decoded
    Malformed { reason: String },
    /// The row has no payload cell, or it is blank
    Missing,
}

/// One data row of the input
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// 1-based position among data rows
    pub row_number: usize,
    /// Identifier cell, or the row number when the cell is absent or blank
    pub record_id: String,
    /// Payload cell exactly as read
    pub raw_payload: String,
    pub payload: RowPayload,
}

impl SourceRow {
    /// Fields of the row; empty unless the payload was parsed
    pub fn record(&self) -> Record {
        match self.payload {
            RowPayload::Parsed(ref payload) => payload.record().clone(),
            _ => Record::new(),
        }
    }

    /// Check if the payload failed to decode
    pub fn is_malformed(&self) -> bool {
        matches!(self.payload, RowPayload::Malformed { .. })
    }
}

/// CSV file with an embedded JSON payload column
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    text: String,
    encoding: SourceEncoding,
    delimiter: u8,
    headers: Vec<String>,
    payload_index: usize,
    id_index: Option<usize>,
}

impl CsvRecordSource {
    /// Open and decode a CSV file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if no
    /// payload column can be found.
    pub fn open<P: AsRef<Path>>(path: P, options: &SourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            GuardianError::Io(format!("Failed to read input file {}: {e}", path.display()))
        })?;

        let (text, encoding) = encoding::decode(&bytes)?;
        tracing::info!(path = %path.display(), %encoding, "Reading input file");

        Self::from_text(text, encoding, options)
    }

    /// Build a source from already-decoded text
    pub fn from_text(
        text: String,
        encoding: SourceEncoding,
        options: &SourceOptions,
    ) -> Result<Self> {
        let header_line = text.lines().next().unwrap_or_default();
        let delimiter = options.delimiter.resolve(header_line);

        let headers: Vec<String> = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(text.as_bytes())
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let payload_index = find_payload_column(&headers, options.payload_column.as_deref())?;
        let id_index = headers.iter().position(|h| *h == options.id_column);

        tracing::debug!(
            delimiter = %(delimiter as char),
            payload_column = %headers[payload_index],
            id_column_found = id_index.is_some(),
            "Detected input layout"
        );

        Ok(Self {
            text,
            encoding,
            delimiter,
            headers,
            payload_index,
            id_index,
        })
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    pub fn delimiter(&self) -> char {
        self.delimiter as char
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Name of the payload column in use
    pub fn payload_column(&self) -> &str {
        &self.headers[self.payload_index]
    }

    /// Iterate over data rows from the start of the file
    pub fn rows(&self) -> impl Iterator<Item = Result<SourceRow>> + '_ {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(self.text.as_bytes())
            .into_records()
            .enumerate()
            .map(move |(idx, result)| {
                let row = result?;
                let row_number = idx + 1;

                let record_id = self
                    .id_index
                    .and_then(|i| row.get(i))
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map_or_else(|| row_number.to_string(), str::to_string);

                let raw_payload = row.get(self.payload_index).unwrap_or_default().to_string();
                let payload = if raw_payload.trim().is_empty() {
                    RowPayload::Missing
                } else {
                    match Payload::parse(&raw_payload) {
                        Ok(payload) => RowPayload::Parsed(payload),
                        Err(e) => RowPayload::Malformed {
                            reason: e.to_string(),
                        },
                    }
                };

                Ok(SourceRow {
                    row_number,
                    record_id,
                    raw_payload,
                    payload,
                })
            })
    }
}

fn find_payload_column(headers: &[String], configured: Option<&str>) -> Result<usize> {
    match configured {
        Some(name) => headers.iter().position(|h| h == name).ok_or_else(|| {
            GuardianError::Validation(format!(
                "Payload column '{name}' not found; columns: {}",
                headers.join(", ")
            ))
        }),
        None => headers
            .iter()
            .position(|h| h.to_lowercase().contains("json"))
            .ok_or_else(|| {
                GuardianError::Validation(format!(
                    "No payload column found (expected a header containing 'json'); columns: {}",
                    headers.join(", ")
                ))
            }),
    }
}
