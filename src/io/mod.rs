//! Tabular input and output
//!
//! - [`encoding`] - byte decoding with a Windows-1252 fallback
//! - [`payload`] - the JSON object stored in the payload column
//! - [`source`] - CSV reader yielding one row at a time
//! - [`sink`] - CSV writer for redacted rows

pub mod encoding;
pub mod payload;
pub mod sink;
pub mod source;

pub use encoding::SourceEncoding;
pub use payload::Payload;
pub use sink::{CsvRecordSink, SinkOptions};
pub use source::{CsvRecordSource, Delimiter, RowPayload, SourceOptions, SourceRow};
