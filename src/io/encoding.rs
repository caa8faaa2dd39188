//! Input encoding detection
//!
//! Input files are tried as UTF-8 (with or without a byte-order mark) and
//! fall back to Windows-1252, which is a superset of Latin-1 for every
//! printable byte.

use crate::domain::{GuardianError, Result};
use encoding_rs::WINDOWS_1252;
use serde::Serialize;
use std::fmt;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";

/// Encoding an input file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEncoding {
    Utf8,
    Utf8Bom,
    Windows1252,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Utf8Bom => write!(f, "utf-8-sig"),
            Self::Windows1252 => write!(f, "windows-1252"),
        }
    }
}

/// Decode raw file bytes into text
///
/// A UTF-8 byte-order mark is stripped whichever decoder ends up reading
/// the rest. Windows-1252 maps every byte, so the fallback always succeeds.
///
/// # Errors
///
/// Returns [`GuardianError::Encoding`] for UTF-16 input (detected by its
/// byte-order mark), which would otherwise decode into garbage.
pub fn decode(bytes: &[u8]) -> Result<(String, SourceEncoding)> {
    if bytes.starts_with(UTF16_LE_BOM) || bytes.starts_with(UTF16_BE_BOM) {
        return Err(GuardianError::Encoding(
            "UTF-16 input is not supported; re-save the file as UTF-8".to_string(),
        ));
    }

    let (body, encoding) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, SourceEncoding::Utf8Bom),
        None => (bytes, SourceEncoding::Utf8),
    };

    if let Ok(text) = std::str::from_utf8(body) {
        return Ok((text.to_string(), encoding));
    }

    let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
    tracing::debug!("Input is not valid UTF-8, decoded as Windows-1252");
    Ok((text.into_owned(), SourceEncoding::Windows1252))
}
