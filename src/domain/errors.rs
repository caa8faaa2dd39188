//! Domain error types
//!
//! Errors raised at the I/O and configuration edges. The detection engine
//! itself never fails; see [`crate::detection::RedactionError`] for the strict
//! masking error.

use thiserror::Error;

/// Main pii-guardian error type
#[derive(Debug, Error)]
pub enum GuardianError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Input bytes could not be decoded to text
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A payload cell is not a JSON object
    #[error("Payload error: {0}")]
    Payload(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl GuardianError {
    /// Process exit code for this error
    ///
    /// Configuration problems map to 2, problems with the input file to 3,
    /// everything else is fatal.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Io(_) | Self::Encoding(_) | Self::Validation(_) => 3,
            Self::Payload(_) | Self::Serialization(_) | Self::Other(_) => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for GuardianError {
    fn from(err: std::io::Error) -> Self {
        GuardianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GuardianError {
    fn from(err: serde_json::Error) -> Self {
        GuardianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GuardianError {
    fn from(err: toml::de::Error) -> Self {
        GuardianError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from CSV reader/writer errors
impl From<csv::Error> for GuardianError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            GuardianError::Io(err.to_string())
        } else {
            GuardianError::Validation(format!("CSV error: {err}"))
        }
    }
}
