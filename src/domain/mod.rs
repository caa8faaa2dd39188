//! Domain models and types for pii-guardian.
//!
//! The domain layer provides:
//! - **Records** ([`Record`], [`Field`]): the ordered field/value mapping
//!   decoded from one payload
//! - **Error types** ([`GuardianError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible I/O and configuration operations return [`Result<T, GuardianError>`]:
//!
//! ```rust
//! use pii_guardian::domain::{GuardianError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = pii_guardian::config::GuardianConfig::from_file("guardian.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::GuardianError;
pub use record::{Field, Record};
pub use result::Result;
