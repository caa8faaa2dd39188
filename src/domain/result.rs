//! Result type alias for pii-guardian

use super::errors::GuardianError;

/// Result type alias for pii-guardian operations
///
/// # Examples
///
/// ```
/// use pii_guardian::domain::result::Result;
/// use pii_guardian::domain::errors::GuardianError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GuardianError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GuardianError>;
