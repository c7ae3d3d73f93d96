//! Result type alias for posanon

use super::errors::PosanonError;

/// Result type alias for posanon operations
///
/// # Examples
///
/// ```
/// use posanon::domain::result::Result;
/// use posanon::domain::errors::PosanonError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PosanonError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PosanonError>;
