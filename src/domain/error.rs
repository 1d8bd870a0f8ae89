//! Error types for the script filter toolkit.
//!
//! This module defines the centralized error type [`ScriptFilterError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The intentional, user-facing abort signal lives in [`crate::app::Failure`]; it is
//! deliberately not a variant here because the dispatch boundary renders it differently
//! from every other fault.

use thiserror::Error;

/// The main error type for script filter operations.
///
/// # Examples
///
/// ```
/// use scriptfilter::ScriptFilterError;
///
/// fn validate_ttl(seconds: u64) -> Result<(), ScriptFilterError> {
///     if seconds < 5 {
///         return Err(ScriptFilterError::InvalidArgument(format!("ttl too short: {seconds}s")));
///     }
///     Ok(())
/// }
///
/// assert!(validate_ttl(1).is_err());
/// ```
#[derive(Debug, Error)]
pub enum ScriptFilterError {
    /// A caller violated a construction contract (e.g. a cache TTL outside 5s..=24h).
    ///
    /// This is a programming error in the matching logic. The dispatch boundary does
    /// not convert it into an error row; it is returned to the caller instead.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A JSON document could not be decoded into result records.
    ///
    /// Raised when required keys (`title`, `items`, `valid`, `visible`, `variables`)
    /// are missing or a value has the wrong shape.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// No matcher branch accepted the argument list.
    #[error("Unsupported arguments: {0:?}")]
    UnmatchedArguments(Vec<String>),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache read or write failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Release lookup failed.
    #[error("Update check error: {0}")]
    Update(String),

    /// Posting a desktop notification failed.
    #[error("Notification error: {0}")]
    Notify(String),
}

/// A specialized `Result` type for script filter operations.
pub type Result<T> = std::result::Result<T, ScriptFilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_arguments_names_every_argument() {
        let err = ScriptFilterError::UnmatchedArguments(vec!["unknown".into(), "x y".into()]);
        let text = err.to_string();
        assert!(text.contains("\"unknown\""));
        assert!(text.contains("\"x y\""));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScriptFilterError = io.into();
        assert!(matches!(err, ScriptFilterError::Io(_)));
    }
}
