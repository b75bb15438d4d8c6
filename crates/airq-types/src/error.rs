//! Error types for airq-types.

use thiserror::Error;

/// Errors that can occur when interpreting observation data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Timestamp is outside the range representable as a calendar date.
    #[error("Timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),

    /// Calendar formatting failed.
    #[error("Failed to format timestamp: {0}")]
    Format(String),
}

/// Result type alias using airq-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
