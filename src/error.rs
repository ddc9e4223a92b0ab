//! Error types for the aggregation core.

use std::io;
use thiserror::Error;

/// Errors raised by the aggregation functions.
///
/// Non-matching lines and predicates that evaluate to `false` are never
/// errors; they are skipped silently.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A statistic was requested over zero values.
    #[error("Cannot aggregate an empty sequence")]
    EmptyInput,

    /// A NaN value was passed where a total order is required.
    #[error("NaN value at index {index}")]
    NotANumber { index: usize },

    /// An extraction pattern failed to compile or has the wrong shape.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The line source reported a read failure.
    #[error("Failed to read line {line}: {source}")]
    SourceRead {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Result alias for the aggregation core.
pub type Result<T> = std::result::Result<T, AggregateError>;
