//! Tallyup - small aggregation utilities.
//!
//! Pure functions for quick aggregate summaries:
//!
//! - [`stats`]: sum, mean and median over numeric slices.
//! - [`frequency`]: frequency tables over free text or pattern-extracted lines.
//! - [`filter`]: order-preserving filtering with a caller-supplied predicate.
//!
//! Every operation borrows its input and returns a fresh value; nothing is
//! retained between calls.

pub mod error;
pub mod filter;
pub mod frequency;
pub mod stats;

pub use error::{AggregateError, Result};
pub use filter::{filter, in_range, is_even, is_odd};
pub use frequency::{
    from_lines, from_text, Delimiter, FrequencyTable, PatternRule, SplitPolicy,
    DEFAULT_HISTORY_PATTERN,
};
pub use stats::{mean, median, sum, Summary};
