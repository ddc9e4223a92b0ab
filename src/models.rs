//! Data models for CLI results.
//!
//! This module contains the structures the CLI renders: the outcome of
//! one aggregation and the report envelope wrapping it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tallyup::{FrequencyTable, Summary};

/// One row of a frequency listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// Token or captured substring.
    pub key: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Result of one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Numeric summary from `stats`.
    Summary(Summary),
    /// Ranked frequencies from `words` or `extract`.
    Frequencies(Vec<FrequencyEntry>),
    /// Kept values from `filter`.
    Filtered(Vec<i64>),
}

impl Outcome {
    /// Ranked frequency entries, limited to `top` when non-zero.
    pub fn frequencies(table: &FrequencyTable, top: usize) -> Self {
        let ranked = if top > 0 {
            table.most_common(top)
        } else {
            table.ranked()
        };

        Outcome::Frequencies(
            ranked
                .into_iter()
                .map(|(key, count)| FrequencyEntry {
                    key: key.to_string(),
                    count,
                })
                .collect(),
        )
    }
}

/// The complete result of one CLI invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Subcommand that produced the result.
    pub command: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The aggregation result.
    pub result: Outcome,
}

impl Report {
    /// Wrap an outcome, stamped with the current time.
    pub fn new(command: &str, result: Outcome) -> Self {
        Self {
            command: command.to_string(),
            generated_at: Utc::now(),
            result,
        }
    }
}
