//! Frequency tables over free text and pattern-extracted log lines.
//!
//! Two aggregation passes are provided:
//!
//! - [`from_text`] splits a text according to a [`SplitPolicy`] and counts
//!   every token.
//! - [`from_lines`] runs a [`PatternRule`] over each line of a line source and
//!   counts the captured substring of every matching line.

use crate::error::{AggregateError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use tracing::{debug, trace};

/// Extraction rule for `go` subcommands in a ZSH history file.
pub const DEFAULT_HISTORY_PATTERN: &str = ";go ([a-z]+)";

/// Occurrence count per distinct key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Count for a key, `0` when the key never occurred.
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate over `(key, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &c)| (k.as_str(), c))
    }

    /// All entries, highest count first. Ties are ordered by key.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The `n` most frequent entries, ordered like [`FrequencyTable::ranked`].
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries = self.ranked();
        entries.truncate(n);
        entries
    }

    /// Consume the table and return the underlying map.
    pub fn into_inner(self) -> HashMap<String, usize> {
        self.counts
    }

    fn record(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_default() += 1;
    }
}

/// Where tokens are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Split on every occurrence of a single character.
    Char(char),
    /// Split on runs of whitespace; never yields empty tokens.
    Whitespace,
}

/// Tokenizer policy for [`from_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Token separator.
    pub delimiter: Delimiter,
    /// Lower-case the text before splitting.
    pub lowercase: bool,
    /// Drop empty tokens produced by adjacent delimiters.
    pub skip_empty: bool,
}

impl Default for SplitPolicy {
    /// Single-space delimiter, case folding on, empty tokens kept.
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Char(' '),
            lowercase: true,
            skip_empty: false,
        }
    }
}

impl SplitPolicy {
    fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let skip_empty = self.skip_empty;
        match self.delimiter {
            Delimiter::Char(c) => {
                Box::new(text.split(c).filter(move |t| !(skip_empty && t.is_empty())))
            }
            Delimiter::Whitespace => Box::new(text.split_whitespace()),
        }
    }
}

/// Count the tokens of `text`.
///
/// With the default policy an empty token between two adjacent delimiters
/// is counted under the key `""`.
pub fn from_text(text: &str, policy: &SplitPolicy) -> FrequencyTable {
    let normalized = if policy.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    let mut table = FrequencyTable::default();
    for token in policy.tokens(&normalized) {
        table.record(token);
    }

    debug!(
        "Counted {} tokens ({} distinct) from text",
        table.total(),
        table.len()
    );
    table
}

/// A compiled extraction pattern with exactly one capture group.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
}

impl PatternRule {
    /// Compile and validate an extraction pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| AggregateError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        // captures_len() counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(AggregateError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("expected exactly one capture group, found {}", groups),
            });
        }

        Ok(Self { regex })
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Captured substring of the first match in `line`, if any.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Count the captured substring of every line matching `rule`.
///
/// Lines are consumed once, in order. Lines that do not match are skipped.
/// A read failure aborts the whole pass; no partial table is returned.
pub fn from_lines<I>(lines: I, rule: &PatternRule) -> Result<FrequencyTable>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut table = FrequencyTable::default();
    let mut skipped = 0usize;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.map_err(|source| AggregateError::SourceRead {
            line: index + 1,
            source,
        })?;

        match rule.extract(&line) {
            Some(key) => table.record(key),
            None => {
                trace!("Line {} does not match", index + 1);
                skipped += 1;
            }
        }
    }

    debug!(
        "Extracted {} matches ({} distinct), skipped {} lines",
        table.total(),
        table.len(),
        skipped
    );
    Ok(table)
}
