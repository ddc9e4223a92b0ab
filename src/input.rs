//! Input sources for the CLI.
//!
//! Opens a file or stdin as a line source and parses numeric input.
//! No aggregation happens here.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tallyup::Delimiter;
use tracing::debug;

/// Numbers read from an input source.
#[derive(Debug, Clone, PartialEq)]
pub enum Numbers {
    /// Every token parsed as an integer.
    Integers(Vec<i64>),
    /// At least one token needed floating-point parsing.
    Floats(Vec<f64>),
}

/// Open `path` for buffered reading, or stdin when `path` is `None`.
pub fn open_source(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            debug!("Reading from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            debug!("Reading from stdin");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

/// Read every line of a source.
pub fn read_lines(reader: impl BufRead) -> Result<Vec<String>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.with_context(|| format!("Failed to read line {}", i + 1)))
        .collect()
}

/// Join lines into one text, using the delimiter as the line separator.
///
/// Trailing blank lines are dropped so a final newline does not produce an
/// empty token. Returns `None` when nothing is left.
pub fn join_lines(lines: &[String], delimiter: Delimiter) -> Option<String> {
    let end = lines.iter().rposition(|line| !line.is_empty())? + 1;

    let joiner = match delimiter {
        Delimiter::Char(c) => c.to_string(),
        Delimiter::Whitespace => " ".to_string(),
    };

    Some(lines[..end].join(&joiner))
}

/// Parse whitespace-separated integers.
pub fn parse_integers(lines: &[String]) -> Result<Vec<i64>> {
    let mut values = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        for token in line.split_whitespace() {
            let value = token
                .parse::<i64>()
                .map_err(|e| anyhow!("Line {}: invalid integer {:?}: {}", i + 1, token, e))?;
            values.push(value);
        }
    }

    Ok(values)
}

/// Parse whitespace-separated numbers, keeping integers exact when possible.
pub fn parse_numbers(lines: &[String]) -> Result<Numbers> {
    if let Ok(integers) = parse_integers(lines) {
        return Ok(Numbers::Integers(integers));
    }

    let mut values = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        for token in line.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|e| anyhow!("Line {}: invalid number {:?}: {}", i + 1, token, e))?;
            values.push(value);
        }
    }

    Ok(Numbers::Floats(values))
}
