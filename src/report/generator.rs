//! Report rendering.
//!
//! Turns a [`Report`] into plain text for the terminal or into JSON.

use crate::models::{FrequencyEntry, Outcome, Report};
use anyhow::Result;
use tallyup::Summary;

/// Render the result as plain text.
///
/// Only the result is printed; the envelope metadata is JSON-only.
pub fn generate_text_report(report: &Report) -> String {
    match report.result {
        Outcome::Summary(ref summary) => generate_summary_section(summary),
        Outcome::Frequencies(ref entries) => generate_frequency_section(entries),
        Outcome::Filtered(ref values) => generate_filtered_section(values),
    }
}

fn generate_summary_section(summary: &Summary) -> String {
    let mut section = String::new();

    section.push_str(&format!("count:  {}\n", summary.count));
    section.push_str(&format!("sum:    {}\n", summary.sum));
    section.push_str(&format!("mean:   {}\n", summary.mean));
    section.push_str(&format!("median: {}\n", summary.median));
    section.push_str(&format!("min:    {}\n", summary.min));
    section.push_str(&format!("max:    {}\n", summary.max));

    section
}

fn generate_frequency_section(entries: &[FrequencyEntry]) -> String {
    let mut section = String::new();

    for entry in entries {
        // Keep empty tokens visible
        if entry.key.is_empty() {
            section.push_str(&format!("\"\" -> {}\n", entry.count));
        } else {
            section.push_str(&format!("{} -> {}\n", entry.key, entry.count));
        }
    }

    section
}

fn generate_filtered_section(values: &[i64]) -> String {
    let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("{}\n", joined.join(" "))
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
