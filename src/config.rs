//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.tallyup.toml` files.

use crate::cli::{Args, Command, OutputFormat};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tallyup::{Delimiter, SplitPolicy, DEFAULT_HISTORY_PATTERN};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".tallyup.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Word frequency settings.
    #[serde(default)]
    pub words: WordsConfig,

    /// Pattern extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Tokenizer settings for `words`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsConfig {
    /// A single character, or "whitespace".
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Lower-case text before counting.
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Drop empty tokens.
    #[serde(default)]
    pub skip_empty: bool,

    /// Number of entries to show (0 = all).
    #[serde(default)]
    pub top: usize,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            lowercase: true,
            skip_empty: false,
            top: 0,
        }
    }
}

fn default_delimiter() -> String {
    " ".to_string()
}

fn default_true() -> bool {
    true
}

/// Extraction settings for `extract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Pattern with exactly one capture group.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Number of entries to show (0 = all).
    #[serde(default)]
    pub top: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            top: 0,
        }
    }
}

fn default_pattern() -> String {
    DEFAULT_HISTORY_PATTERN.to_string()
}

impl WordsConfig {
    /// Build the tokenizer policy described by these settings.
    pub fn split_policy(&self) -> Result<SplitPolicy> {
        let delimiter = if self.delimiter.eq_ignore_ascii_case("whitespace") {
            Delimiter::Whitespace
        } else {
            let mut chars = self.delimiter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Delimiter::Char(c),
                _ => bail!(
                    "Delimiter must be a single character or \"whitespace\", got {:?}",
                    self.delimiter
                ),
            }
        };

        Ok(SplitPolicy {
            delimiter,
            lowercase: self.lowercase,
            skip_empty: self.skip_empty,
        })
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(format) = args.format {
            self.general.format = format;
        }

        match args.command {
            Some(Command::Words(ref words)) => {
                if words.whitespace {
                    self.words.delimiter = "whitespace".to_string();
                } else if let Some(delimiter) = words.delimiter {
                    self.words.delimiter = delimiter.to_string();
                }
                if words.keep_case {
                    self.words.lowercase = false;
                }
                if words.skip_empty {
                    self.words.skip_empty = true;
                }
                if let Some(top) = words.top {
                    self.words.top = top;
                }
            }
            Some(Command::Extract(ref extract)) => {
                if let Some(ref pattern) = extract.pattern {
                    self.extract.pattern = pattern.clone();
                }
                if let Some(top) = extract.top {
                    self.extract.top = top;
                }
            }
            _ => {}
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
