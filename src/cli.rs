//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tallyup - quick aggregate summaries from the command line
///
/// Computes statistics over numbers, word frequencies over text,
/// pattern-extracted frequencies over log lines, and filters integers.
/// Reads FILE, or stdin when no file is given.
///
/// Examples:
///   tallyup stats numbers.txt
///   echo "To be or not to be" | tallyup words
///   tallyup extract ~/.zsh_history --top 5
///   tallyup extract access.log --pattern '"GET ([^ ]+)'
///   seq 1 8 | tallyup filter --odd
///   tallyup --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tallyup.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .tallyup.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Aggregation to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Count, sum, mean, median, min and max of whitespace-separated numbers
    Stats(StatsArgs),

    /// Word frequencies of the input text
    Words(WordsArgs),

    /// Frequencies of a pattern's captured group over input lines
    Extract(ExtractArgs),

    /// Integers satisfying a predicate, in input order
    Filter(FilterArgs),
}

impl Command {
    /// Name used in reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Stats(_) => "stats",
            Command::Words(_) => "words",
            Command::Extract(_) => "extract",
            Command::Filter(_) => "filter",
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct StatsArgs {
    /// Input file (defaults to stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct WordsArgs {
    /// Input file (defaults to stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Single-character token delimiter (default: space)
    #[arg(short, long, value_name = "CHAR", conflicts_with = "whitespace")]
    pub delimiter: Option<char>,

    /// Split on runs of any whitespace instead of a single character
    #[arg(long)]
    pub whitespace: bool,

    /// Do not lower-case the text before counting
    #[arg(long)]
    pub keep_case: bool,

    /// Drop empty tokens produced by repeated delimiters
    #[arg(long)]
    pub skip_empty: bool,

    /// Only show the N most frequent words
    #[arg(short, long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Input file (defaults to stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Pattern with exactly one capture group
    ///
    /// Default: ';go ([a-z]+)' (go subcommands in a ZSH history file).
    #[arg(short, long, value_name = "REGEX", env = "TALLYUP_PATTERN")]
    pub pattern: Option<String>,

    /// Only show the N most frequent captures
    #[arg(short, long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Input file (defaults to stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Keep odd integers
    #[arg(long, conflicts_with = "even")]
    pub odd: bool,

    /// Keep even integers
    #[arg(long)]
    pub even: bool,

    /// Keep integers greater than or equal to N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Keep integers less than or equal to N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max: Option<i64>,
}

impl FilterArgs {
    /// Predicate combining the parity flag with the `--min`/`--max` range.
    pub fn predicate(&self) -> impl Fn(&i64) -> bool {
        let (odd, even) = (self.odd, self.even);
        let in_range = tallyup::in_range(self.min, self.max);

        move |n: &i64| {
            (!odd || tallyup::is_odd(n)) && (!even || tallyup::is_even(n)) && in_range(n)
        }
    }
}

/// Output format for results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let command = match self.command {
            Some(ref command) => command,
            None => return Err("A subcommand is required (stats, words, extract, filter)".to_string()),
        };

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match command {
            Command::Words(words) => {
                validate_top(words.top)?;
            }
            Command::Extract(extract) => {
                validate_top(extract.top)?;
                if let Some(ref pattern) = extract.pattern {
                    if pattern.is_empty() {
                        return Err("Pattern must not be empty".to_string());
                    }
                }
            }
            Command::Filter(filter) => {
                if !filter.odd && !filter.even && filter.min.is_none() && filter.max.is_none() {
                    return Err(
                        "Filter needs at least one of --odd, --even, --min, --max".to_string(),
                    );
                }
                if let (Some(min), Some(max)) = (filter.min, filter.max) {
                    if min > max {
                        return Err(format!("--min ({}) is greater than --max ({})", min, max));
                    }
                }
            }
            Command::Stats(_) => {}
        }

        // Validate input file if provided
        if let Some(input) = self.input() {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        Ok(())
    }

    /// The input file of the selected subcommand, if any.
    pub fn input(&self) -> Option<&PathBuf> {
        match self.command.as_ref()? {
            Command::Stats(a) => a.input.as_ref(),
            Command::Words(a) => a.input.as_ref(),
            Command::Extract(a) => a.input.as_ref(),
            Command::Filter(a) => a.input.as_ref(),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

fn validate_top(top: Option<usize>) -> Result<(), String> {
    if top == Some(0) {
        return Err("--top must be at least 1".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command: Some(command),
            config: None,
            format: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    fn filter_args() -> FilterArgs {
        FilterArgs {
            input: None,
            odd: true,
            even: false,
            min: None,
            max: None,
        }
    }

    #[test]
    fn test_filter_predicate_combines_parity_and_range() {
        let values: Vec<i64> = (1..=8).collect();

        let mut args = filter_args();
        args.min = Some(3);
        args.max = Some(7);
        assert_eq!(tallyup::filter(args.predicate(), &values), vec![3, 5, 7]);

        args.odd = false;
        args.even = true;
        assert_eq!(tallyup::filter(args.predicate(), &values), vec![4, 6]);

        args.even = false;
        assert_eq!(
            tallyup::filter(args.predicate(), &values),
            vec![3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["tallyup", "words", "--top", "3", "--skip-empty"]).unwrap();
        match args.command {
            Some(Command::Words(words)) => {
                assert_eq!(words.top, Some(3));
                assert!(words.skip_empty);
                assert!(!words.keep_case);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let args =
            Args::try_parse_from(["tallyup", "filter", "--min", "-5", "--format", "json"]).unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
        match args.command {
            Some(Command::Filter(filter)) => assert_eq!(filter.min, Some(-5)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_conflicts() {
        assert!(Args::try_parse_from(["tallyup", "filter", "--odd", "--even"]).is_err());
        assert!(
            Args::try_parse_from(["tallyup", "words", "--delimiter", ",", "--whitespace"]).is_err()
        );
    }

    #[test]
    fn test_validation_requires_command() {
        let mut args = make_args(Command::Stats(StatsArgs { input: None }));
        args.command = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_filter() {
        let args = make_args(Command::Filter(filter_args()));
        assert!(args.validate().is_ok());

        let mut filter = filter_args();
        filter.odd = false;
        assert!(make_args(Command::Filter(filter.clone())).validate().is_err());

        filter.min = Some(10);
        filter.max = Some(2);
        assert!(make_args(Command::Filter(filter)).validate().is_err());
    }

    #[test]
    fn test_validation_missing_input() {
        let args = make_args(Command::Stats(StatsArgs {
            input: Some(PathBuf::from("/definitely/not/here.txt")),
        }));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Stats(StatsArgs { input: None }));
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Stats(StatsArgs { input: None }));
        assert_eq!(args.log_level(), tracing::Level::WARN);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
