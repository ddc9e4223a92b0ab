//! Tallyup - quick aggregate summaries from the command line
//!
//! Thin front end over the `tallyup` library: reads numbers, text or log
//! lines from a file or stdin and prints statistics, frequencies or
//! filtered values.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (invalid arguments or pattern, empty input, read failure)

mod cli;
mod config;
mod input;
mod models;
mod report;

use anyhow::{bail, Context, Result};
use cli::{Args, Command, FilterArgs, OutputFormat};
use config::{Config, ExtractConfig, WordsConfig, CONFIG_FILE_NAME};
use input::Numbers;
use models::{Outcome, Report};
use std::io::BufRead;
use std::path::Path;
use tallyup::{FrequencyTable, PatternRule, Summary};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    debug!("Tallyup v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .tallyup.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber is already installed");
    }
}

/// Run the selected subcommand and print its report.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let command = match args.command {
        Some(ref command) => command,
        None => bail!("No subcommand given"),
    };
    info!("Running {}", command.name());

    let outcome = match command {
        Command::Stats(stats) => run_stats(stats.input.as_deref())?,
        Command::Words(words) => run_words(words.input.as_deref(), &config.words)?,
        Command::Extract(extract) => run_extract(extract.input.as_deref(), &config.extract)?,
        Command::Filter(filter) => run_filter(filter)?,
    };

    let report = Report::new(command.name(), outcome);
    let output = match config.general.format {
        OutputFormat::Text => report::generate_text_report(&report),
        OutputFormat::Json => report::generate_json_report(&report)? + "\n",
    };
    print!("{}", output);

    Ok(())
}

fn run_stats(path: Option<&Path>) -> Result<Outcome> {
    let lines = input::read_lines(input::open_source(path)?)?;

    let summary = match input::parse_numbers(&lines)? {
        Numbers::Integers(values) => {
            debug!("Parsed {} integers", values.len());
            Summary::from_integers(&values)
        }
        Numbers::Floats(values) => {
            debug!("Parsed {} floating-point values", values.len());
            Summary::from_values(&values)
        }
    }
    .context("Cannot summarize input")?;

    Ok(Outcome::Summary(summary))
}

fn run_words(path: Option<&Path>, settings: &WordsConfig) -> Result<Outcome> {
    let policy = settings.split_policy()?;
    let lines = input::read_lines(input::open_source(path)?)?;

    let table = match input::join_lines(&lines, policy.delimiter) {
        Some(text) => tallyup::from_text(&text, &policy),
        None => {
            warn!("Input has no text to count");
            FrequencyTable::default()
        }
    };
    Ok(Outcome::frequencies(&table, settings.top))
}

fn run_extract(path: Option<&Path>, settings: &ExtractConfig) -> Result<Outcome> {
    let rule = PatternRule::new(&settings.pattern)?;
    debug!("Extracting with pattern {:?}", rule.as_str());

    let reader = input::open_source(path)?;
    let table = tallyup::from_lines(reader.lines(), &rule)?;

    if table.is_empty() {
        warn!("No line matched pattern {:?}", rule.as_str());
    }

    Ok(Outcome::frequencies(&table, settings.top))
}

fn run_filter(args: &FilterArgs) -> Result<Outcome> {
    let lines = input::read_lines(input::open_source(args.input.as_deref())?)?;
    let values = input::parse_integers(&lines)?;

    let kept = tallyup::filter(args.predicate(), &values);
    debug!("Kept {} of {} values", kept.len(), values.len());

    Ok(Outcome::Filtered(kept))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
