//! Bulwark CLI - strip script injection from untrusted values.
//!
//! # Commands
//!
//! - `bulwark sanitize [VALUES]...` - Sanitize values (stdin lines if none)
//! - `bulwark query <QUERY>` - Sanitize a query string, print JSON
//! - `bulwark json [FILE]` - Sanitize every string in a JSON document
//! - `bulwark detect [VALUES]...` - Report the attack type of each value
//!
//! # Exit codes
//!
//! - `0` success
//! - `1` `sanitize --check` found values that would change
//! - `2` error

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod commands;
mod config;
mod error;
mod logging;

use bulwark_xss::XssSanitizer;
use commands::{detect, json, query, sanitize};
use config::CliConfig;
use error::{CliError, CliResult};
use logging::{LogConfig, LogFormat, LogLevel};

/// Bulwark - fixpoint XSS value sanitizer
#[derive(Parser)]
#[command(name = "bulwark")]
#[command(version)]
#[command(about = "Strip script-injection payloads from untrusted text values")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML with [sanitizer] and [log] tables)
    #[arg(short, long, global = true, env = "BULWARK_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum decode/strip passes per value
    #[arg(long, global = true)]
    max_passes: Option<usize>,

    /// Maximum nested base64 inspection depth
    #[arg(long, global = true)]
    max_nesting: Option<usize>,

    /// Log level (RUST_LOG overrides)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize values, one result per line
    #[command(alias = "s")]
    Sanitize(SanitizeArgs),

    /// Sanitize every parameter of a query string
    #[command(alias = "q")]
    Query {
        /// Query string, with or without the leading '?'
        query: String,
    },

    /// Sanitize every string in a JSON document
    #[command(alias = "j")]
    Json(JsonArgs),

    /// Report the attack type of each value ('-' when clean)
    #[command(alias = "d")]
    Detect(DetectArgs),
}

#[derive(Args)]
struct SanitizeArgs {
    /// Values to sanitize (reads stdin lines if omitted)
    values: Vec<String>,

    /// Exit with status 1 if any value would change
    #[arg(long)]
    check: bool,
}

#[derive(Args)]
struct JsonArgs {
    /// JSON file (reads stdin if omitted)
    file: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Args)]
struct DetectArgs {
    /// Values to inspect (reads stdin lines if omitted)
    values: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    let _guard = log_config(&cli, &config).init();

    match run(cli, config) {
        Ok(code) => code,
        Err(e) => fail(&e),
    }
}

fn log_config(cli: &Cli, config: &CliConfig) -> LogConfig {
    let mut log = config.log.clone();
    if let Some(level) = cli.log_level {
        log = log.level(level);
    }
    if let Some(format) = cli.log_format {
        log = log.format(format);
    }
    log.colors = log.colors && !cli.no_color;
    log
}

fn run(cli: Cli, mut config: CliConfig) -> CliResult<ExitCode> {
    if let Some(max_passes) = cli.max_passes {
        config.sanitizer.max_passes = max_passes;
    }
    if let Some(max_nesting) = cli.max_nesting {
        config.sanitizer.max_nesting = max_nesting;
    }

    let sanitizer = XssSanitizer::with_config(&config.sanitizer)?;
    debug!(
        max_passes = config.sanitizer.max_passes,
        max_nesting = config.sanitizer.max_nesting,
        patterns = sanitizer.patterns().len(),
        "Sanitizer ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut code = ExitCode::SUCCESS;

    match cli.command {
        Commands::Sanitize(args) => {
            let values = commands::values_or_lines(args.values, io::stdin().lock())?;
            let summary = sanitize::run(&sanitizer, &values, &mut out)?;
            if args.check && summary.changed > 0 {
                eprintln!(
                    "  {} {} of {} values changed",
                    "⚠".yellow().bold(),
                    summary.changed,
                    summary.total
                );
                code = ExitCode::from(1);
            }
        }

        Commands::Query { query: raw } => query::run(&sanitizer, &raw, &mut out)?,

        Commands::Json(args) => match args.file {
            Some(path) => {
                let file = File::open(path)?;
                json::run(&sanitizer, BufReader::new(file), args.pretty, &mut out)?
            }
            None => json::run(&sanitizer, io::stdin().lock(), args.pretty, &mut out)?,
        },

        Commands::Detect(args) => {
            let values = commands::values_or_lines(args.values, io::stdin().lock())?;
            let flagged = detect::run(&sanitizer, &values, &mut out)?;
            debug!(total = values.len(), flagged, "Detect finished");
        }
    }

    out.flush()?;
    Ok(code)
}

fn fail(e: &CliError) -> ExitCode {
    eprintln!("{} {}", "Error:".red().bold(), e);
    ExitCode::from(2)
}
