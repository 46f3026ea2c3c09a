use clap::{Parser, ValueEnum};
use postfix_compiler::config::runtime::{parse_log_level, LogLevel};
use postfix_compiler::config::RuntimeConfig;
use postfix_compiler::lexical::TokenDumpFormat;
use postfix_compiler::listing::{Lister, OutputSink};
use postfix_compiler::{logging, pipeline, PipelineError};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Printed on stdout when the source cannot be opened
const OPEN_FAILURE_MESSAGE: &str = "***** ERROR ***** Failed to open source file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Listing, diagnostics and one postfix line per expression
    Translate,
    /// Print each token up to the first period
    Tokens,
    /// Source listing only
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "postfix",
    about = "Translate infix arithmetic expressions to postfix notation",
    version
)]
struct Cli {
    /// Source file to read
    #[arg(value_name = "SOURCE")]
    source: String,

    #[arg(long, value_enum, default_value_t = Mode::Translate)]
    mode: Mode,

    /// Token dump format (tokens mode)
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Do not print page headers
    #[arg(long)]
    no_paging: bool,

    /// Append line and column to diagnostics
    #[arg(long)]
    positions: bool,

    /// Runtime preferences file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write log events at or above LEVEL to stderr
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    log_level: Option<LogLevel>,

    /// Write log events to stderr as JSON
    #[arg(long)]
    structured_logs: bool,

    /// Print the collected error report to stderr when done
    #[arg(long)]
    summary: bool,
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    parse_log_level(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn load_config(cli: &Cli) -> Result<RuntimeConfig, PipelineError> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::default(),
    };

    if cli.no_paging {
        config.listing.enable_pagination = false;
    }
    if cli.positions {
        config.translator.include_position_in_errors = true;
    }
    if let Some(level) = cli.log_level {
        config.logging.min_log_level = level;
        config.logging.enable_console_logging = true;
    }
    if cli.structured_logs {
        config.logging.use_structured_logging = true;
        config.logging.enable_console_logging = true;
    }

    Ok(config)
}

fn init(config: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()
}

fn run(cli: &Cli, config: &RuntimeConfig, sink: &mut dyn OutputSink) -> Result<(), PipelineError> {
    match cli.mode {
        Mode::Translate => {
            pipeline::translate_file(&cli.source, sink, config)?;
        }
        Mode::Tokens => {
            let format = match cli.format {
                Format::Text => TokenDumpFormat::Text,
                Format::Json => TokenDumpFormat::Json,
            };
            pipeline::tokenize_file(&cli.source, sink, config, format)?;
        }
        Mode::List => {
            pipeline::list_file(&cli.source, sink)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {}", error);
            return ExitCode::from(error.exit_status());
        }
    };

    if let Err(message) = init(&config) {
        eprintln!("Error: {}", message);
        return ExitCode::from(1);
    }

    let mut lister = Lister::new(BufWriter::new(io::stdout().lock()), &cli.source)
        .with_pagination(config.listing.enable_pagination);

    let outcome = run(&cli, &config, &mut lister);
    let flushed = lister.flush();
    drop(lister);

    let status = match (outcome, flushed) {
        (Ok(()), Ok(())) => 0,
        (Ok(()), Err(error)) => {
            eprintln!("Error: {}", error);
            3
        }
        (Err(error), _) => {
            if error.is_open_failure() {
                println!("\n{}", OPEN_FAILURE_MESSAGE);
            } else {
                eprintln!("Error: {}", error);
            }
            error.exit_status()
        }
    };

    if cli.summary {
        logging::print_error_report();
    }

    ExitCode::from(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("postfix").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&["exprs.txt"]);
        assert_eq!(cli.mode, Mode::Translate);
        assert_eq!(cli.format, Format::Text);
        assert!(!cli.no_paging);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = cli(&[
            "exprs.txt",
            "--no-paging",
            "--positions",
            "--log-level",
            "debug",
        ]);
        let config = load_config(&cli).unwrap();

        assert!(!config.listing.enable_pagination);
        assert!(config.translator.include_position_in_errors);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.enable_console_logging);
    }

    #[test]
    fn test_modes_and_bad_level() {
        assert_eq!(cli(&["a.txt", "--mode", "tokens"]).mode, Mode::Tokens);
        assert!(Cli::try_parse_from(["postfix", "a.txt", "--log-level", "loud"]).is_err());
        assert!(Cli::try_parse_from(["postfix"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = cli(&["a.txt", "--config", "no/such/prefs.toml"]);
        let error = load_config(&cli).err().unwrap();
        assert_eq!(error.exit_status(), 1);
    }
}
