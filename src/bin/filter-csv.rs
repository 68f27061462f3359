//! CLI tool to filter CSV rows with a predefined filter and select columns.
//!
//! Usage:
//!   filter-csv [input.csv] [--filter NAME] [--columns COL...]
//!   filter-csv input.csv --filter no-group -o output.csv
//!
//! Reads stdin when no input file is given. Writes to stdout unless `-o` is set.

use clap::Parser;
use filter_csv::{FilterError, NamedFilter, Options, run};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

/// Filters a CSV file using a custom set of predefined filters.
#[derive(Parser)]
#[command(name = "filter-csv", version)]
struct Cli {
    /// Path to the CSV file to search on (default: stdin)
    input: Option<PathBuf>,

    /// Column names to output
    #[arg(long, num_args = 1..)]
    columns: Vec<String>,

    /// Predefined filter to run on the CSV
    #[arg(long, value_enum)]
    filter: Option<NamedFilter>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log input, output and row counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>, FilterError> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(p) if p.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let file = File::open(p).map_err(|source| FilterError::OpenInput {
                path: p.to_path_buf(),
                source,
            })?;
            Ok(Box::new(file))
        }
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, FilterError> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdout().lock()));
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(Box::new(File::create(path)?))
}

fn execute(cli: &Cli) -> Result<(), FilterError> {
    info!(
        input = %cli.input.as_deref().map_or("(stdin)".into(), |p| p.display().to_string()),
        output = %cli.output.as_deref().map_or("(stdout)".into(), |p| p.display().to_string()),
        filter = %cli.filter.map_or("(none)", |f| f.name()),
        "starting"
    );

    // Open the input first so an unreadable path fails before any output.
    let input = open_input(cli.input.as_deref())?;
    let output = open_output(cli.output.as_deref())?;

    let options = Options::new()
        .filter(cli.filter)
        .columns(cli.columns.iter().cloned());
    let summary = run(input, output, &options)?;

    info!(
        "Records: {} in -> {} out",
        summary.rows_read, summary.rows_written
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => {}
        // Downstream closed the pipe (e.g. `| head`); stop quietly.
        Err(e) if e.is_broken_pipe() => {}
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
