//! # trc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trc_cli::compare::{run_compare, CompareArgs};
use trc_cli::countries::{run_countries, CountriesArgs};
use trc_cli::inspect::{run_match, run_normalize, MatchArgs, NormalizeArgs};
use trc_cli::TableSources;

/// Travel Rule calculator
///
/// Compares the data-field requirements of two institutions' jurisdictions
/// for a transaction amount and classifies the result as a match,
/// overcompliance, or undercompliance.
#[derive(Parser, Debug)]
#[command(name = "trc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Rule table (JSON or YAML). Uses the builtin table when absent.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Currency rate table (JSON). Uses the builtin rates when absent.
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two countries' requirements for a transaction amount.
    Compare(CompareArgs),

    /// Show how raw field names normalize.
    Normalize(NormalizeArgs),

    /// Check whether two raw field names match.
    Match(MatchArgs),

    /// List the countries in the rule table.
    Countries(CountriesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let sources = TableSources {
        rules: cli.rules,
        rates: cli.rates,
    };

    let result = match cli.command {
        Commands::Compare(args) => run_compare(&args, &sources),
        Commands::Normalize(args) => run_normalize(&args),
        Commands::Match(args) => run_match(&args),
        Commands::Countries(args) => run_countries(&args, &sources),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
