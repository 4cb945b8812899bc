//! fmtlint CLI
//!
//! Runs an external formatter over source files and reports every place the
//! output differs as a fixable lint diagnostic.

mod cli;
mod commands;
mod fix;
mod output;

use std::process::ExitCode;

use clap::Parser;
use fmtlint_formatter::shutdown_shared_formatters;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{init::run_init, lint::run_lint, rules::run_rules};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(cli);
    // Rules are gone by now, so this joins the formatter workers.
    shutdown_shared_formatters();

    match outcome {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint {
            patterns,
            format,
            fix,
            dry_run,
        } => run_lint(&cli, patterns, *format, *fix, *dry_run),
        Commands::Init { force } => run_init(*force).map(|_| false),
        Commands::Rules => run_rules().map(|_| false),
    }
}
