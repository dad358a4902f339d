//! CLI entry point for the parallel Bellman-Ford solver.
//!
//! Parses arguments with clap, runs the solver, prints the report to stdout,
//! and appends a timing record to the results log. Every failure exits with
//! status 255; a reachable negative cycle is a normal result and exits 0.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use bellman_cli::{
    cli::{Cli, CliError, FAILURE_STATUS, exit_code_for_parse_error, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main(cli: &Cli) -> Result<()> {
    run_cli(cli).context("failed to execute command")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::from(FAILURE_STATUS);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let status = exit_code_for_parse_error(&err);
            // Help and usage text go to their usual streams.
            let _ = err.print();
            return ExitCode::from(status);
        }
    };

    if let Err(err) = try_main(&cli) {
        let code = err
            .downcast_ref::<CliError>()
            .map(|cli_error| field::display(cli_error.code()));
        error!(error = format!("{err:#}"), code, "command execution failed");
        return ExitCode::from(FAILURE_STATUS);
    }

    ExitCode::SUCCESS
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
