//! Command-line interface for the parallel Bellman-Ford solver.
//!
//! `bellman <THREADS> <GRAPH_FILE> [-b] [-d]` loads an edge-list graph, runs
//! the relaxation engine from the source vertex, and hands the timed result
//! to the console and results-log sinks.

mod commands;

pub use commands::{
    Cli, CliError, DisciplineArg, FAILURE_STATUS, PartitionArg, RunSummary,
    exit_code_for_parse_error, run_cli, run_cli_with_sink,
};

#[cfg(test)]
mod test_helpers;
