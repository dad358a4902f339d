//! Argument parsing and the run pipeline.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use bellman_core::{
    Discipline, EngineBuilder, EngineError, Outcome, PartitionStrategy, ResultSink, RunReport,
    reference,
};
use bellman_providers_edgelist::{EdgeListError, EdgeListProvider};
use clap::{Parser, ValueEnum, error::ErrorKind};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{report::ConsoleSink, results_log::{CsvResultLog, DEFAULT_RESULTS_PATH}};

/// Process status for every failure; `-1` as an unsigned byte.
pub const FAILURE_STATUS: u8 = 255;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "bellman",
    version,
    about = "Compute single-source shortest paths with parallel Bellman-Ford."
)]
pub struct Cli {
    /// Number of worker threads.
    pub threads: usize,

    /// Graph file: a `V E` header followed by `E` lines of `u v w`.
    pub graph_file: PathBuf,

    /// Append the reverse of every edge.
    #[arg(short = 'b', long)]
    pub bidirectional: bool,

    /// Print the distance table.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Source vertex.
    #[arg(long, default_value_t = 0)]
    pub source: usize,

    /// How concurrent relaxations of one vertex are arbitrated.
    #[arg(long, value_enum, default_value_t = DisciplineArg::Unsynchronized)]
    pub discipline: DisciplineArg,

    /// How each round's edges are split between workers.
    #[arg(long, value_enum, default_value_t = PartitionArg::EdgeChunks)]
    pub partition: PartitionArg,

    /// Stop relaxing after a round that changes nothing.
    #[arg(long)]
    pub early_exit: bool,

    /// Cross-check the result against the sequential solver.
    #[arg(long)]
    pub verify: bool,

    /// Preferred results log; falls back to the same file name in the
    /// working directory.
    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results: PathBuf,
}

/// Command-line names of [`Discipline`] values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DisciplineArg {
    /// Racy relaxed stores; lost updates heal in later rounds.
    Unsynchronized,
    /// Compare-and-write under a per-vertex lock.
    VertexLocked,
    /// Compare-and-write under one global lock.
    GlobalLocked,
}

impl From<DisciplineArg> for Discipline {
    fn from(arg: DisciplineArg) -> Self {
        match arg {
            DisciplineArg::Unsynchronized => Self::Unsynchronized,
            DisciplineArg::VertexLocked => Self::VertexLocked,
            DisciplineArg::GlobalLocked => Self::GlobalLocked,
        }
    }
}

/// Command-line names of [`PartitionStrategy`] values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PartitionArg {
    /// Contiguous chunks of the edge array.
    EdgeChunks,
    /// Contiguous ranges of source vertices.
    SourceVertices,
}

impl From<PartitionArg> for PartitionStrategy {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::EdgeChunks => Self::EdgeChunks,
            PartitionArg::SourceVertices => Self::SourceVertices,
        }
    }
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The graph file could not be read or parsed.
    #[error("failed to load `{path}`: {source}")]
    Load {
        /// Graph file path.
        path: PathBuf,
        /// Underlying loader failure.
        #[source]
        source: EdgeListError,
    },
    /// The engine rejected its configuration or failed while running.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// `--verify` found a difference from the sequential solver.
    #[error("parallel result ({parallel}) disagrees with the sequential solver ({sequential})")]
    VerificationFailed {
        /// Outcome label of the parallel run.
        parallel: &'static str,
        /// Outcome label of the sequential run.
        sequential: &'static str,
    },
}

impl CliError {
    /// Stable identifier for structured logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Load { source, .. } => source.code(),
            Self::Engine(error) => error.code().as_str(),
            Self::VerificationFailed { .. } => "CLI_VERIFICATION_FAILED",
        }
    }
}

/// What a successful invocation produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Graph file as given on the command line.
    pub graph: String,
    /// Worker pool size.
    pub threads: usize,
    /// Engine result.
    pub outcome: Outcome,
    /// Wall-clock time spent in the engine.
    pub elapsed: Duration,
}

/// Maps a clap parse failure to the process status: `0` for `--help` and
/// `--version`, [`FAILURE_STATUS`] for everything else.
#[must_use]
pub fn exit_code_for_parse_error(error: &clap::Error) -> u8 {
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => FAILURE_STATUS,
    }
}

/// Runs `cli`, printing the report to stdout and appending to the results
/// log.
///
/// # Errors
/// Returns the [`CliError`] raised by the pipeline, or the I/O error raised
/// while writing stdout.
pub fn run_cli(cli: &Cli) -> anyhow::Result<RunSummary> {
    let stdout = std::io::stdout();
    let mut console = ConsoleSink::new(stdout.lock(), cli.debug);
    let mut results = CsvResultLog::new(&cli.results);
    let summary = {
        let mut sinks: [&mut dyn ResultSink; 2] = [&mut console, &mut results];
        run_cli_with_sink(cli, &mut sinks[..])?
    };
    console.finish()?;
    Ok(summary)
}

/// Runs `cli`, delivering the timed result to `sink`.
///
/// Nothing reaches `sink` when the run fails.
///
/// # Errors
/// Returns [`CliError`] when loading, running, or verification fails.
///
/// # Examples
/// ```
/// use bellman_cli::cli::{Cli, run_cli_with_sink};
/// use bellman_core::{ResultSink, RunReport};
/// use clap::Parser;
///
/// struct Labels(Vec<String>);
///
/// impl ResultSink for Labels {
///     fn accept(&mut self, report: &RunReport<'_>) {
///         self.0.push(report.label.to_owned());
///     }
/// }
///
/// let file = tempfile::NamedTempFile::new()?;
/// std::fs::write(file.path(), "3 2\n0 1 4\n1 2 -1\n")?;
/// let path = file.path().display().to_string();
/// let cli = Cli::try_parse_from(["bellman", "2", path.as_str()])?;
/// let mut sink = Labels(Vec::new());
/// let summary = run_cli_with_sink(&cli, &mut sink)?;
/// assert_eq!(summary.outcome.distances().map(|t| t.as_slice().to_vec()), Some(vec![0, 4, 3]));
/// assert_eq!(sink.0.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, sink),
    fields(graph = %cli.graph_file.display(), threads = cli.threads),
)]
pub fn run_cli_with_sink<S>(cli: &Cli, sink: &mut S) -> Result<RunSummary, CliError>
where
    S: ResultSink + ?Sized,
{
    let provider = EdgeListProvider::try_from_path(&cli.graph_file, cli.bidirectional).map_err(
        |source| CliError::Load {
            path: cli.graph_file.clone(),
            source,
        },
    )?;
    let engine = EngineBuilder::new()
        .with_threads(cli.threads)
        .with_discipline(cli.discipline.into())
        .with_partition(cli.partition.into())
        .with_early_exit(cli.early_exit)
        .build()?;

    let started = Instant::now();
    let outcome = engine.run(provider.edges(), cli.source)?;
    let elapsed = started.elapsed();

    if cli.verify {
        let sequential = reference::bellman_ford(provider.edges(), cli.source)?;
        if sequential != outcome {
            return Err(CliError::VerificationFailed {
                parallel: outcome.as_str(),
                sequential: sequential.as_str(),
            });
        }
        info!("result matches the sequential solver");
    }

    let graph = cli.graph_file.display().to_string();
    sink.accept(&RunReport {
        label: &graph,
        threads: cli.threads,
        outcome: &outcome,
        elapsed,
    });
    Ok(RunSummary {
        graph,
        threads: cli.threads,
        outcome,
        elapsed,
    })
}
