//! Writes a random `G(n, m)` graph in the edge-list format.
//!
//! Each run picks `m` distinct unordered vertex pairs and a uniform weight
//! for each, then writes them to `--output` or the first free
//! `graph_<n>.txt` in the working directory. The written path is printed on
//! stdout.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use bellman_cli::{cli::exit_code_for_parse_error, logging};
use bellman_providers_edgelist::generate::{self, GraphSpec};
use clap::Parser;
use tracing::{error, info};

/// Options for `bellman-graphgen`.
#[derive(Debug, Parser)]
#[command(name = "bellman-graphgen", version, about = "Generate a random weighted graph file.")]
struct Args {
    /// Number of vertices.
    #[arg(short = 'v', long, default_value_t = 10)]
    vertices: usize,

    /// Number of distinct undirected edges.
    #[arg(short = 'e', long, default_value_t = 25)]
    edges: usize,

    /// Draw weights from -300..=300 instead of 0..=300.
    #[arg(long)]
    negative: bool,

    /// Seed for reproducible graphs.
    #[arg(long)]
    seed: Option<u64>,

    /// Destination file.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn try_main(args: Args) -> Result<PathBuf> {
    let spec = GraphSpec {
        vertices: args.vertices,
        edges: args.edges,
        negative: args.negative,
        seed: args.seed,
    };
    let graph = generate::generate(&spec).context("invalid graph parameters")?;
    let path = args
        .output
        .unwrap_or_else(|| generate::next_free_path(Path::new(".")));
    let file =
        File::create(&path).with_context(|| format!("failed to create `{}`", path.display()))?;
    generate::write_edge_list(BufWriter::new(file), &graph)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(path = %path.display(), vertices = spec.vertices, edges = spec.edges, "graph written");
    Ok(path)
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::from(255);
    }
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let status = exit_code_for_parse_error(&err);
            let _ = err.print();
            return ExitCode::from(status);
        }
    };
    match try_main(args) {
        Ok(path) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{}", path.display()).is_err() {
                return ExitCode::from(255);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = format!("{err:#}"), "graph generation failed");
            ExitCode::from(255)
        }
    }
}
