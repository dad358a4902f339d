//! Small helpers shared across CLI tests.

use std::{fs, path::PathBuf, time::Duration};

use bellman_core::{Outcome, ResultSink, RunReport};
use clap::Parser;
use tempfile::TempDir;

use super::Cli;

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_graph(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Err(err) = fs::write(&path, contents) {
        panic!("failed to write {}: {err}", path.display());
    }
    path
}

/// Parses `args` after the program name, panicking on clap errors.
pub(super) fn parse(args: &[&str]) -> Cli {
    match Cli::try_parse_from(std::iter::once("bellman").chain(args.iter().copied())) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

/// Owned copy of one delivered report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Recorded {
    pub(super) label: String,
    pub(super) threads: usize,
    pub(super) outcome: Outcome,
    pub(super) elapsed: Duration,
}

/// Sink remembering every report it receives.
#[derive(Default)]
pub(super) struct RecordingSink(pub(super) Vec<Recorded>);

impl ResultSink for RecordingSink {
    fn accept(&mut self, report: &RunReport<'_>) {
        self.0.push(Recorded {
            label: report.label.to_owned(),
            threads: report.threads,
            outcome: report.outcome.clone(),
            elapsed: report.elapsed,
        });
    }
}
