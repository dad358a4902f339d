//! Appending timing records to the CSV results log.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use bellman_core::{ResultSink, RunReport};
use tracing::warn;

/// Preferred location of the results log, relative to the working directory.
pub const DEFAULT_RESULTS_PATH: &str = "results/bellman.csv";

/// [`ResultSink`] appending `graph,threads,seconds` lines to a CSV file.
///
/// Each record first goes to the preferred path. If that cannot be opened,
/// the same file name is tried in the fallback directory (the working
/// directory by default). If both fail a warning is logged and the record is
/// dropped; the run itself is never affected.
#[derive(Clone, Debug)]
pub struct CsvResultLog {
    preferred: PathBuf,
    fallback_dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl CsvResultLog {
    /// Creates a log preferring `preferred`.
    #[must_use]
    pub fn new(preferred: impl Into<PathBuf>) -> Self {
        Self {
            preferred: preferred.into(),
            fallback_dir: PathBuf::from("."),
            last_written: None,
        }
    }

    /// Overrides the fallback directory.
    #[must_use]
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = dir.into();
        self
    }

    /// Path that received the most recent record, if any.
    #[must_use]
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    fn fallback_path(&self) -> PathBuf {
        let name = self
            .preferred
            .file_name()
            .map_or_else(|| "bellman.csv".into(), ToOwned::to_owned);
        self.fallback_dir.join(name)
    }
}

/// Formats one CSV record without the trailing newline.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use bellman_cli::results_log::format_record;
/// use bellman_core::{Outcome, RunReport};
///
/// let outcome = Outcome::NegativeCycle;
/// let report = RunReport {
///     label: "graph_0.txt",
///     threads: 4,
///     outcome: &outcome,
///     elapsed: Duration::from_millis(1250),
/// };
/// assert_eq!(format_record(&report), "graph_0.txt,4,1.250000");
/// ```
#[must_use]
pub fn format_record(report: &RunReport<'_>) -> String {
    format!(
        "{},{},{:.6}",
        report.label,
        report.threads,
        report.elapsed.as_secs_f64()
    )
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

impl ResultSink for CsvResultLog {
    fn accept(&mut self, report: &RunReport<'_>) {
        let record = format_record(report);
        let preferred_error = match append_line(&self.preferred, &record) {
            Ok(()) => {
                self.last_written = Some(self.preferred.clone());
                return;
            }
            Err(error) => error,
        };

        let fallback = self.fallback_path();
        warn!(
            preferred = %self.preferred.display(),
            fallback = %fallback.display(),
            error = %preferred_error,
            "results log unavailable, using fallback"
        );
        match append_line(&fallback, &record) {
            Ok(()) => self.last_written = Some(fallback),
            Err(error) => {
                warn!(
                    preferred = %self.preferred.display(),
                    fallback = %fallback.display(),
                    error = %error,
                    "failed to append results record"
                );
                self.last_written = None;
            }
        }
    }
}
