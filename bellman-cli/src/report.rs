//! Console rendering of a finished run.

use std::{
    fmt,
    io::{self, Write},
    time::Duration,
};

use bellman_core::{Distance, INFINITY, Outcome, ResultSink, RunReport};

/// Header printed above the distance table.
pub const TABLE_HEADER: &str = "Vertex  |  Distance from Source";
/// Line printed instead of the table when a negative cycle is reachable.
pub const NEGATIVE_CYCLE_LINE: &str = "Graph contains negative weight cycle";

/// Displays a distance, rendering [`INFINITY`] as `INF`.
#[derive(Clone, Copy, Debug)]
pub struct DisplayDistance(pub Distance);

impl fmt::Display for DisplayDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == INFINITY {
            f.write_str("INF")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Writes the console report for `outcome`.
///
/// The distance table appears only when `show_table` is set; the
/// negative-cycle notice and the timing line are always written.
///
/// # Errors
/// Propagates failures from `writer`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use bellman_cli::report::render_report;
/// use bellman_core::{DistanceTable, INFINITY, Outcome};
///
/// let outcome = Outcome::Converged(DistanceTable::from_distances(vec![0, 2, INFINITY]));
/// let mut out = Vec::new();
/// render_report(&outcome, Duration::from_micros(1500), true, &mut out)?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "Vertex  |  Distance from Source\n0 0\n1 2\n2 INF\nTotal execution time: 0.001500 seconds\n",
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_report(
    outcome: &Outcome,
    elapsed: Duration,
    show_table: bool,
    mut writer: impl Write,
) -> io::Result<()> {
    match outcome {
        Outcome::NegativeCycle => writeln!(writer, "{NEGATIVE_CYCLE_LINE}")?,
        Outcome::Converged(table) if show_table => {
            writeln!(writer, "{TABLE_HEADER}")?;
            for (vertex, &distance) in table.as_slice().iter().enumerate() {
                writeln!(writer, "{vertex} {}", DisplayDistance(distance))?;
            }
        }
        Outcome::Converged(_) => {}
    }
    writeln!(
        writer,
        "Total execution time: {:.6} seconds",
        elapsed.as_secs_f64()
    )
}

/// [`ResultSink`] printing each report to a writer.
///
/// The first write failure is kept for [`ConsoleSink::finish`]; later reports
/// are skipped.
pub struct ConsoleSink<W: Write> {
    writer: W,
    show_table: bool,
    failure: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a sink writing to `writer`.
    pub const fn new(writer: W, show_table: bool) -> Self {
        Self {
            writer,
            show_table,
            failure: None,
        }
    }

    /// Flushes the writer and returns it, or the first write failure.
    ///
    /// # Errors
    /// Returns the first error raised while rendering or flushing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.failure.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn accept(&mut self, report: &RunReport<'_>) {
        if self.failure.is_some() {
            return;
        }
        if let Err(error) = render_report(
            report.outcome,
            report.elapsed,
            self.show_table,
            &mut self.writer,
        ) {
            self.failure = Some(error);
        }
    }
}
