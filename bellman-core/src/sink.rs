//! Consumers of finished runs.
//!
//! The engine never writes results anywhere itself. Callers time an
//! invocation, wrap it in a [`RunReport`], and hand it to whichever sinks
//! they own (console output, a results log, a test recorder).

use std::time::Duration;

use crate::outcome::Outcome;

/// Everything a sink needs to know about one finished invocation.
#[derive(Clone, Copy, Debug)]
pub struct RunReport<'a> {
    /// Caller-chosen label, typically the graph file name.
    pub label: &'a str,
    /// Size of the worker pool used for the run.
    pub threads: usize,
    /// Result of the invocation.
    pub outcome: &'a Outcome,
    /// Wall-clock time spent inside the engine.
    pub elapsed: Duration,
}

/// Receives finished runs.
///
/// Sinks must contain their own failures: a sink that cannot persist a report
/// degrades or logs, it never alters the computed outcome.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use bellman_core::{Outcome, ResultSink, RunReport};
///
/// #[derive(Default)]
/// struct Count(usize);
///
/// impl ResultSink for Count {
///     fn accept(&mut self, _report: &RunReport<'_>) {
///         self.0 += 1;
///     }
/// }
///
/// let mut sink = Count::default();
/// let outcome = Outcome::NegativeCycle;
/// sink.accept(&RunReport {
///     label: "demo",
///     threads: 2,
///     outcome: &outcome,
///     elapsed: Duration::from_millis(3),
/// });
/// assert_eq!(sink.0, 1);
/// ```
pub trait ResultSink {
    /// Consumes one report.
    fn accept(&mut self, report: &RunReport<'_>);
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn accept(&mut self, report: &RunReport<'_>) {
        (**self).accept(report);
    }
}

impl<S: ResultSink> ResultSink for [S] {
    fn accept(&mut self, report: &RunReport<'_>) {
        for sink in self {
            sink.accept(report);
        }
    }
}
