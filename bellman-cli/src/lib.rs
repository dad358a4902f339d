//! Support library for the `bellman` and `bellman-graphgen` binaries.
//!
//! Exposes argument parsing, the run pipeline, and the result sinks so tests
//! can drive the command without spawning a subprocess.

pub mod cli;
pub mod logging;
pub mod report;
pub mod results_log;
