//! Benchmark parameter types.

use std::fmt;

use bellman_core::{Discipline, PartitionStrategy};

/// One point in the relaxation benchmark matrix.
#[derive(Clone, Copy, Debug)]
pub struct RelaxationBenchParams {
    /// Worker pool size.
    pub threads: usize,
    /// Relaxation discipline.
    pub discipline: Discipline,
    /// Partition strategy.
    pub partition: PartitionStrategy,
}

impl fmt::Display for RelaxationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={},{},{}",
            self.threads,
            self.discipline.as_str(),
            self.partition.as_str()
        )
    }
}
