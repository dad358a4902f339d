//! Negative-cycle detection over a relaxed distance array.
//!
//! After the relaxation rounds every edge is checked once more. Any edge that
//! still admits a strictly improving relaxation from a reachable vertex proves
//! that the source reaches a negative cycle.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::ThreadPool;
use tracing::instrument;

use crate::{
    distance::{DistanceArray, INFINITY},
    graph::Edge,
    partition::Workload,
};

/// Write-once flag raised when a negative cycle is observed.
///
/// Workers only ever store `true`, so concurrent raises are idempotent and no
/// update can be lost.
///
/// # Examples
/// ```
/// use bellman_core::NegativeCycleFlag;
///
/// let flag = NegativeCycleFlag::default();
/// assert!(!flag.is_raised());
/// flag.raise();
/// flag.raise();
/// assert!(flag.is_raised());
/// ```
#[derive(Debug, Default)]
pub struct NegativeCycleFlag(AtomicBool);

impl NegativeCycleFlag {
    /// Records that a negative cycle was observed.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once any worker has raised the flag.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Returns `true` when `edge` can still lower the distance of its target.
///
/// A candidate that underflows the distance range is below every simple-path
/// weight and therefore counts as an improvement.
pub(crate) fn admits_relaxation(dist: &DistanceArray, edge: &Edge) -> bool {
    let from = dist.read(edge.source());
    if from == INFINITY {
        return false;
    }
    from.checked_add(edge.weight())
        .map_or(edge.weight() < 0, |candidate| candidate < dist.read(edge.target()))
}

/// Runs the validation pass over every edge of the workload.
#[instrument(name = "engine.validate", skip_all)]
pub(crate) fn detect_negative_cycle(
    pool: &ThreadPool,
    workload: &Workload<'_>,
    dist: &DistanceArray,
) -> bool {
    let flag = NegativeCycleFlag::default();
    pool.broadcast(|ctx| {
        if workload
            .edges_for(ctx.index())
            .any(|edge| admits_relaxation(dist, edge))
        {
            flag.raise();
        }
    });
    flag.is_raised()
}
