//! Parallel Bellman-Ford relaxation engine.
//!
//! An invocation moves through `Init → Relaxing(1..V-1) → Validating →
//! {Converged, NegativeCycle}`. Each relaxation round is one rayon
//! `broadcast` over a pool sized to the configured thread count: every pool
//! thread relaxes exactly its own chunk, and the broadcast only returns once
//! all chunks are done, so round `r + 1` always observes every store from
//! round `r`.

use std::{fmt, num::NonZeroUsize};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument};

use crate::{
    detect::{NegativeCycleFlag, detect_negative_cycle},
    distance::{DistanceArray, INFINITY},
    error::{EngineError, Result},
    graph::{EdgeSet, VertexId},
    outcome::Outcome,
    partition::{PartitionStrategy, Workload},
    relax::{Discipline, Relaxer},
};

/// Stage of an invocation, reported in logs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Allocating the distance array and worker pool.
    Init,
    /// Running relaxation round `round` of `V - 1`.
    Relaxing {
        /// One-based round number.
        round: usize,
    },
    /// Checking the relaxed distances for a reachable negative cycle.
    Validating,
    /// Finished with exact distances.
    Converged,
    /// Finished after detecting a reachable negative cycle.
    NegativeCycle,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Relaxing { round } => write!(f, "relaxing({round})"),
            Self::Validating => f.write_str("validating"),
            Self::Converged => f.write_str("converged"),
            Self::NegativeCycle => f.write_str("negative_cycle"),
        }
    }
}

/// Configures and constructs [`RelaxationEngine`] instances.
///
/// # Examples
/// ```
/// use bellman_core::{Discipline, EngineBuilder, PartitionStrategy};
///
/// let engine = EngineBuilder::new()
///     .with_threads(4)
///     .with_discipline(Discipline::VertexLocked)
///     .with_partition(PartitionStrategy::SourceVertices)
///     .build()
///     .expect("four threads is a valid configuration");
/// assert_eq!(engine.threads().get(), 4);
/// assert_eq!(engine.discipline(), Discipline::VertexLocked);
/// ```
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    threads: usize,
    discipline: Discipline,
    partition: PartitionStrategy,
    early_exit: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            discipline: Discipline::default(),
            partition: PartitionStrategy::default(),
            early_exit: false,
        }
    }
}

impl EngineBuilder {
    /// Creates a builder using every available core and the unsynchronized
    /// discipline over contiguous edge chunks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the worker pool size.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Returns the configured worker pool size.
    #[must_use]
    #[rustfmt::skip]
    pub const fn threads(&self) -> usize { self.threads }

    /// Selects the relaxation discipline.
    #[must_use]
    pub const fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Selects the partition strategy.
    #[must_use]
    pub const fn with_partition(mut self, partition: PartitionStrategy) -> Self {
        self.partition = partition;
        self
    }

    /// Stops relaxing after a round in which no distance changed.
    ///
    /// A round without stores proves the array is a fixed point, so the
    /// outcome is unaffected; only the number of rounds shrinks.
    #[must_use]
    pub const fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    /// Validates the configuration and constructs the engine.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidThreadCount`] for a zero thread count.
    ///
    /// # Examples
    /// ```
    /// use bellman_core::{EngineBuilder, EngineError};
    ///
    /// let err = EngineBuilder::new().with_threads(0).build().unwrap_err();
    /// assert_eq!(err, EngineError::InvalidThreadCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<RelaxationEngine> {
        let threads =
            NonZeroUsize::new(self.threads).ok_or(EngineError::InvalidThreadCount {
                got: self.threads,
            })?;
        Ok(RelaxationEngine {
            threads,
            discipline: self.discipline,
            partition: self.partition,
            early_exit: self.early_exit,
        })
    }
}

/// Runs Bellman-Ford relaxation across a fixed pool of worker threads.
///
/// The engine holds configuration only. Every call to [`RelaxationEngine::run`]
/// allocates its own distance array and worker pool and releases both before
/// returning.
///
/// # Examples
/// ```
/// use bellman_core::{EdgeSet, EngineBuilder, INFINITY};
///
/// let edges = EdgeSet::builder(3).with_edge(0, 1, 2).build()?;
/// let engine = EngineBuilder::new().with_threads(2).build()?;
/// let outcome = engine.run(&edges, 0)?;
/// let table = outcome.distances().expect("no negative cycle");
/// assert_eq!(table.as_slice(), &[0, 2, INFINITY]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct RelaxationEngine {
    threads: NonZeroUsize,
    discipline: Discipline,
    partition: PartitionStrategy,
    early_exit: bool,
}

impl RelaxationEngine {
    /// Worker pool size.
    #[must_use]
    #[rustfmt::skip]
    pub const fn threads(&self) -> NonZeroUsize { self.threads }

    /// Relaxation discipline.
    #[must_use]
    #[rustfmt::skip]
    pub const fn discipline(&self) -> Discipline { self.discipline }

    /// Partition strategy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn partition(&self) -> PartitionStrategy { self.partition }

    /// Whether relaxation stops after a round without updates.
    #[must_use]
    #[rustfmt::skip]
    pub const fn early_exit(&self) -> bool { self.early_exit }

    /// Computes shortest paths from `source` over `edges`.
    ///
    /// # Errors
    /// Returns [`EngineError::SourceOutOfRange`] for an unknown source,
    /// [`EngineError::AllocationFailed`] when the distance array or lock table
    /// cannot be allocated, and [`EngineError::ThreadPool`] when the workers
    /// fail to start.
    pub fn run(&self, edges: &EdgeSet, source: VertexId) -> Result<Outcome> {
        self.run_with_observer(edges, source, |_, _| {})
    }

    /// Like [`RelaxationEngine::run`], calling `on_round` with the round
    /// number and the distance array at every round barrier.
    ///
    /// # Errors
    /// Same as [`RelaxationEngine::run`].
    ///
    /// # Examples
    /// ```
    /// use bellman_core::{EdgeSet, EngineBuilder};
    ///
    /// let edges = EdgeSet::builder(3).with_edge(1, 2, 1).with_edge(0, 1, 1).build()?;
    /// let engine = EngineBuilder::new().with_threads(1).build()?;
    /// let mut rounds = Vec::new();
    /// engine.run_with_observer(&edges, 0, |round, dist| rounds.push((round, dist.snapshot())))?;
    /// assert_eq!(rounds.len(), 2);
    /// assert_eq!(rounds[1].1, vec![0, 1, 2]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "engine.run",
        err,
        skip(self, edges, on_round),
        fields(
            vertices = edges.vertex_count(),
            edges = edges.len(),
            source = source,
            threads = self.threads.get(),
            discipline = self.discipline.as_str(),
            partition = self.partition.as_str(),
        ),
    )]
    pub fn run_with_observer<F>(
        &self,
        edges: &EdgeSet,
        source: VertexId,
        mut on_round: F,
    ) -> Result<Outcome>
    where
        F: FnMut(usize, &DistanceArray),
    {
        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        debug!(phase = %Phase::Init, "allocating invocation state");
        let dist = DistanceArray::initialize(edges.vertex_count(), source)?;
        let relaxer = Relaxer::new(self.discipline, edges.vertex_count())?;
        let workload = Workload::new(edges, self.partition, self.threads.get());
        let pool = self.start_pool()?;

        let underflow = NegativeCycleFlag::default();
        let rounds = edges.vertex_count().saturating_sub(1);
        let mut completed = 0_usize;
        let mut total_updates = 0_usize;
        for round in 1..=rounds {
            let updates = relax_round(&pool, &workload, &dist, &relaxer, &underflow);
            completed = round;
            total_updates = total_updates.saturating_add(updates);
            let stage = Phase::Relaxing { round };
            debug!(phase = %stage, updates, "round completed");
            on_round(round, &dist);
            if underflow.is_raised() {
                debug!(round, "candidate distance underflowed");
                break;
            }
            if self.early_exit && updates == 0 {
                debug!(round, "fixed point reached before the final round");
                break;
            }
        }

        debug!(phase = %Phase::Validating, "checking for negative cycles");
        let phase = if underflow.is_raised() || detect_negative_cycle(&pool, &workload, &dist) {
            Phase::NegativeCycle
        } else {
            Phase::Converged
        };

        #[cfg(feature = "metrics")]
        record_metrics(
            completed,
            total_updates,
            phase == Phase::NegativeCycle,
            started.elapsed(),
        );

        info!(
            outcome = %phase,
            rounds = completed,
            updates = total_updates,
            "relaxation finished"
        );
        Ok(match phase {
            Phase::NegativeCycle => Outcome::NegativeCycle,
            _ => Outcome::Converged(dist.into_table()),
        })
    }

    fn start_pool(&self) -> Result<ThreadPool> {
        let threads = self.threads.get();
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("relax-worker-{index}"))
            .build()
            .map_err(|error| EngineError::ThreadPool {
                threads,
                message: error.to_string().into(),
            })
    }
}

/// Runs one relaxation round and returns the number of stores issued.
///
/// Candidates that underflow the distance range raise `underflow`; with the
/// edge weight budget enforced this only happens on a reachable negative
/// cycle. Overflowing candidates cannot improve any slot and are skipped.
fn relax_round(
    pool: &ThreadPool,
    workload: &Workload<'_>,
    dist: &DistanceArray,
    relaxer: &Relaxer,
    underflow: &NegativeCycleFlag,
) -> usize {
    pool.broadcast(|ctx| {
        let mut updates = 0_usize;
        for edge in workload.edges_for(ctx.index()) {
            let from = dist.read(edge.source());
            if from == INFINITY {
                continue;
            }
            let Some(candidate) = from.checked_add(edge.weight()) else {
                if edge.weight() < 0 {
                    underflow.raise();
                }
                continue;
            };
            if relaxer.try_relax(dist, edge.target(), candidate) {
                updates = updates.saturating_add(1);
            }
        }
        updates
    })
    .into_iter()
    .fold(0_usize, usize::saturating_add)
}

#[cfg(feature = "metrics")]
fn record_metrics(
    rounds: usize,
    updates: usize,
    negative_cycle: bool,
    elapsed: std::time::Duration,
) {
    metrics::counter!("relaxation_rounds_total")
        .increment(u64::try_from(rounds).unwrap_or(u64::MAX));
    metrics::counter!("relaxation_updates_total")
        .increment(u64::try_from(updates).unwrap_or(u64::MAX));
    if negative_cycle {
        metrics::counter!("negative_cycles_detected_total").increment(1);
    }
    metrics::histogram!("relaxation_run_seconds").record(elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;

    use bellman_test_support::graphs::{self, GraphFixture};
    use proptest::prelude::*;
    use rstest::rstest;

    use crate::{
        distance::DistanceTable,
        graph::Weight,
        test_utils::{fixture_edges, suite_proptest_config},
    };

    fn chain(weights: &[Weight]) -> EdgeSet {
        let mut builder = EdgeSet::builder(weights.len() + 1);
        for (index, &weight) in weights.iter().enumerate() {
            builder.push(crate::graph::Edge::new(index, index + 1, weight));
        }
        builder.build().expect("chain edges are in range")
    }

    #[test]
    fn builder_rejects_zero_threads() {
        assert_eq!(
            EngineBuilder::new().with_threads(0).build().map(|_| ()),
            Err(EngineError::InvalidThreadCount { got: 0 })
        );
    }

    #[test]
    fn builder_defaults_to_at_least_one_thread() {
        let builder = EngineBuilder::new();
        assert!(builder.threads() >= 1);
        let engine = builder.build().expect("default configuration is valid");
        assert_eq!(engine.discipline(), Discipline::Unsynchronized);
        assert_eq!(engine.partition(), PartitionStrategy::EdgeChunks);
        assert!(!engine.early_exit());
    }

    #[test]
    fn unknown_source_is_rejected_before_any_round() {
        let engine = EngineBuilder::new().with_threads(2).build().expect("valid");
        let mut rounds = 0;
        let result = engine.run_with_observer(&chain(&[1]), 7, |_, _| rounds += 1);
        assert_eq!(
            result,
            Err(EngineError::SourceOutOfRange {
                source_vertex: 7,
                vertex_count: 2,
            })
        );
        assert_eq!(rounds, 0);
    }

    #[rstest]
    #[case::unsynchronized(Discipline::Unsynchronized)]
    #[case::vertex_locked(Discipline::VertexLocked)]
    #[case::global_locked(Discipline::GlobalLocked)]
    fn runs_exactly_v_minus_one_rounds(#[case] discipline: Discipline) {
        let engine = EngineBuilder::new()
            .with_threads(3)
            .with_discipline(discipline)
            .build()
            .expect("valid");
        let mut seen = Vec::new();
        let outcome = engine
            .run_with_observer(&chain(&[1, 1, 1, 1]), 0, |round, _| seen.push(round))
            .expect("run succeeds");
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(
            outcome.distances().map(DistanceTable::as_slice),
            Some(&[0, 1, 2, 3, 4][..])
        );
    }

    #[test]
    fn early_exit_stops_after_a_quiet_round() {
        let engine = EngineBuilder::new()
            .with_threads(1)
            .with_early_exit(true)
            .build()
            .expect("valid");
        let mut seen = Vec::new();
        // Storage order matches path order, so one round settles everything.
        engine
            .run_with_observer(&chain(&[2, 2, 2, 2, 2]), 0, |round, _| seen.push(round))
            .expect("run succeeds");
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn single_vertex_graph_runs_no_rounds() {
        let edges = EdgeSet::builder(1).build().expect("one vertex");
        let engine = EngineBuilder::new().with_threads(4).build().expect("valid");
        let mut rounds = 0;
        let outcome = engine
            .run_with_observer(&edges, 0, |_, _| rounds += 1)
            .expect("run succeeds");
        assert_eq!(rounds, 0);
        assert_eq!(outcome.distances().map(DistanceTable::as_slice), Some(&[0][..]));
    }

    #[test]
    fn negative_self_loop_is_reported() {
        let edges = EdgeSet::builder(2)
            .with_edge(0, 1, 3)
            .with_edge(1, 1, -1)
            .build()
            .expect("valid edges");
        let engine = EngineBuilder::new().with_threads(2).build().expect("valid");
        assert_eq!(engine.run(&edges, 0), Ok(Outcome::NegativeCycle));
    }

    #[rstest]
    fn fixtures_match_their_recorded_answers(
        #[values(
            graphs::MIXED_WEIGHTS,
            graphs::NEGATIVE_TRIANGLE,
            graphs::DISCONNECTED,
            graphs::UNREACHABLE_NEGATIVE_CYCLE,
            graphs::REVERSED_PATH
        )]
        fixture: GraphFixture,
        #[values(1, 2, 4, 8)] threads: usize,
    ) {
        let engine = EngineBuilder::new().with_threads(threads).build().expect("valid");
        let outcome = engine
            .run(&fixture_edges(&fixture), fixture.source)
            .expect("run succeeds");
        let expected = fixture.expected.map(|distances| {
            distances
                .iter()
                .map(|distance| distance.unwrap_or(INFINITY))
                .collect::<Vec<_>>()
        });
        assert_eq!(
            outcome.into_distances().map(DistanceTable::into_vec),
            expected,
            "{}",
            fixture.name
        );
    }

    proptest! {
        #![proptest_config(suite_proptest_config(64))]

        #[test]
        fn parallel_engine_agrees_with_the_sequential_solver(
            vertex_count in 1_usize..12,
            raw_edges in prop::collection::vec((0_usize..12, 0_usize..12, -20_i64..50), 0..40),
            threads in 1_usize..6,
            discipline in prop_oneof![
                Just(Discipline::Unsynchronized),
                Just(Discipline::VertexLocked),
                Just(Discipline::GlobalLocked),
            ],
            partition in prop_oneof![
                Just(PartitionStrategy::EdgeChunks),
                Just(PartitionStrategy::SourceVertices),
            ],
        ) {
            let edges = EdgeSet::builder(vertex_count)
                .with_edges(
                    raw_edges
                        .into_iter()
                        .filter(|&(u, v, _)| u < vertex_count && v < vertex_count),
                )
                .build()
                .expect("out-of-range edges are filtered out");
            let engine = EngineBuilder::new()
                .with_threads(threads)
                .with_discipline(discipline)
                .with_partition(partition)
                .build()
                .expect("valid");
            let expected = crate::reference::bellman_ford(&edges, 0).expect("source exists");
            prop_assert_eq!(engine.run(&edges, 0).expect("run succeeds"), expected);
        }
    }

    #[test]
    fn phase_labels_are_stable() {
        assert_eq!(Phase::Init.to_string(), "init");
        assert_eq!(Phase::Relaxing { round: 3 }.to_string(), "relaxing(3)");
        assert_eq!(Phase::Validating.to_string(), "validating");
        assert_eq!(Phase::NegativeCycle.to_string(), "negative_cycle");
    }
}
