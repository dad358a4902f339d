//! Static work partitioning across the worker pool.
//!
//! Work is split into one contiguous chunk per worker of `ceil(total /
//! workers)` items. The final chunk may be shorter and surplus workers
//! receive empty ranges. Chunk boundaries never change between rounds, so a
//! worker always revisits the same slice of the edge array.

use std::{ops::Range, slice};

use crate::graph::{Edge, EdgeSet, SourceIndex};

/// How the relaxation work of a round is divided between workers.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PartitionStrategy {
    /// Contiguous ranges of edge indices. Balances load regardless of degree
    /// skew.
    #[default]
    EdgeChunks,
    /// Contiguous ranges of source vertices, each worker relaxing the
    /// outgoing edges of its vertices. Workers owning low-degree vertices can
    /// sit idle on skewed graphs.
    SourceVertices,
}

impl PartitionStrategy {
    /// Stable lowercase name used in logs and benchmark ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EdgeChunks => "edge-chunks",
            Self::SourceVertices => "source-vertices",
        }
    }
}

/// Contiguous split of `[0, total)` into one range per worker.
///
/// # Examples
/// ```
/// use bellman_core::ChunkPlan;
///
/// let plan = ChunkPlan::new(10, 4);
/// assert_eq!(plan.chunk_size(), 3);
/// assert_eq!(plan.range(0), 0..3);
/// assert_eq!(plan.range(3), 9..10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkPlan {
    total: usize,
    workers: usize,
    chunk_size: usize,
}

impl ChunkPlan {
    /// Plans chunks for `total` items across `workers` workers.
    ///
    /// A zero worker count is treated as one worker.
    #[must_use]
    pub const fn new(total: usize, workers: usize) -> Self {
        let worker_count = if workers == 0 { 1 } else { workers };
        Self {
            total,
            workers: worker_count,
            chunk_size: total.div_ceil(worker_count),
        }
    }

    /// Number of items covered by the plan.
    #[must_use]
    #[rustfmt::skip]
    pub const fn total(&self) -> usize { self.total }

    /// Number of workers the plan was built for.
    #[must_use]
    #[rustfmt::skip]
    pub const fn workers(&self) -> usize { self.workers }

    /// Upper bound on the length of any chunk.
    #[must_use]
    #[rustfmt::skip]
    pub const fn chunk_size(&self) -> usize { self.chunk_size }

    /// Range owned by `worker`; empty for surplus or unknown workers.
    #[must_use]
    pub fn range(&self, worker: usize) -> Range<usize> {
        let start = worker.saturating_mul(self.chunk_size).min(self.total);
        let end = start.saturating_add(self.chunk_size).min(self.total);
        start..end
    }

    /// Iterates over every worker's range in worker order.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.workers).map(|worker| self.range(worker))
    }
}

/// Edges of one invocation bound to a partition plan.
pub(crate) struct Workload<'a> {
    edges: &'a EdgeSet,
    plan: ChunkPlan,
    index: Option<SourceIndex>,
}

impl<'a> Workload<'a> {
    pub(crate) fn new(edges: &'a EdgeSet, strategy: PartitionStrategy, workers: usize) -> Self {
        match strategy {
            PartitionStrategy::EdgeChunks => Self {
                edges,
                plan: ChunkPlan::new(edges.len(), workers),
                index: None,
            },
            PartitionStrategy::SourceVertices => Self {
                edges,
                plan: ChunkPlan::new(edges.vertex_count(), workers),
                index: Some(edges.source_index()),
            },
        }
    }

    /// Edges owned by `worker` for every round of the invocation.
    pub(crate) fn edges_for(&self, worker: usize) -> WorkerEdges<'_> {
        let range = self.plan.range(worker);
        match &self.index {
            None => {
                let chunk = self.edges.as_slice().get(range).unwrap_or_default();
                WorkerEdges::Chunk(chunk.iter())
            }
            Some(index) => WorkerEdges::Vertices {
                edges: self.edges,
                index,
                vertices: range,
                pending: slice::Iter::default(),
            },
        }
    }
}

/// Iterator over the edges assigned to one worker.
pub(crate) enum WorkerEdges<'a> {
    Chunk(slice::Iter<'a, Edge>),
    Vertices {
        edges: &'a EdgeSet,
        index: &'a SourceIndex,
        vertices: Range<usize>,
        pending: slice::Iter<'a, usize>,
    },
}

impl<'a> Iterator for WorkerEdges<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Chunk(chunk) => chunk.next(),
            Self::Vertices {
                edges,
                index,
                vertices,
                pending,
            } => {
                let edges: &'a EdgeSet = *edges;
                let index: &'a SourceIndex = *index;
                loop {
                    if let Some(&id) = pending.next() {
                        if let Some(edge) = edges.get(id) {
                            return Some(edge);
                        }
                        continue;
                    }
                    let vertex = vertices.next()?;
                    *pending = index.outgoing(vertex).iter();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::even(8, 4)]
    #[case::uneven(10, 4)]
    #[case::more_workers_than_items(3, 8)]
    #[case::single_worker(17, 1)]
    #[case::empty(0, 3)]
    fn ranges_tile_the_work_exactly_once(#[case] total: usize, #[case] workers: usize) {
        let plan = ChunkPlan::new(total, workers);
        let mut covered = Vec::new();
        let mut previous_end = 0;
        for range in plan.ranges() {
            assert_eq!(range.start, previous_end);
            assert!(range.len() <= plan.chunk_size());
            previous_end = range.end;
            covered.extend(range);
        }
        assert_eq!(covered, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn chunk_size_is_the_ceiling_of_total_over_workers() {
        assert_eq!(ChunkPlan::new(10, 4).chunk_size(), 3);
        assert_eq!(ChunkPlan::new(12, 4).chunk_size(), 3);
        assert_eq!(ChunkPlan::new(13, 4).chunk_size(), 4);
    }

    #[test]
    fn surplus_workers_receive_empty_ranges() {
        let plan = ChunkPlan::new(2, 5);
        assert_eq!(plan.range(1), 1..2);
        assert!(plan.range(2).is_empty());
        assert!(plan.range(40).is_empty());
    }

    fn assigned_edges(edges: &EdgeSet, strategy: PartitionStrategy, workers: usize) -> Vec<Edge> {
        let workload = Workload::new(edges, strategy, workers);
        let mut seen: Vec<Edge> = (0..workers)
            .flat_map(|worker| workload.edges_for(worker).copied().collect::<Vec<_>>())
            .collect();
        seen.sort_unstable_by_key(|edge| (edge.source(), edge.target(), edge.weight()));
        seen
    }

    #[rstest]
    #[case::edge_chunks(PartitionStrategy::EdgeChunks)]
    #[case::source_vertices(PartitionStrategy::SourceVertices)]
    fn every_edge_is_assigned_to_exactly_one_worker(#[case] strategy: PartitionStrategy) {
        let edges = EdgeSet::builder(5)
            .with_edge(0, 1, 3)
            .with_edge(4, 3, -1)
            .with_edge(0, 2, 1)
            .with_edge(2, 4, 2)
            .with_edge(3, 3, 0)
            .build()
            .expect("valid edges");
        let mut expected = edges.as_slice().to_vec();
        expected.sort_unstable_by_key(|edge| (edge.source(), edge.target(), edge.weight()));

        for workers in [1, 2, 3, 8] {
            assert_eq!(assigned_edges(&edges, strategy, workers), expected);
        }
    }

    #[test]
    fn source_vertex_workers_only_see_their_own_vertices() {
        let edges = EdgeSet::builder(4)
            .with_edge(3, 0, 1)
            .with_edge(0, 1, 1)
            .with_edge(1, 2, 1)
            .with_edge(0, 3, 1)
            .build()
            .expect("valid edges");
        let workload = Workload::new(&edges, PartitionStrategy::SourceVertices, 2);
        let first: Vec<usize> = workload.edges_for(0).map(Edge::source).collect();
        let second: Vec<usize> = workload.edges_for(1).map(Edge::source).collect();
        assert_eq!(first, vec![0, 0, 1]);
        assert_eq!(second, vec![3]);
    }

    #[test]
    fn zero_workers_fall_back_to_one() {
        let plan = ChunkPlan::new(5, 0);
        assert_eq!(plan.workers(), 1);
        assert_eq!(plan.range(0), 0..5);
    }
}
