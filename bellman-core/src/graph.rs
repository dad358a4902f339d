//! Immutable directed edge storage consumed by the relaxation engine.
//!
//! Edges live in one flat array so workers address them by index instead of
//! walking shared adjacency chains. When mirroring is requested the reverse of
//! every input edge is appended after the originals, which keeps the first
//! `E` indices identical to input order.

use crate::error::GraphError;

/// Identifier of a vertex, always in `[0, vertex_count)`.
pub type VertexId = usize;

/// Signed edge weight. Negative weights are permitted.
pub type Weight = i64;

/// Exclusive bound on the summed absolute weight of an edge set.
///
/// Every simple path then weighs strictly less than `INFINITY` in magnitude,
/// so exact distances never overflow and an overflowing candidate can only
/// come from a walk around a negative cycle.
pub const WEIGHT_BUDGET: u64 = Weight::MAX.unsigned_abs();

/// A directed weighted edge `source -> target`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    weight: Weight,
}

impl Edge {
    /// Creates an edge. Vertex ids are validated by [`EdgeSetBuilder::build`].
    ///
    /// # Examples
    /// ```
    /// use bellman_core::Edge;
    ///
    /// let edge = Edge::new(0, 1, -4);
    /// assert_eq!((edge.source(), edge.target(), edge.weight()), (0, 1, -4));
    /// ```
    #[must_use]
    pub const fn new(source: VertexId, target: VertexId, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the tail of the edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> VertexId { self.source }

    /// Returns the head of the edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> VertexId { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> Weight { self.weight }

    /// Returns the same edge with its endpoints swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.target, self.source, self.weight)
    }
}

impl From<(VertexId, VertexId, Weight)> for Edge {
    fn from((source, target, weight): (VertexId, VertexId, Weight)) -> Self {
        Self::new(source, target, weight)
    }
}

/// Collects edges and validates them into an [`EdgeSet`].
///
/// # Examples
/// ```
/// use bellman_core::EdgeSetBuilder;
///
/// let edges = EdgeSetBuilder::new(3)
///     .with_bidirectional(true)
///     .with_edge(0, 1, 2)
///     .with_edge(1, 2, -1)
///     .build()
///     .expect("edges reference valid vertices");
/// assert_eq!(edges.len(), 4);
/// assert_eq!(edges.input_len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeSetBuilder {
    vertex_count: usize,
    bidirectional: bool,
    edges: Vec<Edge>,
}

impl EdgeSetBuilder {
    /// Starts a builder for a graph with `vertex_count` vertices.
    #[must_use]
    pub const fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            bidirectional: false,
            edges: Vec::new(),
        }
    }

    /// Requests that every edge be mirrored when the set is built.
    #[must_use]
    pub fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    /// Appends an edge, returning the builder for chaining.
    #[must_use]
    pub fn with_edge(mut self, source: VertexId, target: VertexId, weight: Weight) -> Self {
        self.push(Edge::new(source, target, weight));
        self
    }

    /// Appends every edge yielded by `edges`.
    #[must_use]
    pub fn with_edges<I, E>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        self.edges.extend(edges.into_iter().map(Into::into));
        self
    }

    /// Appends a single edge in place.
    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Returns the declared vertex count.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns whether mirroring is enabled.
    #[must_use]
    #[rustfmt::skip]
    pub const fn bidirectional(&self) -> bool { self.bidirectional }

    /// Validates every edge and freezes the set.
    ///
    /// # Errors
    /// Returns [`GraphError::NoVertices`] for an empty vertex range,
    /// [`GraphError::VertexOutOfRange`] when an edge references a vertex
    /// outside the graph, [`GraphError::WeightBudgetExceeded`] when the summed
    /// absolute input weights reach [`WEIGHT_BUDGET`], and
    /// [`GraphError::AllocationFailed`] when the mirrored storage cannot be
    /// reserved.
    pub fn build(self) -> Result<EdgeSet, GraphError> {
        let Self {
            vertex_count,
            bidirectional,
            mut edges,
        } = self;

        if vertex_count == 0 {
            return Err(GraphError::NoVertices);
        }

        let mut total_weight = 0_u64;
        for (index, edge) in edges.iter().enumerate() {
            total_weight = total_weight
                .checked_add(edge.weight.unsigned_abs())
                .filter(|&sum| sum < WEIGHT_BUDGET)
                .ok_or(GraphError::WeightBudgetExceeded { edge: index })?;
            for vertex in [edge.source, edge.target] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        edge: index,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }

        let input_len = edges.len();
        if bidirectional {
            edges
                .try_reserve_exact(input_len)
                .map_err(|_| GraphError::AllocationFailed {
                    requested: input_len.saturating_mul(2),
                })?;
            edges.extend_from_within(..input_len);
            for edge in edges.iter_mut().skip(input_len) {
                *edge = edge.reversed();
            }
        }

        Ok(EdgeSet {
            vertex_count,
            input_len,
            bidirectional,
            edges,
        })
    }
}

/// Immutable, randomly indexable set of directed edges.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeSet {
    vertex_count: usize,
    input_len: usize,
    bidirectional: bool,
    edges: Vec<Edge>,
}

impl EdgeSet {
    /// Shorthand for [`EdgeSetBuilder::new`].
    #[must_use]
    pub const fn builder(vertex_count: usize) -> EdgeSetBuilder {
        EdgeSetBuilder::new(vertex_count)
    }

    /// Number of vertices in the graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Number of stored edges, including mirrors.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` when the graph has no edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Number of edges supplied before mirroring.
    #[must_use]
    #[rustfmt::skip]
    pub const fn input_len(&self) -> usize { self.input_len }

    /// Returns `true` when the set was built with mirrored edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_bidirectional(&self) -> bool { self.bidirectional }

    /// Returns the edge stored at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Returns every edge in storage order.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[Edge] { &self.edges }

    /// Iterates over the edges in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Groups edge ids by source vertex.
    ///
    /// # Examples
    /// ```
    /// use bellman_core::EdgeSet;
    ///
    /// let edges = EdgeSet::builder(3)
    ///     .with_edge(2, 0, 1)
    ///     .with_edge(0, 1, 1)
    ///     .with_edge(2, 1, 1)
    ///     .build()?;
    /// let index = edges.source_index();
    /// assert_eq!(index.outgoing(2), &[0, 2]);
    /// assert!(index.outgoing(1).is_empty());
    /// # Ok::<(), bellman_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn source_index(&self) -> SourceIndex {
        SourceIndex::new(self)
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compressed-row view of an [`EdgeSet`] keyed by source vertex.
///
/// `offsets` has `vertex_count + 1` entries; the outgoing edge ids of vertex
/// `v` occupy `edge_ids[offsets[v]..offsets[v + 1]]` in ascending order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceIndex {
    offsets: Vec<usize>,
    edge_ids: Vec<usize>,
}

impl SourceIndex {
    fn new(edges: &EdgeSet) -> Self {
        let mut offsets = vec![0_usize; edges.vertex_count().saturating_add(1)];
        for edge in edges {
            if let Some(slot) = offsets.get_mut(edge.source().saturating_add(1)) {
                *slot = slot.saturating_add(1);
            }
        }
        let mut running = 0_usize;
        for slot in &mut offsets {
            running = running.saturating_add(*slot);
            *slot = running;
        }

        let mut cursor = offsets.clone();
        let mut edge_ids = vec![0_usize; edges.len()];
        for (id, edge) in edges.iter().enumerate() {
            let Some(next) = cursor.get_mut(edge.source()) else {
                continue;
            };
            if let Some(slot) = edge_ids.get_mut(*next) {
                *slot = id;
            }
            *next = next.saturating_add(1);
        }

        Self { offsets, edge_ids }
    }

    /// Returns the ids of edges leaving `vertex`, or an empty slice for an
    /// unknown vertex.
    #[must_use]
    pub fn outgoing(&self, vertex: VertexId) -> &[usize] {
        let start = self.offsets.get(vertex).copied().unwrap_or_default();
        let end = self
            .offsets
            .get(vertex.saturating_add(1))
            .copied()
            .unwrap_or(start);
        self.edge_ids.get(start..end).unwrap_or_default()
    }

    /// Number of vertices covered by the index.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}
