//! Hand-checked graphs with known shortest-path answers.
//!
//! Fixtures are plain data so that any crate (including `bellman-core`'s own
//! unit tests) can build them into whatever representation it needs.

use std::fmt::Write as _;

/// One directed weighted edge as `(source, target, weight)`.
pub type EdgeTriple = (usize, usize, i64);

/// A small graph together with the outcome it must produce.
#[derive(Clone, Copy, Debug)]
pub struct GraphFixture {
    /// Short name used in test case ids.
    pub name: &'static str,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Source vertex for the run.
    pub source: usize,
    /// Edges in file order.
    pub edges: &'static [EdgeTriple],
    /// Expected distances per vertex (`None` for unreachable), or `None` for
    /// a reachable negative cycle.
    pub expected: Option<&'static [Option<i64>]>,
}

impl GraphFixture {
    /// Renders the fixture in the `"V E"` / `"u v w"` graph-file format.
    ///
    /// # Examples
    /// ```
    /// use bellman_test_support::graphs::DISCONNECTED;
    ///
    /// assert_eq!(DISCONNECTED.to_edge_list(), "3 1\n0 1 2\n");
    /// ```
    #[must_use]
    pub fn to_edge_list(&self) -> String {
        let mut text = format!("{} {}\n", self.vertex_count, self.edges.len());
        for (source, target, weight) in self.edges {
            // Writing to a String cannot fail.
            let _ = writeln!(text, "{source} {target} {weight}");
        }
        text
    }

    /// Returns `true` when the fixture describes a reachable negative cycle.
    #[must_use]
    pub const fn has_negative_cycle(&self) -> bool {
        self.expected.is_none()
    }
}

/// Five vertices with negative edges and no negative cycle.
pub const MIXED_WEIGHTS: GraphFixture = GraphFixture {
    name: "mixed_weights",
    vertex_count: 5,
    source: 0,
    edges: &[
        (0, 1, -1),
        (0, 2, 4),
        (1, 2, 3),
        (1, 3, 2),
        (1, 4, 2),
        (3, 2, 5),
        (3, 1, 1),
        (4, 3, -3),
    ],
    expected: Some(&[Some(0), Some(-1), Some(2), Some(-2), Some(1)]),
};

/// Triangle of total weight `-1` reachable from the source.
pub const NEGATIVE_TRIANGLE: GraphFixture = GraphFixture {
    name: "negative_triangle",
    vertex_count: 3,
    source: 0,
    edges: &[(0, 1, 1), (1, 2, -1), (2, 0, -1)],
    expected: None,
};

/// Vertex 2 is unreachable from the source.
pub const DISCONNECTED: GraphFixture = GraphFixture {
    name: "disconnected",
    vertex_count: 3,
    source: 0,
    edges: &[(0, 1, 2)],
    expected: Some(&[Some(0), Some(2), None]),
};

/// Negative cycle that the source cannot reach; distances stay defined.
pub const UNREACHABLE_NEGATIVE_CYCLE: GraphFixture = GraphFixture {
    name: "unreachable_negative_cycle",
    vertex_count: 4,
    source: 0,
    edges: &[(0, 1, 5), (2, 3, -4), (3, 2, 1)],
    expected: Some(&[Some(0), Some(5), None, None]),
};

/// Path whose edges are stored back to front, forcing one round per hop.
pub const REVERSED_PATH: GraphFixture = GraphFixture {
    name: "reversed_path",
    vertex_count: 6,
    source: 0,
    edges: &[(4, 5, -2), (3, 4, 7), (2, 3, -1), (1, 2, 3), (0, 1, 1)],
    expected: Some(&[Some(0), Some(1), Some(4), Some(3), Some(10), Some(8)]),
};

/// Every fixture above.
pub const ALL: [GraphFixture; 5] = [
    MIXED_WEIGHTS,
    NEGATIVE_TRIANGLE,
    DISCONNECTED,
    UNREACHABLE_NEGATIVE_CYCLE,
    REVERSED_PATH,
];
