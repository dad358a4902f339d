//! Helpers shared by the integration suites.

use bellman_core::{Distance, EdgeSet, INFINITY};
use bellman_test_support::graphs::GraphFixture;

/// Builds the fixture's edge set, optionally mirrored.
pub fn edges_of(fixture: &GraphFixture, bidirectional: bool) -> EdgeSet {
    EdgeSet::builder(fixture.vertex_count)
        .with_bidirectional(bidirectional)
        .with_edges(fixture.edges.iter().copied())
        .build()
        .expect("fixture edges are in range")
}

/// Expected distance table with unreachable vertices mapped to `INFINITY`.
#[must_use]
pub fn expected_table(fixture: &GraphFixture) -> Option<Vec<Distance>> {
    fixture
        .expected
        .map(|distances| distances.iter().map(|d| d.unwrap_or(INFINITY)).collect())
}
