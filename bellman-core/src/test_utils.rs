//! Shared test utilities for `bellman-core`.

use bellman_test_support::{ci::property_test_profile::ProptestRunProfile, graphs::GraphFixture};
use proptest::test_runner::Config as ProptestConfig;

use crate::graph::EdgeSet;

/// Proptest configuration honouring the shared CI profile.
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds the edge set described by `fixture`.
pub(crate) fn fixture_edges(fixture: &GraphFixture) -> EdgeSet {
    EdgeSet::builder(fixture.vertex_count)
        .with_edges(fixture.edges.iter().copied())
        .build()
        .expect("fixtures reference valid vertices")
}
