//! Reproducible benchmark graphs.

use bellman_core::EdgeSet;
use bellman_providers_edgelist::generate::{self, GraphSpec};

use crate::error::BenchSetupError;

/// Shape of a synthetic benchmark graph.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraph {
    /// Number of vertices.
    pub vertices: usize,
    /// Average number of undirected edges per vertex.
    pub degree: usize,
    /// Seed for the generator.
    pub seed: u64,
}

impl SyntheticGraph {
    /// Builds the mirrored edge set with non-negative weights, so every run
    /// converges and performs all `V - 1` rounds.
    ///
    /// # Errors
    /// Returns [`BenchSetupError`] when the shape admits no such graph.
    ///
    /// # Examples
    /// ```
    /// use bellman_benches::workload::SyntheticGraph;
    ///
    /// let edges = SyntheticGraph { vertices: 50, degree: 3, seed: 1 }.build()?;
    /// assert_eq!(edges.len(), 300);
    /// # Ok::<(), bellman_benches::error::BenchSetupError>(())
    /// ```
    pub fn build(&self) -> Result<EdgeSet, BenchSetupError> {
        let graph = generate::generate(&GraphSpec {
            vertices: self.vertices,
            edges: self.vertices.saturating_mul(self.degree),
            negative: false,
            seed: Some(self.seed),
        })?;
        Ok(EdgeSet::builder(graph.vertices)
            .with_bidirectional(true)
            .with_edges(graph.edges)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn same_seed_builds_the_same_graph() {
        let shape = SyntheticGraph {
            vertices: 40,
            degree: 2,
            seed: 3,
        };
        let first = shape.build().expect("shape is feasible");
        let second = shape.build().expect("shape is feasible");
        assert_eq!(first, second);
    }

    #[rstest]
    fn infeasible_shapes_are_reported() {
        let err = SyntheticGraph {
            vertices: 3,
            degree: 5,
            seed: 0,
        }
        .build()
        .expect_err("3 vertices hold at most 3 pairs");
        assert!(matches!(err, BenchSetupError::Generate(_)));
    }
}
