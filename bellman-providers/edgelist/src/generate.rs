//! Random graph generation.
//!
//! Graphs follow the Erdős-Rényi `G(n, m)` model: `m` distinct unordered
//! vertex pairs drawn uniformly from all `n(n-1)/2` candidates, each with a
//! uniformly random integer weight. Each pair is written once as `u v w`
//! with `u < v`; loading with mirroring enabled makes it undirected.

use std::{
    io::{self, Write},
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use bellman_core::{VertexId, Weight};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index};
use tracing::{debug, instrument};

use crate::errors::GenerateError;

/// Weights drawn for graphs without negative edges.
pub const NON_NEGATIVE_WEIGHTS: RangeInclusive<Weight> = 0..=300;
/// Weights drawn when negative edges are allowed.
pub const SIGNED_WEIGHTS: RangeInclusive<Weight> = -300..=300;

/// Parameters of one generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GraphSpec {
    /// Number of vertices `n`.
    pub vertices: usize,
    /// Number of distinct unordered pairs `m`.
    pub edges: usize,
    /// Draw weights from [`SIGNED_WEIGHTS`] instead of [`NON_NEGATIVE_WEIGHTS`].
    pub negative: bool,
    /// Seed for reproducible output; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GraphSpec {
    fn default() -> Self {
        Self {
            vertices: 10,
            edges: 25,
            negative: false,
            seed: None,
        }
    }
}

impl GraphSpec {
    /// Weight range implied by [`GraphSpec::negative`].
    #[must_use]
    pub const fn weights(&self) -> RangeInclusive<Weight> {
        if self.negative {
            SIGNED_WEIGHTS
        } else {
            NON_NEGATIVE_WEIGHTS
        }
    }
}

/// A generated graph as `(u, v, w)` triples sorted by `(u, v)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedGraph {
    /// Number of vertices.
    pub vertices: usize,
    /// Distinct pairs with `u < v`.
    pub edges: Vec<(VertexId, VertexId, Weight)>,
}

/// Number of distinct unordered pairs among `vertices` vertices, or `None` on
/// overflow.
///
/// # Examples
/// ```
/// use bellman_providers_edgelist::generate::max_edges;
///
/// assert_eq!(max_edges(10), Some(45));
/// assert_eq!(max_edges(1), Some(0));
/// ```
#[must_use]
pub fn max_edges(vertices: usize) -> Option<usize> {
    vertices
        .checked_mul(vertices.saturating_sub(1))
        .map(|pairs| pairs >> 1)
}

/// Draws a random graph.
///
/// # Errors
/// Returns [`GenerateError::NoVertices`] for `vertices == 0` and
/// [`GenerateError::TooManyEdges`] when `edges` exceeds the number of distinct
/// pairs.
///
/// # Examples
/// ```
/// use bellman_providers_edgelist::generate::{GraphSpec, generate};
///
/// let spec = GraphSpec { vertices: 6, edges: 15, negative: true, seed: Some(7) };
/// let graph = generate(&spec)?;
/// assert_eq!(graph.edges.len(), 15);
/// assert!(graph.edges.iter().all(|&(u, v, w)| u < v && (-300..=300).contains(&w)));
/// # Ok::<(), bellman_providers_edgelist::GenerateError>(())
/// ```
#[instrument(name = "edgelist.generate", err, skip(spec), fields(vertices = spec.vertices, edges = spec.edges))]
pub fn generate(spec: &GraphSpec) -> Result<GeneratedGraph, GenerateError> {
    if spec.vertices == 0 {
        return Err(GenerateError::NoVertices);
    }
    let max = max_edges(spec.vertices).unwrap_or(usize::MAX);
    if spec.edges > max {
        return Err(GenerateError::TooManyEdges {
            requested: spec.edges,
            vertices: spec.vertices,
            max,
        });
    }

    let mut rng = spec
        .seed
        .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    let mut picks = index::sample(&mut rng, max, spec.edges).into_vec();
    picks.sort_unstable();

    let weights = spec.weights();
    let edges = PairDecoder::new(spec.vertices)
        .decode_sorted(picks)
        .map(|(u, v)| (u, v, rng.gen_range(weights.clone())))
        .collect();
    debug!(seed = ?spec.seed, "graph generated");
    Ok(GeneratedGraph {
        vertices: spec.vertices,
        edges,
    })
}

/// Maps pair ranks in `[0, n(n-1)/2)` onto `(u, v)` with `u < v`, in
/// row-major order.
struct PairDecoder {
    vertices: usize,
}

impl PairDecoder {
    const fn new(vertices: usize) -> Self {
        Self { vertices }
    }

    /// Decodes ascending ranks in a single pass over the rows.
    fn decode_sorted(
        &self,
        ranks: Vec<usize>,
    ) -> impl Iterator<Item = (VertexId, VertexId)> + use<> {
        let vertices = self.vertices;
        let mut row = 0_usize;
        let mut row_start = 0_usize;
        ranks.into_iter().map(move |rank| {
            // Row `u` holds the `n - 1 - u` pairs (u, u+1) .. (u, n-1).
            loop {
                let row_len = vertices.saturating_sub(row + 1);
                if rank < row_start + row_len {
                    break;
                }
                row_start += row_len;
                row += 1;
            }
            (row, row + 1 + (rank - row_start))
        })
    }
}

/// Writes `graph` in the edge-list format.
///
/// # Errors
/// Propagates I/O errors from `writer`.
pub fn write_edge_list<W: Write>(mut writer: W, graph: &GeneratedGraph) -> io::Result<()> {
    writeln!(writer, "{} {}", graph.vertices, graph.edges.len())?;
    for (u, v, w) in &graph.edges {
        writeln!(writer, "{u} {v} {w}")?;
    }
    writer.flush()
}

/// First `graph_<n>.txt` in `dir` that does not exist yet.
#[must_use]
pub fn next_free_path(dir: &Path) -> PathBuf {
    (0_usize..)
        .map(|n| dir.join(format!("graph_{n}.txt")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dir.join("graph.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use proptest::prelude::*;
    use rstest::rstest;

    fn seeded(vertices: usize, edges: usize, negative: bool) -> GraphSpec {
        GraphSpec {
            vertices,
            edges,
            negative,
            seed: Some(42),
        }
    }

    #[test]
    fn decoder_walks_every_pair_in_order() {
        let pairs: Vec<_> = PairDecoder::new(4).decode_sorted((0..6).collect()).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[rstest]
    #[case(0, 0, Err(GenerateError::NoVertices))]
    #[case(4, 7, Err(GenerateError::TooManyEdges { requested: 7, vertices: 4, max: 6 }))]
    fn rejects_impossible_requests(
        #[case] vertices: usize,
        #[case] edges: usize,
        #[case] expected: Result<GeneratedGraph, GenerateError>,
    ) {
        assert_eq!(generate(&seeded(vertices, edges, false)), expected);
    }

    #[test]
    fn complete_graph_uses_every_pair() {
        let graph = generate(&seeded(5, 10, false)).expect("10 pairs fit");
        let pairs: Vec<_> = graph.edges.iter().map(|&(u, v, _)| (u, v)).collect();
        assert_eq!(pairs, PairDecoder::new(5).decode_sorted((0..10).collect()).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_graph() {
        let spec = seeded(30, 100, true);
        assert_eq!(generate(&spec), generate(&spec));
    }

    #[test]
    fn written_file_round_trips_through_the_loader() {
        let graph = generate(&seeded(8, 12, true)).expect("fits");
        let mut buffer = Vec::new();
        write_edge_list(&mut buffer, &graph).expect("writes to memory");
        let loaded = crate::EdgeListProvider::try_from_reader("gen", buffer.as_slice(), false)
            .expect("generated files parse");
        assert_eq!(loaded.edges().vertex_count(), 8);
        assert_eq!(loaded.edges().len(), 12);
    }

    #[test]
    fn next_free_path_skips_existing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(next_free_path(dir.path()), dir.path().join("graph_0.txt"));
        std::fs::write(dir.path().join("graph_0.txt"), "1 0\n").expect("write");
        assert_eq!(next_free_path(dir.path()), dir.path().join("graph_1.txt"));
    }

    fn spec_strategy() -> impl Strategy<Value = GraphSpec> {
        (1_usize..40)
            .prop_flat_map(|vertices| {
                let max = max_edges(vertices).unwrap_or(0);
                (Just(vertices), 0..=max, any::<bool>(), any::<u64>())
            })
            .prop_map(|(vertices, edges, negative, seed)| GraphSpec {
                vertices,
                edges,
                negative,
                seed: Some(seed),
            })
    }

    proptest! {
        #[test]
        fn pairs_are_distinct_and_weights_in_range(spec in spec_strategy()) {
            let graph = generate(&spec).expect("request fits");
            let unique: HashSet<_> = graph.edges.iter().map(|&(u, v, _)| (u, v)).collect();
            prop_assert_eq!(unique.len(), spec.edges);
            for &(u, v, w) in &graph.edges {
                prop_assert!(u < v && v < spec.vertices);
                prop_assert!(spec.weights().contains(&w));
            }
        }
    }
}
