//! Sequential Bellman-Ford used to cross-check the parallel engine.
//!
//! Relaxes edges in storage order on a plain vector, with the same checked
//! candidate arithmetic as the engine. It is the trusted oracle for
//! property tests and for the CLI `--verify` mode.

use crate::{
    distance::{Distance, DistanceTable, INFINITY},
    error::{EngineError, Result},
    graph::{EdgeSet, VertexId},
    outcome::Outcome,
};

/// Applies one full relaxation round to `distances`, returning the number of
/// slots lowered.
///
/// Returns `None` as soon as a candidate underflows the distance range, which
/// for an edge set within [`crate::WEIGHT_BUDGET`] proves a reachable negative
/// cycle. Edges whose endpoints fall outside `distances` are ignored.
///
/// # Examples
/// ```
/// use bellman_core::{EdgeSet, INFINITY, reference::relax_round};
///
/// let edges = EdgeSet::builder(3).with_edge(0, 1, 2).with_edge(1, 2, 2).build()?;
/// let mut distances = vec![0, INFINITY, INFINITY];
/// assert_eq!(relax_round(&edges, &mut distances), Some(2));
/// assert_eq!(distances, vec![0, 2, 4]);
/// assert_eq!(relax_round(&edges, &mut distances), Some(0));
/// # Ok::<(), bellman_core::GraphError>(())
/// ```
#[must_use]
pub fn relax_round(edges: &EdgeSet, distances: &mut [Distance]) -> Option<usize> {
    let mut lowered = 0_usize;
    for edge in edges {
        let Some(&from) = distances.get(edge.source()) else {
            continue;
        };
        if from == INFINITY {
            continue;
        }
        let Some(candidate) = from.checked_add(edge.weight()) else {
            if edge.weight() < 0 {
                return None;
            }
            continue;
        };
        if let Some(slot) = distances.get_mut(edge.target())
            && candidate < *slot
        {
            *slot = candidate;
            lowered = lowered.saturating_add(1);
        }
    }
    Some(lowered)
}

/// Computes single-source shortest paths sequentially.
///
/// # Errors
/// Returns [`EngineError::SourceOutOfRange`] when `source` is not a vertex of
/// `edges`.
pub fn bellman_ford(edges: &EdgeSet, source: VertexId) -> Result<Outcome> {
    let vertex_count = edges.vertex_count();
    if source >= vertex_count {
        return Err(EngineError::SourceOutOfRange {
            source_vertex: source,
            vertex_count,
        });
    }

    let mut distances = vec![INFINITY; vertex_count];
    if let Some(slot) = distances.get_mut(source) {
        *slot = 0;
    }

    for _ in 1..vertex_count {
        match relax_round(edges, &mut distances) {
            None => return Ok(Outcome::NegativeCycle),
            Some(0) => break,
            Some(_) => {}
        }
    }

    if relax_round(edges, &mut distances.clone()) != Some(0) {
        return Ok(Outcome::NegativeCycle);
    }
    Ok(Outcome::Converged(DistanceTable::from_distances(distances)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_solver_handles_negative_edges() {
        let edges = EdgeSet::builder(4)
            .with_edge(0, 1, 4)
            .with_edge(0, 2, 5)
            .with_edge(2, 1, -3)
            .with_edge(1, 3, 1)
            .build()
            .expect("valid edges");
        let outcome = bellman_ford(&edges, 0).expect("valid source");
        assert_eq!(
            outcome.distances().map(DistanceTable::as_slice),
            Some(&[0, 2, 5, 3][..])
        );
    }

    #[test]
    fn sequential_solver_flags_negative_self_loop() {
        let edges = EdgeSet::builder(1)
            .with_edge(0, 0, -1)
            .build()
            .expect("valid edges");
        assert_eq!(bellman_ford(&edges, 0), Ok(Outcome::NegativeCycle));
    }

    #[test]
    fn sequential_solver_flags_cycles_that_underflow_the_distance_range() {
        let weight = -(1_i64 << 61);
        let edges = EdgeSet::builder(4)
            .with_edge(0, 1, weight)
            .with_edge(1, 0, weight)
            .with_edge(1, 2, 1)
            .build()
            .expect("weights stay within budget");
        assert_eq!(bellman_ford(&edges, 0), Ok(Outcome::NegativeCycle));
    }

    #[test]
    fn sequential_solver_reports_large_finite_distances() {
        let step = (1_i64 << 62) - 2;
        let edges = EdgeSet::builder(3)
            .with_edge(0, 1, step)
            .with_edge(1, 2, step)
            .build()
            .expect("weights stay within budget");
        let outcome = bellman_ford(&edges, 0).expect("valid source");
        assert_eq!(
            outcome.distances().map(DistanceTable::as_slice),
            Some(&[0, step, 2 * step][..])
        );
        assert!(2 * step < INFINITY);
    }

    #[test]
    fn underflowing_round_yields_none() {
        let edges = EdgeSet::builder(2)
            .with_edge(0, 1, -10)
            .build()
            .expect("valid edges");
        let mut distances = vec![i64::MIN + 5, INFINITY];
        assert_eq!(relax_round(&edges, &mut distances), None);
    }

    #[test]
    fn sequential_solver_rejects_unknown_source() {
        let edges = EdgeSet::builder(2).build().expect("valid edges");
        assert!(matches!(
            bellman_ford(&edges, 5),
            Err(EngineError::SourceOutOfRange { .. })
        ));
    }
}
