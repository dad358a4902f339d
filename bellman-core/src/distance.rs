//! Shared distance state and the owned table handed back to callers.
//!
//! [`DistanceArray`] is read and written concurrently by every worker during
//! relaxation. Slots are relaxed atomics: a racing store may lose an update,
//! but never tears a value. [`DistanceTable`] is the frozen, owned copy
//! returned once an invocation converges.

use std::{
    fmt,
    sync::atomic::{AtomicI64, Ordering},
};

use crate::{
    error::{EngineError, Result},
    graph::VertexId,
};

/// Signed shortest-path distance.
pub type Distance = i64;

/// Sentinel meaning "no path found yet".
pub const INFINITY: Distance = Distance::MAX;

/// Per-vertex best-known distances shared by all workers.
pub struct DistanceArray {
    slots: Vec<AtomicI64>,
}

impl DistanceArray {
    /// Allocates `vertex_count` slots set to [`INFINITY`] except `source`,
    /// which starts at zero.
    ///
    /// # Errors
    /// Returns [`EngineError::AllocationFailed`] when the slots cannot be
    /// reserved and [`EngineError::SourceOutOfRange`] when `source` is not a
    /// vertex of the graph.
    ///
    /// # Examples
    /// ```
    /// use bellman_core::{DistanceArray, INFINITY};
    ///
    /// let dist = DistanceArray::initialize(3, 1)?;
    /// assert_eq!(dist.snapshot(), vec![INFINITY, 0, INFINITY]);
    /// # Ok::<(), bellman_core::EngineError>(())
    /// ```
    pub fn initialize(vertex_count: usize, source: VertexId) -> Result<Self> {
        if source >= vertex_count {
            return Err(EngineError::SourceOutOfRange {
                source_vertex: source,
                vertex_count,
            });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(vertex_count)
            .map_err(|_| EngineError::AllocationFailed {
                what: "distance array",
                requested: vertex_count,
            })?;
        slots.extend((0..vertex_count).map(|vertex| {
            AtomicI64::new(if vertex == source { 0 } else { INFINITY })
        }));
        Ok(Self { slots })
    }

    /// Number of vertices tracked by the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when the array tracks no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reads the current distance of `vertex`.
    ///
    /// Out-of-range vertices read as [`INFINITY`], which callers treat as
    /// "no path" and therefore never relax from.
    #[must_use]
    pub fn read(&self, vertex: VertexId) -> Distance {
        self.slots
            .get(vertex)
            .map_or(INFINITY, |slot| slot.load(Ordering::Relaxed))
    }

    /// Unsynchronized compare-then-store.
    ///
    /// Two workers may both observe a stale value and the larger candidate can
    /// land last. Returns `true` when a store was issued.
    pub(crate) fn relax_racy(&self, vertex: VertexId, candidate: Distance) -> bool {
        let Some(slot) = self.slots.get(vertex) else {
            return false;
        };
        if candidate < slot.load(Ordering::Relaxed) {
            slot.store(candidate, Ordering::Relaxed);
            return true;
        }
        false
    }

    /// Copies the current values into a plain vector.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Distance> {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect()
    }

    /// Consumes the array, producing the owned result table.
    #[must_use]
    pub fn into_table(self) -> DistanceTable {
        DistanceTable {
            distances: self.slots.into_iter().map(AtomicI64::into_inner).collect(),
        }
    }
}

impl fmt::Debug for DistanceArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceArray")
            .field("distances", &self.snapshot())
            .finish()
    }
}

/// Final shortest-path distances of a converged invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistanceTable {
    distances: Vec<Distance>,
}

impl DistanceTable {
    /// Wraps precomputed distances.
    ///
    /// # Examples
    /// ```
    /// use bellman_core::{DistanceTable, INFINITY};
    ///
    /// let table = DistanceTable::from_distances(vec![0, 4, INFINITY]);
    /// assert_eq!(table.get(1), Some(4));
    /// assert!(!table.is_reachable(2));
    /// ```
    #[must_use]
    pub const fn from_distances(distances: Vec<Distance>) -> Self {
        Self { distances }
    }

    /// Distance of `vertex`, or `None` for an unknown vertex.
    #[must_use]
    pub fn get(&self, vertex: VertexId) -> Option<Distance> {
        self.distances.get(vertex).copied()
    }

    /// Returns `true` when `vertex` has a finite distance.
    #[must_use]
    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.get(vertex).is_some_and(|distance| distance != INFINITY)
    }

    /// Number of vertices in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns `true` for an empty table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distances indexed by vertex id.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[Distance] { &self.distances }

    /// Consumes the table, returning the raw distances.
    #[must_use]
    pub fn into_vec(self) -> Vec<Distance> {
        self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_rejects_missing_source() {
        let err = DistanceArray::initialize(2, 2).expect_err("source 2 does not exist");
        assert_eq!(
            err,
            EngineError::SourceOutOfRange {
                source_vertex: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn racy_relaxation_only_lowers_from_the_observed_value() {
        let dist = DistanceArray::initialize(2, 0).expect("valid source");
        assert!(dist.relax_racy(1, 7));
        assert!(!dist.relax_racy(1, 9));
        assert!(dist.relax_racy(1, -2));
        assert_eq!(dist.read(1), -2);
        assert!(!dist.relax_racy(5, -100));
    }

    #[test]
    fn unknown_vertices_read_as_infinity() {
        let dist = DistanceArray::initialize(1, 0).expect("valid source");
        assert_eq!(dist.read(3), INFINITY);
    }

    #[test]
    fn into_table_preserves_values() {
        let dist = DistanceArray::initialize(3, 2).expect("valid source");
        dist.relax_racy(0, 11);
        let table = dist.into_table();
        assert_eq!(table.as_slice(), &[11, INFINITY, 0]);
        assert!(table.is_reachable(0));
        assert!(!table.is_reachable(1));
        assert_eq!(table.get(9), None);
    }
}
