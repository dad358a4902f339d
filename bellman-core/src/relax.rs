//! Relaxation disciplines applied to the shared [`DistanceArray`].
//!
//! The unsynchronized discipline accepts lost updates within a round and
//! relies on the next round to repair them. The locked disciplines re-read
//! the target slot inside a critical region so a slot never moves upwards,
//! even transiently. Each worker holds at most one lock at a time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    distance::{Distance, DistanceArray},
    error::{EngineError, Result},
    graph::VertexId,
};

/// Synchronization applied when a worker lowers a distance.
///
/// # Examples
/// ```
/// use bellman_core::Discipline;
///
/// assert_eq!(Discipline::default(), Discipline::Unsynchronized);
/// assert!(Discipline::VertexLocked.is_locked());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Discipline {
    /// Plain compare-then-store without exclusion; racing stores may be lost
    /// for the remainder of a round.
    #[default]
    Unsynchronized,
    /// One lock per target vertex; re-checks inside the lock.
    VertexLocked,
    /// One lock for the whole array; re-checks inside the lock.
    GlobalLocked,
}

impl Discipline {
    /// Returns `true` for the disciplines that serialize writes.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        !matches!(self, Self::Unsynchronized)
    }

    /// Stable lowercase name used in logs and benchmark ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsynchronized => "unsynchronized",
            Self::VertexLocked => "vertex-locked",
            Self::GlobalLocked => "global-locked",
        }
    }
}

/// Discipline-specific relaxation state for one invocation.
pub(crate) enum Relaxer {
    Racy,
    Locked(LockTable),
}

impl Relaxer {
    pub(crate) fn new(discipline: Discipline, vertex_count: usize) -> Result<Self> {
        Ok(match discipline {
            Discipline::Unsynchronized => Self::Racy,
            Discipline::VertexLocked => Self::Locked(LockTable::per_vertex(vertex_count)?),
            Discipline::GlobalLocked => Self::Locked(LockTable::global()),
        })
    }

    /// Lowers `dist[target]` to `candidate` when it improves the slot.
    ///
    /// Returns `true` when a store happened.
    pub(crate) fn try_relax(
        &self,
        dist: &DistanceArray,
        target: VertexId,
        candidate: Distance,
    ) -> bool {
        match self {
            Self::Racy => dist.relax_racy(target, candidate),
            Self::Locked(locks) => {
                // Cheap pre-check outside the lock; slots only ever decrease.
                if candidate >= dist.read(target) {
                    return false;
                }
                let _guard = locks.lock(target);
                dist.relax_racy(target, candidate)
            }
        }
    }
}

/// Table of critical regions.
///
/// Vertices without a dedicated lock share the global one, so the global
/// discipline is simply a table with no per-vertex entries.
pub(crate) struct LockTable {
    per_vertex: Vec<Mutex<()>>,
    global: Mutex<()>,
}

impl LockTable {
    const fn global() -> Self {
        Self {
            per_vertex: Vec::new(),
            global: Mutex::new(()),
        }
    }

    fn per_vertex(len: usize) -> Result<Self> {
        let mut per_vertex = Vec::new();
        per_vertex
            .try_reserve_exact(len)
            .map_err(|_| EngineError::AllocationFailed {
                what: "relaxation lock table",
                requested: len,
            })?;
        per_vertex.extend((0..len).map(|_| Mutex::new(())));
        Ok(Self {
            per_vertex,
            global: Mutex::new(()),
        })
    }

    fn region(&self, vertex: VertexId) -> &Mutex<()> {
        self.per_vertex.get(vertex).unwrap_or(&self.global)
    }

    /// Enters the critical region guarding `vertex`.
    ///
    /// The locks guard no data, so a guard left poisoned by a panicking
    /// worker is still a valid exclusion token.
    fn lock(&self, vertex: VertexId) -> MutexGuard<'_, ()> {
        self.region(vertex)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
