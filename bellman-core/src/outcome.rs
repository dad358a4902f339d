//! Terminal result of one engine invocation.

use crate::distance::DistanceTable;

/// Result of a completed invocation.
///
/// A reachable negative cycle leaves every shortest-path distance undefined,
/// so no distances are reported in that case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Relaxation reached a fixed point; the table holds exact distances.
    Converged(DistanceTable),
    /// The source reaches a cycle of negative total weight.
    NegativeCycle,
}

impl Outcome {
    /// Returns the converged distances, if any.
    ///
    /// # Examples
    /// ```
    /// use bellman_core::{DistanceTable, Outcome};
    ///
    /// let converged = Outcome::Converged(DistanceTable::from_distances(vec![0, 3]));
    /// assert_eq!(converged.distances().and_then(|t| t.get(1)), Some(3));
    /// assert!(Outcome::NegativeCycle.distances().is_none());
    /// ```
    #[must_use]
    pub const fn distances(&self) -> Option<&DistanceTable> {
        match self {
            Self::Converged(table) => Some(table),
            Self::NegativeCycle => None,
        }
    }

    /// Consumes the outcome, returning the converged distances, if any.
    #[must_use]
    pub fn into_distances(self) -> Option<DistanceTable> {
        match self {
            Self::Converged(table) => Some(table),
            Self::NegativeCycle => None,
        }
    }

    /// Returns `true` for [`Outcome::NegativeCycle`].
    #[must_use]
    pub const fn is_negative_cycle(&self) -> bool {
        matches!(self, Self::NegativeCycle)
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Converged(_) => "converged",
            Self::NegativeCycle => "negative_cycle",
        }
    }
}
