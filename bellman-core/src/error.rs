//! Error types for the Bellman-Ford core library.
//!
//! Graph construction and engine execution fail through separate enums so
//! callers can tell a malformed input apart from a misconfigured run. Every
//! variant maps onto a stable code suitable for structured logs.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::graph::VertexId;

/// Generates a fieldless code enum mirroring an error enum, together with
/// `as_str`, `Display`, and a `code()` accessor on the error type.
macro_rules! error_codes {
    (
        $(#[$meta:meta])*
        $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $Variant:ident $( { $($fields:tt)* } )? => $code:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $Variant,
            )+
        }

        impl $CodeTy {
            /// Returns the stable machine-readable identifier for this code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$Variant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!("Returns the stable [`", stringify!($CodeTy), "`] for this error.")]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$Variant $( { $($fields)* } )? => $CodeTy::$Variant,)+
                }
            }
        }
    };
}

/// Errors raised while assembling an [`crate::EdgeSet`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A graph must contain at least one vertex.
    #[error("graph must contain at least one vertex")]
    NoVertices,
    /// An edge referenced a vertex id outside `[0, vertex_count)`.
    #[error("edge {edge} references vertex {vertex}, but the graph has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Position of the offending edge in input order.
        edge: usize,
        /// The out-of-range vertex id.
        vertex: VertexId,
        /// Number of vertices declared for the graph.
        vertex_count: usize,
    },
    /// Edge storage could not be reserved.
    #[error("failed to allocate storage for {requested} edges")]
    AllocationFailed {
        /// Number of edges the builder attempted to reserve.
        requested: usize,
    },
    /// The summed absolute edge weights no longer fit the distance range.
    #[error("edge {edge} pushes the summed absolute weight past the distance range")]
    WeightBudgetExceeded {
        /// Position of the first edge whose weight exhausts the budget.
        edge: usize,
    },
}

error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    GraphErrorCode for GraphError {
        /// A graph must contain at least one vertex.
        NoVertices => "GRAPH_NO_VERTICES",
        /// An edge referenced a vertex id outside the graph.
        VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
        /// Edge storage could not be reserved.
        AllocationFailed { .. } => "GRAPH_ALLOCATION_FAILED",
        /// The summed absolute edge weights exceed the distance range.
        WeightBudgetExceeded { .. } => "GRAPH_WEIGHT_BUDGET_EXCEEDED",
    }
}

/// Errors raised while configuring or running the relaxation engine.
///
/// A reachable negative cycle is *not* an error; it is reported through
/// [`crate::Outcome::NegativeCycle`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EngineError {
    /// The worker pool must contain at least one thread.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The rejected thread count.
        got: usize,
    },
    /// The requested source vertex does not exist.
    #[error("source vertex {source_vertex} is outside a graph of {vertex_count} vertices")]
    SourceOutOfRange {
        /// Requested source vertex.
        source_vertex: VertexId,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// The distance array could not be allocated.
    #[error("failed to allocate {what} for {requested} vertices")]
    AllocationFailed {
        /// Which buffer failed to allocate.
        what: &'static str,
        /// Number of slots requested.
        requested: usize,
    },
    /// The worker pool could not be started.
    #[error("failed to start a pool of {threads} worker threads: {message}")]
    ThreadPool {
        /// Requested pool size.
        threads: usize,
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
}

error_codes! {
    /// Stable codes describing [`EngineError`] variants.
    EngineErrorCode for EngineError {
        /// The worker pool must contain at least one thread.
        InvalidThreadCount { .. } => "ENGINE_INVALID_THREAD_COUNT",
        /// The requested source vertex does not exist.
        SourceOutOfRange { .. } => "ENGINE_SOURCE_OUT_OF_RANGE",
        /// The distance array could not be allocated.
        AllocationFailed { .. } => "ENGINE_ALLOCATION_FAILED",
        /// The worker pool could not be started.
        ThreadPool { .. } => "ENGINE_THREAD_POOL",
    }
}

/// Convenient alias for results returned by the engine.
pub type Result<T> = core::result::Result<T, EngineError>;
