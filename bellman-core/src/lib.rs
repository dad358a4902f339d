//! Parallel Bellman-Ford shortest paths with negative-cycle detection.
//!
//! Build an immutable [`EdgeSet`], configure a [`RelaxationEngine`] through
//! [`EngineBuilder`], and run it from a source vertex. The engine relaxes
//! every edge for `V - 1` barrier-separated rounds across a fixed worker
//! pool, then validates the fixed point and returns an [`Outcome`].
//!
//! ```
//! use bellman_core::{EdgeSet, EngineBuilder, Outcome};
//!
//! let edges = EdgeSet::builder(3)
//!     .with_edge(0, 1, 1)
//!     .with_edge(1, 2, -1)
//!     .with_edge(2, 0, -1)
//!     .build()?;
//! let engine = EngineBuilder::new().with_threads(2).build()?;
//! assert_eq!(engine.run(&edges, 0)?, Outcome::NegativeCycle);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod detect;
mod distance;
mod engine;
mod error;
mod graph;
mod outcome;
mod partition;
pub mod reference;
mod relax;
mod sink;
#[cfg(test)]
mod test_utils;

pub use crate::{
    detect::NegativeCycleFlag,
    distance::{Distance, DistanceArray, DistanceTable, INFINITY},
    engine::{EngineBuilder, Phase, RelaxationEngine},
    error::{EngineError, EngineErrorCode, GraphError, GraphErrorCode, Result},
    graph::{Edge, EdgeSet, EdgeSetBuilder, SourceIndex, VertexId, WEIGHT_BUDGET, Weight},
    outcome::Outcome,
    partition::{ChunkPlan, PartitionStrategy},
    relax::Discipline,
    sink::{ResultSink, RunReport},
};
