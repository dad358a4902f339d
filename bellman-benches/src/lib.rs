//! Benchmark support crate for the Bellman-Ford engine.
//!
//! Provides reproducible random graphs and parameter types for the Criterion
//! benchmarks comparing thread counts, relaxation disciplines, and partition
//! strategies.

pub mod error;
pub mod params;
pub mod workload;
