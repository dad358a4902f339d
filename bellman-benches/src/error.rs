//! Errors raised while preparing benchmark inputs.

use bellman_core::GraphError;
use bellman_providers_edgelist::GenerateError;
use thiserror::Error;

/// Failure while building a benchmark graph.
#[derive(Debug, Error)]
pub enum BenchSetupError {
    /// The requested random graph cannot exist.
    #[error("graph generation failed: {0}")]
    Generate(#[from] GenerateError),
    /// The generated edges did not form a valid edge set.
    #[error("edge set construction failed: {0}")]
    Graph(#[from] GraphError),
}
