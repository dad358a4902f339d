//! Errors raised while reading or generating edge lists.

use std::{io, sync::Arc};

use bellman_core::GraphError;
use thiserror::Error;

/// Failures while loading a graph file.
#[non_exhaustive]
#[derive(Clone, Debug, Error)]
pub enum EdgeListError {
    /// The file could not be opened or read.
    #[error("failed to read graph: {0}")]
    Io(Arc<io::Error>),
    /// The input contained no header line.
    #[error("graph file is empty; expected a `V E` header")]
    MissingHeader,
    /// The header was not two non-negative integers.
    #[error("line {line}: expected `V E` header, found `{content}`")]
    InvalidHeader {
        /// One-based line number.
        line: usize,
        /// Offending line, trimmed.
        content: String,
    },
    /// An edge line was not `source target weight`.
    #[error("line {line}: expected `source target weight`, found `{content}`")]
    InvalidEdge {
        /// One-based line number.
        line: usize,
        /// Offending line, trimmed.
        content: String,
    },
    /// The input ended before the number of edges announced by the header.
    #[error("header announces {expected} edges but only {found} were present")]
    TruncatedEdges {
        /// Edge count from the header.
        expected: usize,
        /// Edge lines actually read.
        found: usize,
    },
    /// The parsed edges do not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<io::Error> for EdgeListError {
    fn from(error: io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

impl EdgeListError {
    /// Stable identifier for structured logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "EDGELIST_IO",
            Self::MissingHeader => "EDGELIST_MISSING_HEADER",
            Self::InvalidHeader { .. } => "EDGELIST_INVALID_HEADER",
            Self::InvalidEdge { .. } => "EDGELIST_INVALID_EDGE",
            Self::TruncatedEdges { .. } => "EDGELIST_TRUNCATED",
            Self::Graph(inner) => inner.code().as_str(),
        }
    }
}

/// Failures while generating a random graph.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerateError {
    /// A graph needs at least one vertex.
    #[error("a generated graph needs at least one vertex")]
    NoVertices,
    /// More edges were requested than distinct vertex pairs exist.
    #[error("{requested} edges requested but {vertices} vertices only admit {max} distinct pairs")]
    TooManyEdges {
        /// Requested edge count.
        requested: usize,
        /// Requested vertex count.
        vertices: usize,
        /// Number of distinct unordered pairs.
        max: usize,
    },
}
