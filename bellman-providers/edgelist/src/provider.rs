//! Graph-file loading.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use bellman_core::{Edge, EdgeSet, EdgeSetBuilder, VertexId, Weight};
use tracing::{debug, instrument};

use crate::errors::EdgeListError;

/// A graph loaded from an edge-list file.
#[derive(Clone, Debug)]
pub struct EdgeListProvider {
    name: String,
    edges: EdgeSet,
}

impl EdgeListProvider {
    /// Opens and parses the graph file at `path`, named after the path.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when the file cannot be opened or read,
    /// and the parse errors of [`EdgeListProvider::try_from_reader`].
    #[instrument(name = "edgelist.load", err, skip(path), fields(path = %path.as_ref().display()))]
    pub fn try_from_path(
        path: impl AsRef<Path>,
        bidirectional: bool,
    ) -> Result<Self, EdgeListError> {
        let file = File::open(path.as_ref())?;
        Self::try_from_reader(
            path.as_ref().display().to_string(),
            BufReader::new(file),
            bidirectional,
        )
    }

    /// Parses a graph from any buffered reader.
    ///
    /// The first line must be the `V E` header. The next `E` non-blank lines
    /// are edges; anything after them is ignored.
    ///
    /// # Errors
    /// Returns [`EdgeListError::MissingHeader`], [`EdgeListError::InvalidHeader`],
    /// [`EdgeListError::InvalidEdge`], [`EdgeListError::TruncatedEdges`], or
    /// [`EdgeListError::Graph`] when the edges reference unknown vertices.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use bellman_providers_edgelist::EdgeListProvider;
    ///
    /// let graph = EdgeListProvider::try_from_reader("demo", Cursor::new("3 1\n0 1 2\n"), true)?;
    /// assert_eq!(graph.edges().vertex_count(), 3);
    /// assert_eq!(graph.edges().len(), 2);
    /// # Ok::<(), bellman_providers_edgelist::EdgeListError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
        bidirectional: bool,
    ) -> Result<Self, EdgeListError> {
        let mut lines = reader.lines().enumerate();
        let (header_index, header_line) = lines.next().ok_or(EdgeListError::MissingHeader)?;
        let header = header_line?;
        let (vertex_count, edge_count) =
            parse_header(&header).ok_or_else(|| EdgeListError::InvalidHeader {
                line: header_index + 1,
                content: header.trim().to_owned(),
            })?;

        let mut builder = EdgeSetBuilder::new(vertex_count).with_bidirectional(bidirectional);
        let mut found = 0_usize;
        while found < edge_count {
            let Some((index, read)) = lines.next() else {
                return Err(EdgeListError::TruncatedEdges {
                    expected: edge_count,
                    found,
                });
            };
            let line = read?;
            if line.trim().is_empty() {
                continue;
            }
            let edge = parse_edge(&line).ok_or_else(|| EdgeListError::InvalidEdge {
                line: index + 1,
                content: line.trim().to_owned(),
            })?;
            builder.push(edge);
            found += 1;
        }

        let edges = builder.build()?;
        debug!(
            vertices = edges.vertex_count(),
            edges = edges.len(),
            bidirectional,
            "graph loaded"
        );
        Ok(Self {
            name: name.into(),
            edges,
        })
    }

    /// Display name, typically the source path.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The loaded edges.
    #[must_use]
    pub const fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    /// Consumes the provider, returning the edges.
    #[must_use]
    pub fn into_edges(self) -> EdgeSet {
        self.edges
    }
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let vertices = fields.next()?.parse().ok()?;
    let edges = fields.next()?.parse().ok()?;
    fields.next().is_none().then_some((vertices, edges))
}

fn parse_edge(line: &str) -> Option<Edge> {
    let mut fields = line.split_whitespace();
    let source: VertexId = fields.next()?.parse().ok()?;
    let target: VertexId = fields.next()?.parse().ok()?;
    let weight: Weight = fields.next()?.parse().ok()?;
    fields
        .next()
        .is_none()
        .then_some(Edge::new(source, target, weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("5 8", Some((5, 8)))]
    #[case("  3\t0  ", Some((3, 0)))]
    #[case("5", None)]
    #[case("5 8 1", None)]
    #[case("-5 8", None)]
    #[case("five eight", None)]
    fn header_parsing(#[case] raw: &str, #[case] expected: Option<(usize, usize)>) {
        assert_eq!(parse_header(raw), expected);
    }

    #[rstest]
    #[case("0 1 -4", Some(Edge::new(0, 1, -4)))]
    #[case("2\t0 300", Some(Edge::new(2, 0, 300)))]
    #[case("0 1", None)]
    #[case("0 1 2 3", None)]
    #[case("-1 1 2", None)]
    #[case("0 1 1.5", None)]
    fn edge_parsing(#[case] raw: &str, #[case] expected: Option<Edge>) {
        assert_eq!(parse_edge(raw), expected);
    }
}
