use crate::graph::{EdgeId, VertexId};
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors raised by graph store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexId),
    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),
    #[error("cannot create edge: {0}")]
    InvalidEdge(#[from] ValidationError),
}

/// Errors raised by the shortest-path command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortestPathError {
    /// The command was issued with no vertex selected. Nothing was changed.
    #[error("no active vertex to start from")]
    NoActiveVertex,
    #[error("start vertex {0} not found")]
    StartVertexNotFound(VertexId),
    /// Distances are left partially relaxed; call `reset_distances` before
    /// the next run.
    #[error("graph contains a negative cycle (edge {edge} still relaxes)")]
    NegativeCycle { edge: EdgeId },
}
