//! Error types for instance generation.

use thiserror::Error;

/// Errors that can occur while building a sphere graph.
///
/// Exhausting the deletion order during sparsification is not an error;
/// the sparsifier simply stops early.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Fewer than two vertices: no candidate arc, so no source/sink pair.
    #[error("invalid vertex count: need at least 2, got {0}")]
    InvalidVertexCount(usize),

    /// The dense N x N distance matrix would not fit in memory.
    #[error("too many vertices: {0} (a dense {0} x {0} distance matrix is not addressable)")]
    TooManyVertices(usize),

    /// A precomputed vertex is not on the unit sphere.
    #[error("vertex {index} is off the unit sphere (length {length})")]
    VertexOffSphere { index: usize, length: f64 },

    /// Degree floor must be strictly below the vertex count.
    #[error("invalid degree floor {degree} for {n} vertices (must be < n)")]
    InvalidDegree { degree: usize, n: usize },

    /// Throw-away fraction must lie in [0, 1).
    #[error("invalid throw-away fraction {0} (must be in [0, 1))")]
    InvalidThrowAwayFraction(f64),

    /// Precomputed distances were supplied without the matching endpoint.
    #[error("incomplete override: missing {0}")]
    IncompleteOverride(&'static str),

    /// Precomputed inputs disagree on the number of vertices.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Source or sink index outside [0, n).
    #[error("endpoint {index} out of range for {n} vertices")]
    InvalidEndpoint { index: usize, n: usize },

    #[error("source and sink are the same vertex ({0})")]
    SourceEqualsSink(usize),

    /// Negative, non-finite, or diagonal distance entry.
    #[error("invalid distance {value} at ({i}, {j})")]
    InvalidDistance { i: usize, j: usize, value: f64 },

    /// The candidate graph has no arcs to order.
    #[error("no candidate arcs to sparsify")]
    NoCandidateArcs,
}
