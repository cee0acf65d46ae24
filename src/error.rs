//! Error types for mesh generation and queries

use thiserror::Error;

/// Errors that can occur during point relaxation, mesh construction or queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Extent with a non-finite or non-positive side
    #[error("invalid extent: {width} x {height} (both sides must be finite and positive)")]
    InvalidExtent { width: f64, height: f64 },

    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A relaxation step met a cell polygon with fewer than 3 vertices
    #[error("degenerate cell for site {site}: {vertex_count} vertices (need at least 3)")]
    DegenerateCell { site: usize, vertex_count: usize },

    /// The tessellation service rejected its input
    #[error("tessellation failed: {0}")]
    Tessellation(String),

    /// Requested vertex index does not exist
    #[error("vertex not found: {0}")]
    VertexNotFound(usize),
}

/// Result type alias for mesh operations
pub type Result<T> = std::result::Result<T, MeshError>;
