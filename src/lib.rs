//! Voronoi map meshes for procedural world generation
//!
//! Generates a planar mesh suited as the substrate of a terrain map: random
//! sites are relaxed with Lloyd's algorithm, tessellated into Voronoi cells,
//! and the cell corners become the vertices of an indexed graph with
//! adjacency, boundary flags and per-vertex neighbouring sites.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_map_mesh::*;
//! use voronoi_map_mesh::queries::is_boundary_vertex;
//!
//! // 1000 well-spaced sites on the unit map, one relaxation pass
//! let extent = Extent::default();
//! let mesh = generate_good_mesh(1000, &extent, 42, &VoronoiTessellator::default()).unwrap();
//!
//! let boundary = (0..mesh.vertex_count())
//!     .filter(|&i| is_boundary_vertex(&mesh, i).unwrap())
//!     .count();
//! println!("{} vertices, {} on the boundary", mesh.vertex_count(), boundary);
//!
//! // Or drive everything from a configuration
//! let config = MeshConfigBuilder::new()
//!     .seed(7)
//!     .point_count(256).unwrap()
//!     .build().unwrap();
//! let mesh = generate_mesh(&config).unwrap();
//! assert_eq!(mesh.points().len(), 256);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): nearest-vertex lookups using a KD-tree
//! - `serde`: serialization support for [`MeshConfig`]

// Modules
pub mod config;
pub mod error;
pub mod extent;
pub mod generation;
pub mod mesh;
pub mod render;
pub mod tessellation;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use config::{MeshConfig, MeshConfigBuilder};
pub use error::{MeshError, Result};
pub use extent::Extent;
pub use generation::{
    generate_good_mesh, generate_good_points, generate_mesh, generate_points, improve_points,
    improve_points_with_options, polygon_centroid, LloydOptions, SpacingStats,
};
pub use mesh::{build_mesh, map_vertices, queries, MappedVertices, Mesh, MeshBuilder, MeshEdge};
pub use tessellation::{TessEdge, Tessellation, Tessellator, VertexId, VoronoiTessellator};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
