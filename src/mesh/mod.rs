//! The map mesh: an indexed graph over the Voronoi vertices
//!
//! A [`Mesh`] is built once from a single tessellation pass and never changes
//! afterwards. Its vertices are the corners of the Voronoi cells, its edges
//! the cell boundaries, so every interior vertex joins three (occasionally
//! more) cells.

mod builder;
pub mod queries;

pub use builder::{build_mesh, MeshBuilder};
pub use queries::{map_vertices, MappedVertices};

use glam::DVec2;

use crate::extent::Extent;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// One edge of the mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshEdge {
    /// Index of the first endpoint
    pub a: usize,
    /// Index of the second endpoint
    pub b: usize,
    /// Site whose cell borders this edge
    pub left: DVec2,
    /// Site of the cell on the other side, absent on the map boundary
    pub right: Option<DVec2>,
}

impl MeshEdge {
    /// Check whether this edge lies on the map boundary
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }

    /// Get the endpoint opposite to `vertex`, if `vertex` is an endpoint
    pub fn other(&self, vertex: usize) -> Option<usize> {
        if vertex == self.a {
            Some(self.b)
        } else if vertex == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Indexed planar graph used as the substrate of a map
///
/// # Invariants
///
/// - every index in the adjacency lists and edges is `< vertex_count()`
/// - adjacency is symmetric: `j` is listed for `i` exactly as often as `i` for `j`
/// - `edge_count() == sum of adjacency list lengths / 2`
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
///
/// let mesh = generate_good_mesh(256, &Extent::default(), 42, &VoronoiTessellator::default())
///     .unwrap();
///
/// for (i, _) in mesh.vertices().iter().enumerate() {
///     for &j in &mesh.adjacency()[i] {
///         assert!(mesh.adjacency()[j].contains(&i));
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Sites the mesh was built from, in relaxation order
    points: Vec<DVec2>,

    /// Unique Voronoi vertices, in first-seen order
    vertices: Vec<DVec2>,

    /// Vertex indices connected to each vertex by an edge
    adjacency: Vec<Vec<usize>>,

    /// Sites whose cells touch each vertex (at most 3 for a regular vertex)
    neighbor_sites: Vec<Vec<DVec2>>,

    edges: Vec<MeshEdge>,

    extent: Extent,

    /// Nearest-vertex lookup, absent for a mesh without vertices
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl Mesh {
    /// Sites the mesh was built from
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Get a vertex position by index
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<DVec2> {
        self.vertices.get(index).copied()
    }

    /// Adjacency lists, indexed by vertex
    ///
    /// A list may repeat an index if the tessellation reported the same pair
    /// twice; use [`queries::unique_neighbors`] when a set is needed.
    #[inline]
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Sites of the cells meeting at each vertex, indexed by vertex
    #[inline]
    pub fn neighbor_sites(&self) -> &[Vec<DVec2>] {
        &self.neighbor_sites
    }

    #[inline]
    pub fn edges(&self) -> &[MeshEdge] {
        &self.edges
    }

    /// Extent the mesh was built in
    #[inline]
    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the mesh has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Find the vertex closest to a map position (requires spatial-index feature)
    ///
    /// Returns `None` for an empty mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_map_mesh::*;
    /// # use glam::DVec2;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let mesh = generate_good_mesh(64, &Extent::default(), 7, &VoronoiTessellator::default())
    ///     .unwrap();
    /// let vertex = mesh.nearest_vertex(DVec2::new(0.1, -0.2)).unwrap();
    /// assert!(vertex < mesh.vertex_count());
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn nearest_vertex(&self, position: DVec2) -> Option<usize> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }
}
