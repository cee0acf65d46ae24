//! Tessellation service contract
//!
//! The mesh pipeline never computes a planar subdivision itself. It asks a
//! [`Tessellator`] for the Voronoi diagram of a point set clipped to an
//! [`Extent`] and consumes the resulting [`Tessellation`]: one cell polygon per
//! input point and a flat list of cell edges.
//!
//! [`VoronoiTessellator`] is the default service, built on a `spade` Delaunay
//! triangulation.

mod clip;
mod delaunay;
mod voronoi;

pub use voronoi::VoronoiTessellator;

pub(crate) use delaunay::compute_delaunay;

use glam::DVec2;

use crate::error::Result;
use crate::extent::Extent;

/// Stable handle of a tessellation vertex
///
/// Every edge and ring touching the same Voronoi vertex reports the same id,
/// so consumers can deduplicate vertices by identity instead of comparing
/// floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One edge of the tessellation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessEdge {
    /// Endpoints of the edge, `None` for a placeholder without geometry
    pub segment: Option<(VertexId, VertexId)>,
    /// Site whose cell borders the edge
    pub left: DVec2,
    /// Site on the other side, absent on the clip boundary
    pub right: Option<DVec2>,
}

impl TessEdge {
    /// Check whether the edge lies on the outer (clipped) boundary
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }
}

/// Result of tessellating a point set
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    polygons: Vec<Vec<DVec2>>,
    vertices: Vec<DVec2>,
    edges: Vec<TessEdge>,
}

impl Tessellation {
    /// Assemble a tessellation result
    ///
    /// `polygons` must be aligned with the input points, and every
    /// [`VertexId`] in `edges` must index into `vertices`.
    pub fn new(polygons: Vec<Vec<DVec2>>, vertices: Vec<DVec2>, edges: Vec<TessEdge>) -> Self {
        Self {
            polygons,
            vertices,
            edges,
        }
    }

    /// Cell rings, one per input point, in input order
    ///
    /// Rings are counter-clockwise and never repeat their first vertex. A cell
    /// that does not intersect the extent has an empty ring.
    #[inline]
    pub fn polygons(&self) -> &[Vec<DVec2>] {
        &self.polygons
    }

    /// Ring of the cell around input point `index`
    #[inline]
    pub fn polygon(&self, index: usize) -> Option<&[DVec2]> {
        self.polygons.get(index).map(Vec::as_slice)
    }

    /// All vertex positions, indexed by [`VertexId`]
    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<DVec2> {
        self.vertices.get(id.index()).copied()
    }

    #[inline]
    pub fn edges(&self) -> &[TessEdge] {
        &self.edges
    }

    /// Get the endpoint positions of an edge
    pub fn edge_endpoints(&self, edge: &TessEdge) -> Option<(DVec2, DVec2)> {
        let (a, b) = edge.segment?;
        Some((self.vertex(a)?, self.vertex(b)?))
    }
}

/// Computes the clipped Voronoi diagram of a point set
///
/// Implementations must be deterministic: identical points and extent produce
/// an identical [`Tessellation`].
pub trait Tessellator {
    /// Tessellate `points` within `extent`
    fn tessellate(&self, points: &[DVec2], extent: &Extent) -> Result<Tessellation>;
}

impl<T: Tessellator + ?Sized> Tessellator for &T {
    fn tessellate(&self, points: &[DVec2], extent: &Extent) -> Result<Tessellation> {
        (**self).tessellate(points, extent)
    }
}
