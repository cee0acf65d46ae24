//! Mesh construction from a tessellation
//!
//! The builder owns every growable array of the mesh and fills them in one
//! linear pass over the tessellation edges.

use glam::DVec2;
use log::info;
use std::collections::HashMap;
use std::time::Instant;

use super::{Mesh, MeshEdge};
use crate::error::{MeshError, Result};
use crate::extent::Extent;
use crate::tessellation::{TessEdge, Tessellation, Tessellator, VertexId};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Incrementally assembles a [`Mesh`]
///
/// Vertices are deduplicated by their tessellation [`VertexId`], never by
/// comparing coordinates.
#[derive(Debug)]
pub struct MeshBuilder {
    points: Vec<DVec2>,
    extent: Extent,
    vertex_index: HashMap<VertexId, usize>,
    vertices: Vec<DVec2>,
    adjacency: Vec<Vec<usize>>,
    neighbor_sites: Vec<Vec<DVec2>>,
    edges: Vec<MeshEdge>,
}

impl MeshBuilder {
    /// Start a mesh for the given sites and extent
    pub fn new(points: Vec<DVec2>, extent: Extent) -> Self {
        Self {
            points,
            extent,
            vertex_index: HashMap::new(),
            vertices: Vec::new(),
            adjacency: Vec::new(),
            neighbor_sites: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Add every edge of a tessellation, in order
    pub fn add_tessellation(&mut self, tessellation: &Tessellation) -> Result<()> {
        for edge in tessellation.edges() {
            self.add_edge(edge, tessellation)?;
        }
        Ok(())
    }

    /// Add one tessellation edge
    ///
    /// Returns the index of the new mesh edge, or `None` when the edge has no
    /// geometry (placeholder or zero-length) and was skipped.
    ///
    /// # Errors
    ///
    /// [`MeshError::Tessellation`] if the edge references a vertex the
    /// tessellation does not contain.
    pub fn add_edge(
        &mut self,
        edge: &TessEdge,
        tessellation: &Tessellation,
    ) -> Result<Option<usize>> {
        let Some((p0, p1)) = edge.segment else {
            return Ok(None);
        };
        if p0 == p1 {
            return Ok(None);
        }

        let a = self.resolve(p0, tessellation)?;
        let b = self.resolve(p1, tessellation)?;

        // note that each end is adjacent to the other
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);

        for vertex in [a, b] {
            let sites = &mut self.neighbor_sites[vertex];
            for site in std::iter::once(edge.left).chain(edge.right) {
                if !sites.contains(&site) {
                    sites.push(site);
                }
            }
        }

        self.edges.push(MeshEdge {
            a,
            b,
            left: edge.left,
            right: edge.right,
        });
        Ok(Some(self.edges.len() - 1))
    }

    /// Finish construction
    pub fn finish(self) -> Mesh {
        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&self.vertices);

        Mesh {
            points: self.points,
            vertices: self.vertices,
            adjacency: self.adjacency,
            neighbor_sites: self.neighbor_sites,
            edges: self.edges,
            extent: self.extent,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Look up (or assign) the mesh index of a tessellation vertex
    fn resolve(&mut self, id: VertexId, tessellation: &Tessellation) -> Result<usize> {
        if let Some(&index) = self.vertex_index.get(&id) {
            return Ok(index);
        }

        let position = tessellation.vertex(id).ok_or_else(|| {
            MeshError::Tessellation(format!("edge references unknown vertex {}", id.index()))
        })?;

        let index = self.vertices.len();
        self.vertex_index.insert(id, index);
        self.vertices.push(position);
        self.adjacency.push(Vec::new());
        self.neighbor_sites.push(Vec::new());
        Ok(index)
    }
}

/// Turn a set of well-spaced points into a mesh
///
/// Tessellates `points` once within `extent` and converts every cell edge
/// into a mesh edge between deduplicated vertices.
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
/// use glam::DVec2;
///
/// let mesh = build_mesh(vec![DVec2::ZERO], &Extent::default(), &VoronoiTessellator::default())
///     .unwrap();
///
/// // A lone site owns the whole extent: four corners, four boundary edges
/// assert_eq!(mesh.vertex_count(), 4);
/// assert!(mesh.edges().iter().all(|e| e.is_boundary()));
/// ```
pub fn build_mesh<T: Tessellator + ?Sized>(
    points: Vec<DVec2>,
    extent: &Extent,
    tessellator: &T,
) -> Result<Mesh> {
    let start = Instant::now();

    let tessellation = tessellator.tessellate(&points, extent)?;
    let mut builder = MeshBuilder::new(points, *extent);
    builder.add_tessellation(&tessellation)?;
    let mesh = builder.finish();

    info!(
        "mesh: {} points -> {} vertices, {} edges ({} tessellation edges) in {:?}",
        mesh.points().len(),
        mesh.vertex_count(),
        mesh.edge_count(),
        tessellation.edges().len(),
        start.elapsed()
    );

    Ok(mesh)
}
