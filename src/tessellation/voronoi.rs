//! Clipped Voronoi diagram on top of a spade Delaunay triangulation
//!
//! Each cell starts as the extent rectangle and is clipped by the bisector
//! towards every Delaunay neighbour of its site. Cell vertices are interned
//! into shared [`VertexId`]s, and edges are read back off the rings.

use glam::DVec2;
use log::trace;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::clip::{clip_to_bisector, VertexInterner};
use super::delaunay::compute_delaunay;
use super::{TessEdge, Tessellation, Tessellator, VertexId};
use crate::error::{MeshError, Result};
use crate::extent::Extent;

/// Default merge distance, relative to the longer side of the extent
const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Default tessellation service
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::{Extent, Tessellator, VoronoiTessellator};
/// use glam::DVec2;
///
/// let points = vec![DVec2::new(-0.25, 0.0), DVec2::new(0.25, 0.0)];
/// let tessellation = VoronoiTessellator::default()
///     .tessellate(&points, &Extent::default())
///     .unwrap();
///
/// // Two half-squares share one interior edge
/// assert_eq!(tessellation.polygons().len(), 2);
/// assert_eq!(tessellation.edges().iter().filter(|e| !e.is_boundary()).count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiTessellator {
    relative_tolerance: f64,
}

impl VoronoiTessellator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom merge distance (fraction of the longer extent side)
    ///
    /// Cell vertices closer than this are treated as the same vertex.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the tolerance is finite and positive
    pub fn with_tolerance(relative_tolerance: f64) -> Result<Self> {
        if !(relative_tolerance.is_finite() && relative_tolerance > 0.0) {
            return Err(MeshError::InvalidConfig(format!(
                "vertex merge tolerance must be finite and positive (got {})",
                relative_tolerance
            )));
        }
        Ok(Self { relative_tolerance })
    }

    #[inline]
    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }
}

impl Default for VoronoiTessellator {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}

impl Tessellator for VoronoiTessellator {
    fn tessellate(&self, points: &[DVec2], extent: &Extent) -> Result<Tessellation> {
        if points.is_empty() {
            return Ok(Tessellation::default());
        }

        let delaunay = compute_delaunay(points)?;
        let tolerance = self.relative_tolerance * extent.width().max(extent.height());
        let mut interner = VertexInterner::new(tolerance);

        // Rings per unique site
        let rings: Vec<Vec<VertexId>> = delaunay
            .sites
            .iter()
            .enumerate()
            .map(|(site_index, &site)| {
                let mut cell = extent.corners().to_vec();
                for &other in &delaunay.neighbors[site_index] {
                    cell = clip_to_bisector(&cell, site, delaunay.sites[other], tolerance);
                    if cell.len() < 3 {
                        return Vec::new();
                    }
                }
                interner.intern_ring(&cell)
            })
            .collect();

        let edges = collect_edges(&rings, &delaunay.sites);

        let site_polygons: Vec<Vec<DVec2>> = rings
            .iter()
            .map(|ring| ring.iter().map(|&id| interner.position(id)).collect())
            .collect();
        let polygons = delaunay
            .site_of_input
            .iter()
            .map(|&site| site_polygons[site].clone())
            .collect();

        let vertices = interner.into_positions();
        trace!(
            "tessellated {} points ({} sites) into {} vertices and {} edges",
            points.len(),
            delaunay.sites.len(),
            vertices.len(),
            edges.len()
        );

        Ok(Tessellation::new(polygons, vertices, edges))
    }
}

/// Read the edge list off the cell rings
///
/// Edges are ordered by first appearance while walking the sites in order.
/// The first ring containing an edge becomes its `left` site; since rings run
/// counter-clockwise, that site really lies to the left of `p0 -> p1`.
fn collect_edges(rings: &[Vec<VertexId>], sites: &[DVec2]) -> Vec<TessEdge> {
    let mut slots: HashMap<(VertexId, VertexId), usize> = HashMap::new();
    let mut edges: Vec<TessEdge> = Vec::new();

    for (site_index, ring) in rings.iter().enumerate() {
        let site = sites[site_index];
        for (k, &a) in ring.iter().enumerate() {
            let b = ring[(k + 1) % ring.len()];
            let key = if a < b { (a, b) } else { (b, a) };
            match slots.entry(key) {
                Entry::Occupied(slot) => {
                    let edge = &mut edges[*slot.get()];
                    if edge.right.is_none() {
                        edge.right = Some(site);
                    } else {
                        trace!("edge {:?} claimed by a third site {}", key, site_index);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(edges.len());
                    edges.push(TessEdge {
                        segment: Some((a, b)),
                        left: site,
                        right: None,
                    });
                }
            }
        }
    }

    edges
}
