//! Delaunay triangulation of the input sites
//!
//! The Voronoi cell of a site is bounded only by the bisectors towards its
//! Delaunay neighbours, so the triangulation is used purely as a neighbour
//! oracle. This module is a thin wrapper around spade.

use glam::DVec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::{MeshError, Result};

/// Sites and their Delaunay neighbours
pub(crate) struct DelaunayResult {
    /// Unique site positions (duplicate inputs collapse into one site)
    pub sites: Vec<DVec2>,
    /// Neighbouring site indices, per site
    pub neighbors: Vec<Vec<usize>>,
    /// Site index of every input point, in input order
    pub site_of_input: Vec<usize>,
}

/// Triangulate the input points
///
/// Points are inserted one by one in input order, which keeps site indices
/// deterministic. Non-finite coordinates are rejected before insertion.
pub(crate) fn compute_delaunay(points: &[DVec2]) -> Result<DelaunayResult> {
    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut site_of_input = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        if !point.is_finite() {
            return Err(MeshError::Tessellation(format!(
                "point {} has non-finite coordinates ({}, {})",
                index, point.x, point.y
            )));
        }
        let handle = triangulation
            .insert(Point2::new(point.x, point.y))
            .map_err(|err| {
                MeshError::Tessellation(format!(
                    "cannot insert point {} ({}, {}): {:?}",
                    index, point.x, point.y, err
                ))
            })?;
        site_of_input.push(handle.index());
    }

    let sites: Vec<DVec2> = triangulation
        .vertices()
        .map(|vertex| {
            let position = vertex.position();
            DVec2::new(position.x, position.y)
        })
        .collect();

    // Undirected edges also exist while the triangulation is still degenerate
    // (all sites collinear), unlike faces.
    let mut neighbors = vec![Vec::new(); sites.len()];
    for edge in triangulation.undirected_edges() {
        let [from, to] = edge.vertices();
        let (from, to) = (from.fix().index(), to.fix().index());
        neighbors[from].push(to);
        neighbors[to].push(from);
    }

    Ok(DelaunayResult {
        sites,
        neighbors,
        site_of_input,
    })
}
