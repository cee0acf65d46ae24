//! Read-only queries over a [`Mesh`]
//!
//! Every query that takes a vertex index fails with
//! [`MeshError::VertexNotFound`] when the index is out of range.

use glam::DVec2;
use std::collections::HashSet;
use std::ops::Index;

use super::Mesh;
use crate::error::{MeshError, Result};

#[inline]
fn position(mesh: &Mesh, vertex: usize) -> Result<DVec2> {
    mesh.vertex(vertex).ok_or(MeshError::VertexNotFound(vertex))
}

#[inline]
fn adjacency(mesh: &Mesh, vertex: usize) -> Result<&[usize]> {
    mesh.adjacency()
        .get(vertex)
        .map(Vec::as_slice)
        .ok_or(MeshError::VertexNotFound(vertex))
}

/// Check whether a vertex lies on the map boundary
///
/// A vertex with fewer than three distinct neighbours is on the boundary;
/// every interior Voronoi vertex joins at least three edges.
pub fn is_boundary_vertex(mesh: &Mesh, vertex: usize) -> Result<bool> {
    Ok(unique_neighbors(mesh, vertex)?.len() < 3)
}

/// Check whether a vertex lies outside the central 90% of the extent
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
/// use voronoi_map_mesh::queries::is_near_boundary;
///
/// let mesh = generate_good_mesh(1, &Extent::default(), 1, &VoronoiTessellator::default())
///     .unwrap();
///
/// // The only vertices are the corners of the map
/// assert!(is_near_boundary(&mesh, 0).unwrap());
/// ```
pub fn is_near_boundary(mesh: &Mesh, vertex: usize) -> Result<bool> {
    let position = position(mesh, vertex)?;
    Ok(mesh.extent().is_near_boundary(position))
}

/// Get the neighbours of a vertex, in insertion order
///
/// The list may contain the same index twice; see [`unique_neighbors`].
pub fn neighbors(mesh: &Mesh, vertex: usize) -> Result<Vec<usize>> {
    adjacency(mesh, vertex).map(<[usize]>::to_vec)
}

/// Get the distinct neighbours of a vertex, sorted by index
pub fn unique_neighbors(mesh: &Mesh, vertex: usize) -> Result<Vec<usize>> {
    let mut unique = adjacency(mesh, vertex)?.to_vec();
    unique.sort_unstable();
    unique.dedup();
    Ok(unique)
}

/// Euclidean distance between two vertices
pub fn distance(mesh: &Mesh, a: usize, b: usize) -> Result<f64> {
    let pa = position(mesh, a)?;
    let pb = position(mesh, b)?;
    Ok(pa.distance(pb))
}

/// Find all vertices within `hops` edges of `start`
///
/// Uses breadth-first search. The result includes `start` itself and is
/// sorted by index. An out-of-range `start` yields an empty list.
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
/// use voronoi_map_mesh::queries::{unique_neighbors, vertices_within_hops};
///
/// let mesh = generate_good_mesh(100, &Extent::default(), 42, &VoronoiTessellator::default())
///     .unwrap();
///
/// let nearby = vertices_within_hops(&mesh, 0, 1);
/// assert_eq!(nearby.len(), 1 + unique_neighbors(&mesh, 0).unwrap().len());
/// ```
pub fn vertices_within_hops(mesh: &Mesh, start: usize, hops: usize) -> Vec<usize> {
    if start >= mesh.vertex_count() {
        return vec![];
    }

    let mut visited = HashSet::new();
    let mut current = vec![start];
    visited.insert(start);

    for _ in 0..hops {
        let mut next = Vec::new();
        for &vertex in &current {
            for &neighbor in &mesh.adjacency()[vertex] {
                if visited.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        current = next;
    }

    let mut found: Vec<usize> = visited.into_iter().collect();
    found.sort_unstable();
    found
}

/// Compute one value per vertex
///
/// The callback receives each vertex position in index order. The result
/// keeps a borrow of the mesh so the values can be walked together with the
/// graph they describe.
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
///
/// let mesh = generate_good_mesh(64, &Extent::default(), 3, &VoronoiTessellator::default())
///     .unwrap();
/// let radial = map_vertices(&mesh, |v| v.length());
///
/// assert_eq!(radial.len(), mesh.vertex_count());
/// assert!(std::ptr::eq(radial.mesh(), &mesh));
/// ```
pub fn map_vertices<T, F>(mesh: &Mesh, f: F) -> MappedVertices<'_, T>
where
    F: FnMut(DVec2) -> T,
{
    MappedVertices {
        values: mesh.vertices().iter().copied().map(f).collect(),
        mesh,
    }
}

/// Per-vertex values tied to the mesh they were computed from
#[derive(Debug, Clone)]
pub struct MappedVertices<'a, T> {
    values: Vec<T>,
    mesh: &'a Mesh,
}

impl<'a, T> MappedVertices<'a, T> {
    /// The source mesh
    #[inline]
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn get(&self, vertex: usize) -> Option<&T> {
        self.values.get(vertex)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(vertex index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.values.iter().enumerate()
    }

    /// Drop the mesh borrow and keep the values
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T> Index<usize> for MappedVertices<'_, T> {
    type Output = T;

    fn index(&self, vertex: usize) -> &T {
        &self.values[vertex]
    }
}
