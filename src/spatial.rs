//! Spatial indexing for fast position-to-vertex lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;
use std::fmt;

/// Wrapper around a 2D KD-tree over mesh vertices
///
/// Provides O(log n) nearest-neighbour lookups to turn map positions (clicks,
/// feature placement, overlays) into vertex indices.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    len: usize,
}

impl SpatialIndex {
    /// Build a spatial index from vertex positions
    ///
    /// Returns `None` for an empty slice, which has no nearest vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map_mesh::SpatialIndex;
    /// use glam::DVec2;
    ///
    /// let positions = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(0.4, 0.0),
    ///     DVec2::new(0.0, 0.4),
    /// ];
    ///
    /// let index = SpatialIndex::new(&positions).unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(0.35, 0.05)), 1);
    /// ```
    pub fn new(positions: &[DVec2]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }

        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            len: points.len(),
        })
    }

    /// Find the index of the position nearest to `query`
    pub fn find_nearest(&self, query: DVec2) -> usize {
        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        result.item
    }

    /// Number of indexed positions
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.len).finish()
    }
}
