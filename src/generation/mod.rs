//! Point generation and relaxation
//!
//! Produces well-spaced sites in three steps: uniform random sampling, a
//! left-to-right sort, and Lloyd's relaxation against a [`Tessellator`].

mod lloyd;
mod points;
mod stats;

pub use lloyd::{improve_points, improve_points_with_options, polygon_centroid, LloydOptions};
pub use points::{generate_points, generate_points_with_rng, generate_sorted_points};
pub use stats::SpacingStats;

use glam::DVec2;

use crate::config::MeshConfig;
use crate::error::Result;
use crate::extent::Extent;
use crate::mesh::{build_mesh, Mesh};
use crate::tessellation::{Tessellator, VoronoiTessellator};

/// Relaxation passes used by [`generate_good_points`]
///
/// A single pass removes clumps but keeps the cells irregular enough to look
/// natural on a map.
pub const GOOD_POINT_ITERATIONS: usize = 1;

/// Generate `count` well-spaced points inside `extent`
///
/// Samples uniform points, sorts them by `x` and runs exactly one relaxation
/// pass (one tessellation call).
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
///
/// let extent = Extent::default();
/// let points = generate_good_points(200, &extent, 42, &VoronoiTessellator::default()).unwrap();
/// assert_eq!(points.len(), 200);
/// assert!(points.iter().all(|p| extent.contains(*p)));
/// ```
pub fn generate_good_points<T: Tessellator + ?Sized>(
    count: usize,
    extent: &Extent,
    seed: u32,
    tessellator: &T,
) -> Result<Vec<DVec2>> {
    let points = generate_sorted_points(count, extent, seed);
    improve_points(points, GOOD_POINT_ITERATIONS, extent, tessellator)
}

/// Generate well-spaced points and build their mesh
///
/// Calls the tessellator exactly twice: once to relax, once to build.
pub fn generate_good_mesh<T: Tessellator + ?Sized>(
    count: usize,
    extent: &Extent,
    seed: u32,
    tessellator: &T,
) -> Result<Mesh> {
    let points = generate_good_points(count, extent, seed, tessellator)?;
    build_mesh(points, extent, tessellator)
}

/// Generate a mesh from a configuration
///
/// Same pipeline as [`generate_good_mesh`], with `config.improvements`
/// relaxation passes and the default [`VoronoiTessellator`].
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::*;
///
/// let config = MeshConfigBuilder::new()
///     .seed(42)
///     .point_count(500)
///     .unwrap()
///     .improvements(2)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mesh = generate_mesh(&config).unwrap();
/// assert_eq!(mesh.points().len(), 500);
/// ```
pub fn generate_mesh(config: &MeshConfig) -> Result<Mesh> {
    let extent = config.extent()?;
    let tessellator = VoronoiTessellator::default();

    let points = generate_sorted_points(config.point_count, &extent, config.seed);
    let points = improve_points(points, config.improvements, &extent, &tessellator)?;
    build_mesh(points, &extent, &tessellator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfigBuilder;
    use crate::error::MeshError;
    use crate::tessellation::Tessellation;
    use std::cell::Cell;

    struct CountingTessellator {
        calls: Cell<usize>,
        inner: VoronoiTessellator,
    }

    impl Tessellator for CountingTessellator {
        fn tessellate(&self, points: &[DVec2], extent: &Extent) -> Result<Tessellation> {
            self.calls.set(self.calls.get() + 1);
            self.inner.tessellate(points, extent)
        }
    }

    #[test]
    fn test_good_mesh_tessellates_twice() {
        let tessellator = CountingTessellator {
            calls: Cell::new(0),
            inner: VoronoiTessellator::default(),
        };

        let mesh = generate_good_mesh(100, &Extent::default(), 9, &tessellator).unwrap();
        assert_eq!(tessellator.calls.get(), 2);
        assert_eq!(mesh.points().len(), 100);
    }

    #[test]
    fn test_good_points_are_deterministic() {
        let extent = Extent::new(3.0, 2.0).unwrap();
        let tessellator = VoronoiTessellator::default();

        let a = generate_good_points(150, &extent, 77, &tessellator).unwrap();
        let b = generate_good_points(150, &extent, 77, &tessellator).unwrap();
        let c = generate_good_points(150, &extent, 78, &tessellator).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|p| extent.contains(*p)));
    }

    #[test]
    fn test_good_points_empty() {
        let points =
            generate_good_points(0, &Extent::default(), 1, &VoronoiTessellator::default()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_generate_mesh_matches_manual_pipeline() {
        let config = MeshConfigBuilder::new()
            .seed(5)
            .point_count(120)
            .unwrap()
            .improvements(1)
            .unwrap()
            .build()
            .unwrap();

        let from_config = generate_mesh(&config).unwrap();
        let manual = generate_good_mesh(
            120,
            &config.extent().unwrap(),
            5,
            &VoronoiTessellator::default(),
        )
        .unwrap();

        assert_eq!(from_config.points(), manual.points());
        assert_eq!(from_config.vertices(), manual.vertices());
        assert_eq!(from_config.edge_count(), manual.edge_count());
    }

    #[test]
    fn test_generate_mesh_rejects_bad_extent() {
        let config = MeshConfig {
            width: -1.0,
            ..MeshConfig::default()
        };
        assert!(matches!(
            generate_mesh(&config),
            Err(MeshError::InvalidExtent { .. })
        ));
    }
}
