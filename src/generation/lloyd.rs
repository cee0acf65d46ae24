//! Lloyd's Relaxation for uniform point distribution
//!
//! Lloyd's Relaxation iteratively evens out a point set by moving each point
//! to the centroid of its Voronoi cell. One pass removes most clumping while
//! keeping the irregularity a map mesh needs; more passes drift towards a
//! regular honeycomb.

use glam::DVec2;
use log::{debug, info};
use std::time::Instant;

use crate::error::{MeshError, Result};
use crate::extent::Extent;
use crate::tessellation::{Tessellation, Tessellator};

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold - stop when max displacement < this value
    /// (as a fraction of the extent diagonal). Set to 0.0 to always run
    /// `max_iterations` passes.
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1,
            convergence_threshold: 0.0,
        }
    }
}

/// Apply Lloyd's Relaxation to a point set
///
/// # Algorithm
///
/// For each iteration:
/// 1. Tessellate the current points within `extent`
/// 2. Look up the cell polygon of every point
/// 3. Replace the point with the centroid of that polygon
///
/// Runs exactly `iterations` tessellation passes; `0` returns the input as is.
///
/// # Errors
///
/// [`MeshError::DegenerateCell`] when a cell has fewer than 3 vertices, and
/// any error raised by the tessellator.
pub fn improve_points<T: Tessellator + ?Sized>(
    points: Vec<DVec2>,
    iterations: usize,
    extent: &Extent,
    tessellator: &T,
) -> Result<Vec<DVec2>> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    improve_points_with_options(points, extent, tessellator, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// This variant adds early termination once the largest per-point move
/// drops below `options.convergence_threshold` times the extent diagonal.
pub fn improve_points_with_options<T: Tessellator + ?Sized>(
    mut points: Vec<DVec2>,
    extent: &Extent,
    tessellator: &T,
    options: LloydOptions,
) -> Result<Vec<DVec2>> {
    let convergence_threshold = options.convergence_threshold * extent.diagonal();
    let total_start = Instant::now();

    debug!(
        "lloyd: starting with {} points, max {} iterations, threshold {:.4} (abs: {:.6})",
        points.len(),
        options.max_iterations,
        options.convergence_threshold,
        convergence_threshold
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let tess_start = Instant::now();
        let tessellation = tessellator.tessellate(&points, extent)?;
        let tess_time = tess_start.elapsed();

        let centroid_start = Instant::now();
        let (new_points, max_displacement) = compute_new_points(&points, &tessellation)?;
        let centroid_time = centroid_start.elapsed();

        points = new_points;
        iterations_run = iteration + 1;

        debug!(
            "lloyd: iter {}: tessellation={:?}, centroids={:?}, total={:?}, max_disp={:.6}",
            iteration + 1,
            tess_time,
            centroid_time,
            iter_start.elapsed(),
            max_displacement
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            converged = true;
            debug!(
                "lloyd: converged at iteration {} (max_disp {:.6} < threshold {:.6})",
                iteration + 1,
                max_displacement,
                convergence_threshold
            );
            break;
        }
    }

    info!(
        "lloyd: finished {} iterations (of max {}) on {} points, converged={}, total={:?}",
        iterations_run,
        options.max_iterations,
        points.len(),
        converged,
        total_start.elapsed()
    );

    Ok(points)
}

/// Compute new point positions and track maximum displacement
fn compute_new_points(points: &[DVec2], tessellation: &Tessellation) -> Result<(Vec<DVec2>, f64)> {
    let mut max_displacement: f64 = 0.0;

    let new_points = points
        .iter()
        .enumerate()
        .map(|(site, &old)| {
            let ring = tessellation.polygon(site).unwrap_or(&[]);
            let centroid = polygon_centroid(ring).ok_or(MeshError::DegenerateCell {
                site,
                vertex_count: ring.len(),
            })?;
            max_displacement = max_displacement.max(centroid.distance(old));
            Ok(centroid)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((new_points, max_displacement))
}

/// Area centroid of a simple polygon ring
///
/// Uses the shoelace formula, relative to the first vertex for precision.
/// Rings whose area is numerically zero (collinear vertices) fall back to the
/// mean of their vertices. Returns `None` for fewer than 3 vertices.
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::generation::polygon_centroid;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(2.0, 2.0),
///     DVec2::new(0.0, 2.0),
/// ];
/// assert_eq!(polygon_centroid(&square), Some(DVec2::new(1.0, 1.0)));
/// assert_eq!(polygon_centroid(&square[..2]), None);
/// ```
pub fn polygon_centroid(ring: &[DVec2]) -> Option<DVec2> {
    if ring.len() < 3 {
        return None;
    }

    let origin = ring[0];
    let mut twice_area = 0.0;
    let mut weighted = DVec2::ZERO;
    let mut reach: f64 = 0.0;

    for (i, &vertex) in ring.iter().enumerate() {
        let a = vertex - origin;
        let b = ring[(i + 1) % ring.len()] - origin;
        let cross = a.perp_dot(b);
        twice_area += cross;
        weighted += (a + b) * cross;
        reach = reach.max(a.length_squared());
    }

    if twice_area.abs() <= 1e-12 * reach {
        let sum: DVec2 = ring.iter().copied().sum();
        return Some(sum / ring.len() as f64);
    }

    Some(origin + weighted / (3.0 * twice_area))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::{generate_points, generate_sorted_points};
    use crate::tessellation::VoronoiTessellator;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    /// Counts calls before delegating to the default tessellator
    struct CountingTessellator {
        calls: Cell<usize>,
    }

    impl Tessellator for CountingTessellator {
        fn tessellate(&self, points: &[DVec2], extent: &Extent) -> Result<Tessellation> {
            self.calls.set(self.calls.get() + 1);
            VoronoiTessellator::default().tessellate(points, extent)
        }
    }

    /// Reports a two-vertex cell for every point
    struct SliverTessellator;

    impl Tessellator for SliverTessellator {
        fn tessellate(&self, points: &[DVec2], _extent: &Extent) -> Result<Tessellation> {
            let polygons = points.iter().map(|&p| vec![p, p + DVec2::X]).collect();
            Ok(Tessellation::new(polygons, vec![], vec![]))
        }
    }

    #[test]
    fn test_lloyd_relaxation() {
        let extent = Extent::default();
        let points = generate_points(100, &extent, 42);
        let relaxed = improve_points(points, 3, &extent, &VoronoiTessellator::default()).unwrap();

        assert_eq!(relaxed.len(), 100);
        for point in &relaxed {
            assert!(extent.contains(*point));
        }
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let extent = Extent::default();
        let tessellator = VoronoiTessellator::default();
        let points = generate_sorted_points(80, &extent, 12345);

        let relaxed1 = improve_points(points.clone(), 2, &extent, &tessellator).unwrap();
        let relaxed2 = improve_points(points, 2, &extent, &tessellator).unwrap();

        // Bit-for-bit identical
        assert_eq!(relaxed1, relaxed2);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let extent = Extent::default();
        let tessellator = CountingTessellator { calls: Cell::new(0) };
        let points = generate_points(20, &extent, 5);

        let relaxed = improve_points(points.clone(), 0, &extent, &tessellator).unwrap();

        assert_eq!(relaxed, points);
        assert_eq!(tessellator.calls.get(), 0);
    }

    #[test]
    fn test_one_tessellation_per_iteration() {
        let extent = Extent::default();
        let tessellator = CountingTessellator { calls: Cell::new(0) };
        let points = generate_points(30, &extent, 5);

        improve_points(points, 4, &extent, &tessellator).unwrap();
        assert_eq!(tessellator.calls.get(), 4);
    }

    #[test]
    fn test_corner_points_move_to_quadrant_centroids() {
        let extent = Extent::new(2.0, 2.0).unwrap();
        let corners = extent.corners().to_vec();

        let relaxed =
            improve_points(corners.clone(), 1, &extent, &VoronoiTessellator::default()).unwrap();

        for (old, new) in corners.iter().zip(&relaxed) {
            assert_relative_eq!(new.x, old.x * 0.5, epsilon = 1e-12);
            assert_relative_eq!(new.y, old.y * 0.5, epsilon = 1e-12);
            assert_relative_eq!(old.distance(*new), 0.5_f64.sqrt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_cell_is_an_error() {
        let extent = Extent::default();
        let points = vec![DVec2::new(0.1, 0.1), DVec2::new(-0.1, 0.2)];

        let err = improve_points(points, 1, &extent, &SliverTessellator).unwrap_err();
        assert_eq!(
            err,
            MeshError::DegenerateCell {
                site: 0,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn test_point_outside_extent_is_degenerate() {
        let extent = Extent::default();
        let points = vec![DVec2::new(0.0, 0.0), DVec2::new(5.0, 0.0)];

        let err = improve_points(points, 1, &extent, &VoronoiTessellator::default()).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateCell { site: 1, .. }));
    }

    #[test]
    fn test_convergence_stops_early() {
        let extent = Extent::default();
        let tessellator = CountingTessellator { calls: Cell::new(0) };
        let points = generate_points(50, &extent, 42);
        let options = LloydOptions {
            max_iterations: 50,
            convergence_threshold: 0.05,
        };

        let relaxed = improve_points_with_options(points, &extent, &tessellator, options).unwrap();

        assert_eq!(relaxed.len(), 50);
        assert!(tessellator.calls.get() < 50);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 1);
        assert_eq!(options.convergence_threshold, 0.0);
    }

    #[test]
    fn test_centroid_of_triangle() {
        let triangle = [
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(0.0, 3.0),
        ];
        let centroid = polygon_centroid(&triangle).unwrap();
        assert_relative_eq!(centroid.x, 1.0);
        assert_relative_eq!(centroid.y, 1.0);
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        // Vertex mean would be pulled towards the cluster on the right
        let ring = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 0.1),
            DVec2::new(4.0, 0.2),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];
        let centroid = polygon_centroid(&ring).unwrap();
        assert_relative_eq!(centroid.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(centroid.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_orientation_independent() {
        let ccw = [
            DVec2::new(-1.0, -1.0),
            DVec2::new(0.0, -1.0),
            DVec2::new(0.5, 0.0),
            DVec2::new(-1.0, 0.5),
        ];
        let mut cw = ccw;
        cw.reverse();

        let a = polygon_centroid(&ccw).unwrap();
        let b = polygon_centroid(&cw).unwrap();
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_of_collinear_ring() {
        let ring = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
        ];
        assert_eq!(polygon_centroid(&ring), Some(DVec2::new(1.0, 1.0)));
    }
}
