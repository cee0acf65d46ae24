//! Random point sampling inside an extent

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::extent::Extent;

/// Generate `count` uniformly distributed points inside `extent`
///
/// Each coordinate is drawn independently; `x` is drawn before `y` for every
/// point, so the sequence is fully determined by `seed`.
///
/// # Example
///
/// ```
/// use voronoi_map_mesh::{generation::generate_points, Extent};
///
/// let extent = Extent::default();
/// let points = generate_points(100, &extent, 42);
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|p| extent.contains(*p)));
/// ```
pub fn generate_points(count: usize, extent: &Extent, seed: u32) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    generate_points_with_rng(count, extent, &mut rng)
}

/// Same as [`generate_points`], drawing from a caller-supplied generator
pub fn generate_points_with_rng<R: Rng + ?Sized>(
    count: usize,
    extent: &Extent,
    rng: &mut R,
) -> Vec<DVec2> {
    (0..count)
        .map(|_| {
            let x = extent.width() * (rng.gen::<f64>() - 0.5);
            let y = extent.height() * (rng.gen::<f64>() - 0.5);
            DVec2::new(x, y)
        })
        .collect()
}

/// Generate points and sort them left to right
///
/// The sort is stable and only pins down the input order of the later
/// tessellation passes; it says nothing about spatial locality beyond `x`.
pub fn generate_sorted_points(count: usize, extent: &Extent, seed: u32) -> Vec<DVec2> {
    let mut points = generate_points(count, extent, seed);
    sort_by_x(&mut points);
    points
}

/// Stable ascending sort on the x coordinate
pub(crate) fn sort_by_x(points: &mut [DVec2]) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
}
