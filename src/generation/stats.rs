//! Point spacing statistics
//!
//! Measures how evenly a point set is spread by looking at the distance from
//! every point to its nearest neighbour. Relaxation should shrink the spread
//! of these distances, which makes the variance a handy regression metric.

use glam::DVec2;

use crate::error::Result;
use crate::tessellation::compute_delaunay;

/// Nearest-neighbour distance statistics of a point set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpacingStats {
    /// Number of points that have at least one neighbour
    pub sample_count: usize,
    pub mean: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl SpacingStats {
    /// Measure the nearest-neighbour spacing of `points`
    ///
    /// The nearest neighbour of a point is always one of its Delaunay
    /// neighbours, so this runs in O(n log n). Duplicate points have a
    /// nearest-neighbour distance of 0. Fewer than two distinct positions
    /// yield all-zero statistics.
    pub fn measure(points: &[DVec2]) -> Result<Self> {
        if points.len() < 2 {
            return Ok(Self::default());
        }

        let delaunay = compute_delaunay(points)?;

        let mut copies = vec![0usize; delaunay.sites.len()];
        for &site in &delaunay.site_of_input {
            copies[site] += 1;
        }

        let distances: Vec<f64> = delaunay
            .site_of_input
            .iter()
            .filter_map(|&site| {
                if copies[site] > 1 {
                    return Some(0.0);
                }
                let position = delaunay.sites[site];
                delaunay.neighbors[site]
                    .iter()
                    .map(|&other| position.distance(delaunay.sites[other]))
                    .min_by(f64::total_cmp)
            })
            .collect();

        if distances.is_empty() {
            return Ok(Self::default());
        }

        let n = distances.len() as f64;
        let mean = distances.iter().sum::<f64>() / n;
        let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
        let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = distances.iter().copied().fold(0.0, f64::max);

        Ok(Self {
            sample_count: distances.len(),
            mean,
            variance,
            min,
            max,
        })
    }

    /// Standard deviation relative to the mean (0 for a perfectly even set)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.variance.sqrt() / self.mean
        } else {
            0.0
        }
    }
}
