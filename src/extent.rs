//! Rectangular map bounds
//!
//! All coordinates are relative to the map center, so an extent of
//! `width x height` covers `[-width/2, width/2] x [-height/2, height/2]`.

use glam::DVec2;

use crate::error::{MeshError, Result};

/// Fraction of the half-extent beyond which a point counts as near the edge
const NEAR_BOUNDARY_FRACTION: f64 = 0.45;

/// Bounding rectangle of a map, centered on the origin
///
/// Construction validates the sides, so every `Extent` in circulation is
/// finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    width: f64,
    height: f64,
}

impl Extent {
    /// Create an extent, rejecting non-finite or non-positive sides
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map_mesh::Extent;
    ///
    /// let extent = Extent::new(2.0, 1.0).unwrap();
    /// assert_eq!(extent.half_width(), 1.0);
    /// assert!(Extent::new(0.0, 1.0).is_err());
    /// ```
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MeshError::InvalidExtent { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Lower-left corner
    #[inline]
    pub fn min(&self) -> DVec2 {
        DVec2::new(-self.half_width(), -self.half_height())
    }

    /// Upper-right corner
    #[inline]
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.half_width(), self.half_height())
    }

    /// Corners in counter-clockwise order, starting at the lower left
    pub fn corners(&self) -> [DVec2; 4] {
        let (w, h) = (self.half_width(), self.half_height());
        [
            DVec2::new(-w, -h),
            DVec2::new(w, -h),
            DVec2::new(w, h),
            DVec2::new(-w, h),
        ]
    }

    /// Length of the diagonal
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Check whether a point lies inside the (closed) rectangle
    pub fn contains(&self, point: DVec2) -> bool {
        point.x.abs() <= self.half_width() && point.y.abs() <= self.half_height()
    }

    /// Check whether a point lies outside the central 90% of the extent
    pub fn is_near_boundary(&self, point: DVec2) -> bool {
        point.x.abs() > NEAR_BOUNDARY_FRACTION * self.width
            || point.y.abs() > NEAR_BOUNDARY_FRACTION * self.height
    }
}

impl Default for Extent {
    /// The unit map: `[-0.5, 0.5] x [-0.5, 0.5]`
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}
