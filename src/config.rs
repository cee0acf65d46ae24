//! Mesh generation configuration and builder
//!
//! A [`MeshConfig`] is a small value that fully determines a generated mesh:
//! the same configuration always yields the same points, vertices and edges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};
use crate::extent::Extent;

/// Largest number of relaxation passes accepted by the builder
pub const MAX_IMPROVEMENTS: usize = 20;

/// Largest number of sites accepted by the builder
pub const MAX_POINT_COUNT: usize = 1_000_000;

/// Default number of sites
pub const DEFAULT_POINT_COUNT: usize = 4096;

/// Configuration for deterministic mesh generation
///
/// The extent is stored as plain `width` and `height` and validated again by
/// [`MeshConfig::extent`], so a deserialized configuration cannot smuggle in
/// a malformed extent.
///
/// # Example
///
/// ```rust
/// use voronoi_map_mesh::*;
///
/// let config = MeshConfigBuilder::new()
///     .seed(42)
///     .extent(2.0, 1.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: MeshConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Seed for the initial point sample
    pub seed: u32,

    /// Number of sites to generate
    pub point_count: usize,

    /// Number of Lloyd's relaxation passes
    ///
    /// - 0: raw random sites (clumpy)
    /// - 1: evenly spaced but still irregular (default)
    /// - 5+: close to a regular honeycomb
    pub improvements: usize,

    /// Map width, centered on the origin
    pub width: f64,

    /// Map height, centered on the origin
    pub height: f64,
}

impl MeshConfig {
    /// Get the validated extent of this configuration
    #[inline]
    pub fn extent(&self) -> Result<Extent> {
        Extent::new(self.width, self.height)
    }
}

impl Default for MeshConfig {
    /// Default settings with a random seed
    fn default() -> Self {
        Self {
            seed: rand::random(),
            point_count: DEFAULT_POINT_COUNT,
            improvements: 1,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Builder for creating a [`MeshConfig`] with validation
///
/// # Example
///
/// ```rust
/// use voronoi_map_mesh::*;
///
/// // Use defaults
/// let config = MeshConfigBuilder::new().build().unwrap();
/// assert_eq!(config.improvements, 1);
///
/// // Customize
/// let config = MeshConfigBuilder::new()
///     .seed(12345)
///     .point_count(1024)
///     .unwrap()
///     .improvements(3)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.point_count, 1024);
/// ```
#[derive(Debug, Clone)]
pub struct MeshConfigBuilder {
    seed: Option<u32>,
    point_count: usize,
    improvements: usize,
    width: f64,
    height: f64,
}

impl MeshConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - point_count: 4096
    /// - improvements: 1
    /// - extent: 1 x 1
    pub fn new() -> Self {
        Self {
            seed: None,
            point_count: DEFAULT_POINT_COUNT,
            improvements: 1,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Set the seed for point sampling
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count` exceeds [`MAX_POINT_COUNT`]
    pub fn point_count(mut self, count: usize) -> Result<Self> {
        if count > MAX_POINT_COUNT {
            return Err(MeshError::InvalidConfig(format!(
                "point count must be <= {} (got {})",
                MAX_POINT_COUNT, count
            )));
        }
        self.point_count = count;
        Ok(self)
    }

    /// Set the number of relaxation passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `improvements` exceeds [`MAX_IMPROVEMENTS`]
    pub fn improvements(mut self, improvements: usize) -> Result<Self> {
        if improvements > MAX_IMPROVEMENTS {
            return Err(MeshError::InvalidConfig(format!(
                "improvements must be <= {} (got {})",
                MAX_IMPROVEMENTS, improvements
            )));
        }
        self.improvements = improvements;
        Ok(self)
    }

    /// Set the map size
    ///
    /// # Errors
    ///
    /// Returns `InvalidExtent` unless both sides are finite and positive
    pub fn extent(mut self, width: f64, height: f64) -> Result<Self> {
        let extent = Extent::new(width, height)?;
        self.width = extent.width();
        self.height = extent.height();
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    pub fn build(self) -> Result<MeshConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(MeshConfig {
            seed,
            point_count: self.point_count,
            improvements: self.improvements,
            width: self.width,
            height: self.height,
        })
    }
}

impl Default for MeshConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
