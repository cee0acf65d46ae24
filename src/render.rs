//! Engine-agnostic 2D rendering data
//!
//! Projects map coordinates onto a pixel canvas whose origin sits in the top
//! left corner, and packages a mesh as circles and path strings that any
//! drawing backend (SVG, canvas, immediate-mode UI) can consume directly.

use glam::DVec2;
use std::fmt::Write;

use crate::error::{MeshError, Result};
use crate::extent::Extent;
use crate::mesh::Mesh;

/// Marker radius as a fraction of the canvas width, for a single point
const MARKER_RADIUS_FRACTION: f64 = 0.1;

/// Maps extent coordinates to canvas pixels
///
/// The extent center lands in the middle of the canvas:
/// `px = (x / w + 0.5) * W`, `py = (y / h + 0.5) * H`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasProjection {
    extent: Extent,
    width: f64,
    height: f64,
}

impl CanvasProjection {
    /// Create a projection onto a `width x height` pixel canvas
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless both canvas sides are finite and positive
    pub fn new(extent: Extent, width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MeshError::InvalidConfig(format!(
                "canvas must be finite and positive (got {} x {})",
                width, height
            )));
        }
        Ok(Self {
            extent,
            width,
            height,
        })
    }

    /// Square 1000 px canvas
    pub fn square(extent: Extent) -> Self {
        Self {
            extent,
            width: 1000.0,
            height: 1000.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Project a map position to canvas pixels
    #[inline]
    pub fn project(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            (point.x / self.extent.width() + 0.5) * self.width,
            (point.y / self.extent.height() + 0.5) * self.height,
        )
    }

    /// Radius of a point marker when `count` points are drawn
    ///
    /// Shrinks with `1/sqrt(count)` so the markers cover roughly the same
    /// share of the canvas regardless of density.
    pub fn marker_radius(&self, count: usize) -> f64 {
        MARKER_RADIUS_FRACTION * self.width / (count.max(1) as f64).sqrt()
    }

    /// Build a path string through the projected points
    ///
    /// Starts with a move to the first point, then draws a line to each
    /// following one: `M x y L x y ...`. An empty input gives an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map_mesh::{render::CanvasProjection, Extent, DVec2};
    ///
    /// let projection = CanvasProjection::square(Extent::default());
    /// let path = projection.path_data(&[DVec2::new(-0.5, -0.5), DVec2::ZERO]);
    /// assert_eq!(path, "M 0.000 0.000 L 500.000 500.000");
    /// ```
    pub fn path_data(&self, points: &[DVec2]) -> String {
        let mut path = String::new();
        for (i, point) in points.iter().enumerate() {
            let p = self.project(*point);
            let command = if i == 0 { "M" } else { " L" };
            // writing into a String cannot fail
            let _ = write!(path, "{} {:.3} {:.3}", command, p.x, p.y);
        }
        path
    }
}

/// One projected mesh edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    /// SVG-style path data
    pub data: String,
    /// Edge lies on the map boundary
    pub boundary: bool,
}

/// Projected mesh, ready to draw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    /// Canvas size in pixels
    pub width: f64,
    pub height: f64,
    /// Projected sites
    pub points: Vec<DVec2>,
    /// Projected mesh vertices
    pub vertices: Vec<DVec2>,
    /// One path per mesh edge, in edge order
    pub edges: Vec<EdgePath>,
    /// Radius for site markers
    pub marker_radius: f64,
}

impl RenderData {
    /// Project every site, vertex and edge of a mesh
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map_mesh::*;
    /// use voronoi_map_mesh::render::{CanvasProjection, RenderData};
    ///
    /// let mesh = generate_good_mesh(64, &Extent::default(), 1, &VoronoiTessellator::default())
    ///     .unwrap();
    /// let data = RenderData::from_mesh(&mesh, &CanvasProjection::square(*mesh.extent()));
    ///
    /// assert_eq!(data.edges.len(), mesh.edge_count());
    /// assert!(data.to_svg().starts_with("<svg"));
    /// ```
    pub fn from_mesh(mesh: &Mesh, projection: &CanvasProjection) -> Self {
        let points = mesh
            .points()
            .iter()
            .map(|p| projection.project(*p))
            .collect();
        let vertices = mesh
            .vertices()
            .iter()
            .map(|v| projection.project(*v))
            .collect();
        let edges = mesh
            .edges()
            .iter()
            .map(|edge| EdgePath {
                data: projection.path_data(&[mesh.vertices()[edge.a], mesh.vertices()[edge.b]]),
                boundary: edge.is_boundary(),
            })
            .collect();

        Self {
            width: projection.width(),
            height: projection.height(),
            points,
            vertices,
            edges,
            marker_radius: projection.marker_radius(mesh.points().len()),
        }
    }

    /// Render as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}"
     xmlns="http://www.w3.org/2000/svg">
  <style>
    .edge {{ fill: none; stroke: #333333; stroke-width: 1; }}
    .boundary {{ fill: none; stroke: #999999; stroke-width: 1; }}
    .site {{ fill: #3366cc; }}
  </style>
"#,
            w = self.width,
            h = self.height,
        );

        for edge in &self.edges {
            let class = if edge.boundary { "boundary" } else { "edge" };
            let _ = writeln!(svg, r#"  <path d="{}" class="{}" />"#, edge.data, class);
        }
        for point in &self.points {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" class="site" />"#,
                point.x, point.y, self.marker_radius
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}
