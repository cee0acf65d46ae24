//! Cell clipping and vertex interning

use glam::DVec2;
use std::collections::HashMap;

use super::VertexId;

/// Clip a convex ring to the half-plane closer to `site` than to `other`
///
/// Sutherland-Hodgman against the perpendicular bisector of the two sites.
/// Points within `tolerance` (in distance units) of the bisector count as
/// inside, so a bisector grazing a corner leaves the ring untouched.
pub(crate) fn clip_to_bisector(
    ring: &[DVec2],
    site: DVec2,
    other: DVec2,
    tolerance: f64,
) -> Vec<DVec2> {
    let normal = other - site;
    let midpoint = (site + other) * 0.5;
    let slack = tolerance * normal.length();
    let signed_distance = |point: DVec2| (point - midpoint).dot(normal);

    let mut clipped = Vec::with_capacity(ring.len() + 1);
    for (i, &current) in ring.iter().enumerate() {
        let previous = ring[(i + ring.len() - 1) % ring.len()];
        let d_current = signed_distance(current);
        let d_previous = signed_distance(previous);
        let current_inside = d_current <= slack;
        let previous_inside = d_previous <= slack;

        if current_inside {
            if !previous_inside {
                clipped.push(crossing(previous, current, d_previous, d_current));
            }
            clipped.push(current);
        } else if previous_inside {
            clipped.push(crossing(previous, current, d_previous, d_current));
        }
    }
    clipped
}

/// Point where segment `a -> b` crosses the clip line
fn crossing(a: DVec2, b: DVec2, d_a: f64, d_b: f64) -> DVec2 {
    let t = (d_a / (d_a - d_b)).clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Assigns one [`VertexId`] per distinct position
///
/// Positions closer than `tolerance` share an id, which makes the vertex
/// where several cells meet a single handle even when each cell computed it
/// along a different route. The first position seen for an id is kept.
pub(crate) struct VertexInterner {
    tolerance: f64,
    positions: Vec<DVec2>,
    grid: HashMap<(i64, i64), Vec<VertexId>>,
}

impl VertexInterner {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            positions: Vec::new(),
            grid: HashMap::new(),
        }
    }

    pub fn intern(&mut self, position: DVec2) -> VertexId {
        let (cx, cy) = self.grid_cell(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.grid.get(&(cx.saturating_add(dx), cy.saturating_add(dy))) {
                    for &id in ids {
                        if self.positions[id.index()].distance(position) <= self.tolerance {
                            return id;
                        }
                    }
                }
            }
        }

        let id = VertexId(self.positions.len());
        self.positions.push(position);
        self.grid.entry((cx, cy)).or_default().push(id);
        id
    }

    /// Intern every vertex of a ring and drop repeated ids
    ///
    /// Returns an empty ring when fewer than 3 distinct vertices remain.
    pub fn intern_ring(&mut self, ring: &[DVec2]) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = Vec::with_capacity(ring.len());
        for &position in ring {
            let id = self.intern(position);
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        while ids.len() > 1 && ids.first() == ids.last() {
            ids.pop();
        }
        if ids.len() < 3 {
            ids.clear();
        }
        ids
    }

    #[inline]
    pub fn position(&self, id: VertexId) -> DVec2 {
        self.positions[id.index()]
    }

    pub fn into_positions(self) -> Vec<DVec2> {
        self.positions
    }

    fn grid_cell(&self, position: DVec2) -> (i64, i64) {
        (
            (position.x / self.tolerance).floor() as i64,
            (position.y / self.tolerance).floor() as i64,
        )
    }
}
