//! Structural properties of generated meshes over random seeds and extents

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use std::cell::Cell;

use voronoi_map_mesh::generation::generate_sorted_points;
use voronoi_map_mesh::queries::{is_boundary_vertex, unique_neighbors};
use voronoi_map_mesh::*;

fn shoelace_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| ring[i].perp_dot(ring[(i + 1) % n]))
        .sum::<f64>()
        .abs()
        / 2.0
}

fn extent_strategy() -> impl Strategy<Value = Extent> {
    (0.5f64..4.0, 0.5f64..4.0).prop_map(|(w, h)| Extent::new(w, h).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn adjacency_is_symmetric(
        seed in any::<u32>(),
        count in 1usize..200,
        extent in extent_strategy(),
    ) {
        let tessellator = VoronoiTessellator::default();
        let mesh = generate_good_mesh(count, &extent, seed, &tessellator).unwrap();

        for (i, list) in mesh.adjacency().iter().enumerate() {
            for &j in list {
                prop_assert!(j < mesh.vertex_count());
                let forward = list.iter().filter(|&&k| k == j).count();
                let backward = mesh.adjacency()[j].iter().filter(|&&k| k == i).count();
                prop_assert_eq!(forward, backward);
            }
        }
    }

    #[test]
    fn edges_match_adjacency(
        seed in any::<u32>(),
        count in 1usize..200,
        extent in extent_strategy(),
    ) {
        let tessellator = VoronoiTessellator::default();
        let mesh = generate_good_mesh(count, &extent, seed, &tessellator).unwrap();

        let degree_sum: usize = mesh.adjacency().iter().map(Vec::len).sum();
        prop_assert_eq!(mesh.edge_count() * 2, degree_sum);
        prop_assert_eq!(mesh.neighbor_sites().len(), mesh.vertex_count());

        for edge in mesh.edges() {
            prop_assert!(edge.a < mesh.vertex_count());
            prop_assert!(edge.b < mesh.vertex_count());
            prop_assert_ne!(edge.a, edge.b);
            prop_assert!(mesh.adjacency()[edge.a].contains(&edge.b));
            prop_assert!(mesh.points().contains(&edge.left));
            if let Some(right) = edge.right {
                prop_assert!(mesh.points().contains(&right));
            }
        }
    }

    #[test]
    fn boundary_vertices_lie_on_the_extent_border(seed in any::<u32>(), count in 2usize..200) {
        let extent = Extent::new(2.0, 1.0).unwrap();
        let tessellator = VoronoiTessellator::default();
        let mesh = generate_good_mesh(count, &extent, seed, &tessellator).unwrap();
        let eps = 1e-9;

        for (i, v) in mesh.vertices().iter().enumerate() {
            prop_assert!(v.x.abs() <= extent.half_width() + eps);
            prop_assert!(v.y.abs() <= extent.half_height() + eps);

            if is_boundary_vertex(&mesh, i).unwrap() {
                let on_border = (v.x.abs() - extent.half_width()).abs() < eps
                    || (v.y.abs() - extent.half_height()).abs() < eps;
                prop_assert!(on_border, "boundary vertex {} at {:?} is interior", i, v);
                prop_assert!(unique_neighbors(&mesh, i).unwrap().len() >= 2);
            }
        }
    }

    #[test]
    fn cells_tile_the_extent(
        seed in any::<u32>(),
        count in 1usize..200,
        extent in extent_strategy(),
    ) {
        let points = generate_sorted_points(count, &extent, seed);
        let tessellation = VoronoiTessellator::default().tessellate(&points, &extent).unwrap();

        let area: f64 = tessellation.polygons().iter().map(|ring| shoelace_area(ring)).sum();
        assert_relative_eq!(area, extent.width() * extent.height(), max_relative = 1e-9);
    }

    #[test]
    fn generation_is_deterministic(seed in any::<u32>(), count in 0usize..150) {
        let extent = Extent::default();
        let a = generate_good_mesh(count, &extent, seed, &VoronoiTessellator::default()).unwrap();
        let b = generate_good_mesh(count, &extent, seed, &VoronoiTessellator::default()).unwrap();

        prop_assert_eq!(a.points(), b.points());
        prop_assert_eq!(a.vertices(), b.vertices());
        prop_assert_eq!(a.adjacency(), b.adjacency());
        prop_assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn relaxation_evens_out_spacing(seed in any::<u32>(), count in 100usize..300) {
        let extent = Extent::default();
        let raw = generate_sorted_points(count, &extent, seed);
        let tessellator = VoronoiTessellator::default();
        let relaxed = improve_points(raw.clone(), 1, &extent, &tessellator).unwrap();

        let before = SpacingStats::measure(&raw).unwrap();
        let after = SpacingStats::measure(&relaxed).unwrap();
        prop_assert!(
            after.variance <= before.variance,
            "spacing variance grew: {:?} -> {:?}", before, after
        );
        prop_assert!(
            after.coefficient_of_variation() < before.coefficient_of_variation(),
            "spacing got less even: {:?} -> {:?}", before, after
        );
    }
}

struct CountingTessellator {
    calls: Cell<usize>,
}

impl Tessellator for CountingTessellator {
    fn tessellate(&self, points: &[DVec2], extent: &Extent) -> Result<Tessellation> {
        self.calls.set(self.calls.get() + 1);
        VoronoiTessellator::default().tessellate(points, extent)
    }
}

#[test]
fn good_mesh_uses_two_tessellation_passes() {
    let tessellator = CountingTessellator { calls: Cell::new(0) };
    generate_good_mesh(500, &Extent::default(), 1234, &tessellator).unwrap();
    assert_eq!(tessellator.calls.get(), 2);
}

#[test]
fn four_sites_on_a_square_map() {
    let extent = Extent::new(2.0, 2.0).unwrap();
    let sites = vec![
        DVec2::new(-1.0, -1.0),
        DVec2::new(-1.0, 1.0),
        DVec2::new(1.0, -1.0),
        DVec2::new(1.0, 1.0),
    ];

    let relaxed = improve_points(sites, 1, &extent, &VoronoiTessellator::default()).unwrap();
    let expected = [(-0.5, -0.5), (-0.5, 0.5), (0.5, -0.5), (0.5, 0.5)];
    for (p, (x, y)) in relaxed.iter().zip(expected) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-12);
    }

    let mesh = build_mesh(relaxed, &extent, &VoronoiTessellator::default()).unwrap();
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.edge_count(), 12);

    let mut degrees: Vec<usize> = (0..mesh.vertex_count())
        .map(|i| unique_neighbors(&mesh, i).unwrap().len())
        .collect();
    degrees.sort_unstable();
    assert_eq!(degrees, vec![2, 2, 2, 2, 3, 3, 3, 3, 4]);

    let boundary = (0..mesh.vertex_count())
        .filter(|&i| is_boundary_vertex(&mesh, i).unwrap())
        .count();
    assert_eq!(boundary, 4);
}

#[test]
fn degenerate_extent_is_rejected() {
    let config = MeshConfig {
        width: f64::NAN,
        ..MeshConfig::default()
    };
    assert!(matches!(
        generate_mesh(&config),
        Err(MeshError::InvalidExtent { .. })
    ));
}

#[cfg(feature = "spatial-index")]
#[test]
fn nearest_vertex_matches_brute_force() {
    let mesh =
        generate_good_mesh(300, &Extent::default(), 99, &VoronoiTessellator::default()).unwrap();

    for query in generate_sorted_points(50, &Extent::default(), 5) {
        let found = mesh.nearest_vertex(query).unwrap();
        let best = mesh
            .vertices()
            .iter()
            .map(|v| v.distance_squared(query))
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(mesh.vertices()[found].distance_squared(query), best);
    }
}
