//! Integration tests for the geometry generators.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use nodal_resources::geometry::{self, Topology};
use nodal_resources::{GeometryError, Mesh};

const EPSILON: f32 = 1e-5;

fn is_unit(v: Vec3) -> bool {
    (v.length() - 1.0).abs() < EPSILON
}

/// Every undirected edge of a closed triangle mesh is shared by exactly two
/// triangles. A gap at a seam leaves edges with a single triangle.
fn assert_watertight(indices: &[u32]) {
    let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in indices.chunks(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            *edges.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    for (edge, count) in edges {
        assert_eq!(count, 2, "edge {:?} used by {} triangles", edge, count);
    }
}

#[test]
fn test_sphere_vertex_count_and_normals() {
    let g = geometry::sphere(Vec3::ONE, Vec3::ZERO, 24, 24).unwrap();

    assert_eq!(g.topology, Topology::TriangleStrip);
    assert!(g.indices.is_empty());
    // 24 bands x 25 slice boundaries x 2 vertices
    assert_eq!(g.vertex_count(), 1200);
    assert_eq!(g.vertex_count(), geometry::sphere_vertex_count(24, 24));

    for (i, v) in g.vertices.iter().enumerate() {
        assert!(is_unit(v.normal), "normal {} has length {}", i, v.normal.length());
        assert!((0.0..=1.0).contains(&v.tex_coord.x));
        assert!((0.0..=1.0).contains(&v.tex_coord.y));
    }
}

#[test]
fn test_sphere_strip_faces_outward() {
    let g = geometry::sphere(Vec3::splat(3.0), Vec3::ZERO, 12, 16).unwrap();

    let mut visible = 0;
    for i in 0..g.vertex_count() - 2 {
        // Odd strip triangles swap their first two vertices.
        let (a, b) = if i % 2 == 0 { (i, i + 1) } else { (i + 1, i) };
        let (pa, pb, pc) = (
            g.vertices[a].position,
            g.vertices[b].position,
            g.vertices[i + 2].position,
        );
        let face = (pb - pa).cross(pc - pa);
        if face.length() < 1e-4 {
            // Pole and band-join triangles have no area.
            continue;
        }
        let centroid = (pa + pb + pc) / 3.0;
        assert!(face.dot(centroid) > 0.0, "strip triangle {} faces inward", i);
        visible += 1;
    }
    assert!(visible > 0);
}

#[test]
fn test_cube_layout() {
    let g = geometry::cube(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO);

    assert_eq!(g.topology, Topology::IndexedTriangleList);
    assert_eq!(g.vertex_count(), 24);
    assert_eq!(g.index_count(), 36);
    assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));

    let axes = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    for axis in axes {
        let count = g.vertices.iter().filter(|v| v.normal == axis).count();
        assert_eq!(count, 4, "normal {:?}", axis);
    }

    for v in &g.vertices {
        assert!(is_unit(v.normal));
        // Corners of a 2x2x2 box centered at the origin.
        assert_eq!(v.position.abs(), Vec3::ONE);
        // Each vertex lies on the face its normal names.
        assert_eq!(v.position.dot(v.normal), 1.0);
    }
}

#[test]
fn test_torus_indices_and_seams() {
    let segments = 16;
    let g = geometry::torus(segments, 1.0, 0.25).unwrap();

    assert_eq!(g.topology, Topology::IndexedTriangleList);
    assert_eq!(g.vertex_count(), (segments * segments) as usize);
    // Two triangles per grid cell, wrap-around cells included.
    assert_eq!(g.index_count(), (segments * segments * 6) as usize);
    assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    assert_watertight(&g.indices);

    for v in &g.vertices {
        assert!(is_unit(v.normal));
        // Distance from the tube's center circle equals the fatness.
        let center = Vec3::new(v.position.x, v.position.y, 0.0).normalize() * 1.0;
        assert!(((v.position - center).length() - 0.25).abs() < EPSILON);
    }
}

#[test]
fn test_torus_faces_outward() {
    let g = geometry::torus_with(24, 12, 2.0, 0.5).unwrap();
    assert_eq!(g.vertex_count(), 24 * 12);
    assert_watertight(&g.indices);

    for tri in g.indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| g.vertices[i as usize]);
        let face = (b.position - a.position).cross(c.position - a.position);
        let normal = a.normal + b.normal + c.normal;
        assert!(face.dot(normal) > 0.0);
    }
}

#[test]
fn test_knot_indices_and_seams() {
    let g = geometry::knot(96, 12, 1.5).unwrap();

    assert_eq!(g.topology, Topology::IndexedTriangleList);
    assert_eq!(g.vertex_count(), 96 * 12);
    assert_eq!(g.index_count(), 96 * 12 * 6);
    assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    assert_watertight(&g.indices);

    for v in &g.vertices {
        assert!(is_unit(v.normal));
    }

    // The last slice joins the first one without a gap.
    let first = g.vertices[0].position;
    let last = g.vertices[95 * 12].position;
    let step = g.vertices[12].position;
    assert!((last - first).length() < 2.0 * (step - first).length());
}

#[test]
fn test_knot_faces_outward() {
    let g = geometry::knot(128, 8, 1.0).unwrap();

    for tri in g.indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| g.vertices[i as usize]);
        let face = (b.position - a.position).cross(c.position - a.position);
        let normal = a.normal + b.normal + c.normal;
        assert!(face.dot(normal) > 0.0);
    }
}

#[test]
fn test_mesh_generation_errors() {
    let err = Mesh::sphere(Vec3::ONE, Vec3::ZERO, 24, 2).unwrap_err();
    assert!(matches!(
        err,
        GeometryError::DegenerateTessellation {
            parameter: "segments",
            value: 2,
            ..
        }
    ));
    assert!(err.to_string().contains("segments"));
}

#[test]
fn test_mesh_regeneration_clears_previous() {
    let mut mesh = Mesh::knot(64, 8, 1.0).unwrap();
    assert_eq!(mesh.index_count(), 64 * 8 * 6);

    mesh.gen_quad(Vec2::new(2.0, 2.0), Vec3::ZERO);
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.index_count(), 0);
    assert!(mesh.indices().is_none());
    assert_eq!(mesh.topology(), Topology::TriangleList);
}
