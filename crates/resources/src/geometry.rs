//! Procedural geometry generators.
//!
//! Every generator is a pure function of its parameters and returns a
//! [`Geometry`]: a vertex sequence, an index sequence (empty unless the
//! topology is indexed) and the [`Topology`] tag a renderer needs to issue
//! the draw call.
//!
//! | Primitive | Topology |
//! |-----------|----------|
//! | [`sphere`] | triangle strip, no index |
//! | [`cube`] | indexed triangle list |
//! | [`quad`] | triangle list, no index |
//! | [`torus`] / [`torus_with`] | indexed triangle list |
//! | [`knot`] | indexed triangle list |
//!
//! Normals are outward-facing unit vectors and triangles wind
//! counter-clockwise when seen from outside. Texture coordinates lie in
//! `[0, 1] x [0, 1]`.
//!
//! Tessellation counts below [`MIN_TESSELLATION`] are rejected with
//! [`GeometryError::DegenerateTessellation`].

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::vertex::Vertex;

/// Smallest ring/segment/slice/stack count that yields a closed surface.
pub const MIN_TESSELLATION: u32 = 3;

// Trefoil curve shape: r(u) = A + B cos(1.5u), z(u) = C sin(1.5u).
const TREFOIL_A: f32 = 0.5;
const TREFOIL_B: f32 = 0.3;
const TREFOIL_C: f32 = 0.5;
// Tube radius of the swept cross-section, before scaling.
const TREFOIL_TUBE: f32 = 0.1;
// Curve parameter step for the finite-difference tangent.
const TREFOIL_STEP: f32 = 1.0e-3;

/// How a vertex sequence is assembled into triangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Each vertex forms a triangle with the previous two. No index buffer.
    TriangleStrip,
    /// Every three vertices form a triangle. No index buffer.
    #[default]
    TriangleList,
    /// Every three indices form a triangle.
    IndexedTriangleList,
}

impl Topology {
    /// Whether draws with this topology read an index buffer.
    pub fn is_indexed(self) -> bool {
        matches!(self, Topology::IndexedTriangleList)
    }

    /// Number of triangles assembled from the given counts.
    ///
    /// Strip counts include the degenerate triangles used to stitch bands.
    pub fn triangle_count(self, vertex_count: usize, index_count: usize) -> usize {
        match self {
            Topology::TriangleStrip => vertex_count.saturating_sub(2),
            Topology::TriangleList => vertex_count / 3,
            Topology::IndexedTriangleList => index_count / 3,
        }
    }
}

/// Output of a geometry generator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Generated vertices.
    pub vertices: Vec<Vertex>,
    /// Generated indices, empty for non-indexed topologies.
    pub indices: Vec<u32>,
    /// How the vertices (or indices) form triangles.
    pub topology: Topology,
}

impl Geometry {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles the topology assembles.
    pub fn triangle_count(&self) -> usize {
        self.topology
            .triangle_count(self.vertices.len(), self.indices.len())
    }
}

fn check_count(parameter: &'static str, value: u32) -> GeometryResult<()> {
    if value < MIN_TESSELLATION {
        return Err(GeometryError::DegenerateTessellation {
            parameter,
            value,
            minimum: MIN_TESSELLATION,
        });
    }
    Ok(())
}

/// Vertex count of a sphere strip with the given tessellation.
///
/// Each of the `rings` bands emits two vertices per slice boundary.
pub const fn sphere_vertex_count(rings: u32, segments: u32) -> usize {
    2 * rings as usize * (segments as usize + 1)
}

/// Generate a sphere (an ellipsoid when `radius` is not uniform) as a single
/// triangle strip.
///
/// Bands run from the +Y pole to the -Y pole. Each band emits the upper and
/// lower vertex of every slice boundary, the first and last boundary
/// coinciding, so the hop from one band to the next produces two
/// zero-area triangles instead of needing extra vertices. Pole vertices
/// coincide the same way.
///
/// # Arguments
/// * `radius` - per-axis radius
/// * `offset` - translation added to every position
/// * `rings` - number of horizontal bands
/// * `segments` - number of vertical slices per band
pub fn sphere(radius: Vec3, offset: Vec3, rings: u32, segments: u32) -> GeometryResult<Geometry> {
    check_count("rings", rings)?;
    check_count("segments", segments)?;

    let mut vertices = Vec::with_capacity(sphere_vertex_count(rings, segments));
    for ring in 0..rings {
        for segment in 0..=segments {
            vertices.push(sphere_vertex(radius, offset, ring, rings, segment, segments));
            vertices.push(sphere_vertex(radius, offset, ring + 1, rings, segment, segments));
        }
    }

    debug!(
        "Generated sphere: {} rings, {} segments, {} vertices",
        rings,
        segments,
        vertices.len()
    );

    Ok(Geometry {
        vertices,
        indices: Vec::new(),
        topology: Topology::TriangleStrip,
    })
}

fn sphere_vertex(
    radius: Vec3,
    offset: Vec3,
    ring: u32,
    rings: u32,
    segment: u32,
    segments: u32,
) -> Vertex {
    let v = ring as f32 / rings as f32;
    let u = segment as f32 / segments as f32;
    let (sin_phi, cos_phi) = (v * PI).sin_cos();
    let (sin_theta, cos_theta) = (u * TAU).sin_cos();

    // Longitude runs clockwise seen from +Y so the strip winds outward.
    let dir = Vec3::new(sin_phi * cos_theta, cos_phi, -sin_phi * sin_theta);

    Vertex::new(
        offset + dir * radius,
        (dir / radius).normalize(),
        Vec2::new(u, v),
    )
}

// Per face: outward normal, then the in-plane axes u and v with u x v = normal.
const CUBE_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

// Face corners as (u sign, v sign, texture coordinate), counter-clockwise.
const FACE_CORNERS: [(f32, f32, Vec2); 4] = [
    (-1.0, -1.0, Vec2::new(0.0, 1.0)),
    (1.0, -1.0, Vec2::new(1.0, 1.0)),
    (1.0, 1.0, Vec2::new(1.0, 0.0)),
    (-1.0, 1.0, Vec2::new(0.0, 0.0)),
];

/// Generate an axis-aligned box as an indexed triangle list.
///
/// Each face has its own four vertices so normals are not shared across
/// faces: 24 vertices and 36 indices.
///
/// # Arguments
/// * `size` - full edge lengths along x, y and z
/// * `offset` - translation added to every position
pub fn cube(size: Vec3, offset: Vec3) -> Geometry {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in CUBE_FACES {
        let base = vertices.len() as u32;
        for (su, sv, tex_coord) in FACE_CORNERS {
            let corner = normal + u * su + v * sv;
            vertices.push(Vertex::new(offset + corner * half, normal, tex_coord));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    debug!("Generated cube: {} vertices, {} indices", vertices.len(), indices.len());

    Geometry {
        vertices,
        indices,
        topology: Topology::IndexedTriangleList,
    }
}

/// Generate a front-facing quad in the XY plane as a plain triangle list.
///
/// Two triangles, six vertices, all with normal +Z.
///
/// # Arguments
/// * `size` - width and height
/// * `offset` - translation added to every position
pub fn quad(size: Vec2, offset: Vec3) -> Geometry {
    let half = size * 0.5;
    let corner = |i: usize| {
        let (su, sv, tex_coord) = FACE_CORNERS[i];
        let position = Vec3::new(su * half.x, sv * half.y, 0.0);
        Vertex::new(offset + position, Vec3::Z, tex_coord)
    };

    let vertices = [0, 1, 2, 2, 3, 0].into_iter().map(corner).collect();

    Geometry {
        vertices,
        indices: Vec::new(),
        topology: Topology::TriangleList,
    }
}

/// Generate a torus around the Z axis with `segments` rings and `segments`
/// tube sides.
///
/// See [`torus_with`].
pub fn torus(segments: u32, radius: f32, fatness: f32) -> GeometryResult<Geometry> {
    torus_with(segments, segments, radius, fatness)
}

/// Generate a torus around the Z axis as an indexed triangle list.
///
/// The vertex grid is `rings x sides`, with no duplicated seam vertices: the
/// index buffer wraps both the last ring and the last side back to the
/// first, so every grid cell (including the seams) gets two triangles.
///
/// # Arguments
/// * `rings` - steps around the major circle
/// * `sides` - steps around the tube
/// * `radius` - major radius (center of the tube to the Z axis)
/// * `fatness` - minor radius (tube radius)
pub fn torus_with(rings: u32, sides: u32, radius: f32, fatness: f32) -> GeometryResult<Geometry> {
    check_count("rings", rings)?;
    check_count("sides", sides)?;

    let mut vertices = Vec::with_capacity(rings as usize * sides as usize);
    for ring in 0..rings {
        let u = ring as f32 / rings as f32;
        let (sin_u, cos_u) = (u * TAU).sin_cos();

        for side in 0..sides {
            let v = side as f32 / sides as f32;
            let (sin_v, cos_v) = (v * TAU).sin_cos();

            let normal = Vec3::new(cos_v * cos_u, cos_v * sin_u, sin_v);
            let center = Vec3::new(radius * cos_u, radius * sin_u, 0.0);
            vertices.push(Vertex::new(
                center + normal * fatness,
                normal,
                Vec2::new(u, v),
            ));
        }
    }

    let indices = wrapped_grid_indices(rings, sides);

    debug!(
        "Generated torus: {}x{}, {} vertices, {} indices",
        rings,
        sides,
        vertices.len(),
        indices.len()
    );

    Ok(Geometry {
        vertices,
        indices,
        topology: Topology::IndexedTriangleList,
    })
}

/// Point on the surface of the unit-scale trefoil knot tube.
///
/// `s` runs along the closed curve and `t` around the cross-section; both
/// wrap at 1.0.
pub fn evaluate_trefoil(s: f32, t: f32) -> Vec3 {
    let (center, normal, binormal) = trefoil_frame(s);
    let (sin_t, cos_t) = (t * TAU).sin_cos();
    center + (normal * cos_t + binormal * sin_t) * TREFOIL_TUBE
}

fn trefoil_curve(u: f32) -> Vec3 {
    let r = TREFOIL_A + TREFOIL_B * (1.5 * u).cos();
    Vec3::new(r * u.cos(), r * u.sin(), TREFOIL_C * (1.5 * u).sin())
}

// Center, normal and binormal of the cross-section at `s`. The tangent comes
// from a central difference; its xy projection never vanishes on this curve.
fn trefoil_frame(s: f32) -> (Vec3, Vec3, Vec3) {
    let u = (1.0 - s) * 2.0 * TAU;
    let center = trefoil_curve(u);
    let tangent = (trefoil_curve(u + TREFOIL_STEP) - trefoil_curve(u - TREFOIL_STEP)).normalize();
    let normal = Vec3::new(tangent.y, -tangent.x, 0.0).normalize();
    let binormal = tangent.cross(normal);
    (center, normal, binormal)
}

/// Generate a trefoil knot tube as an indexed triangle list.
///
/// `slices` cross-sections are placed along the closed curve, each with
/// `stacks` points. Normals point from the tube axis to the surface. The
/// index buffer wraps along the curve and around the tube.
///
/// # Arguments
/// * `slices` - steps along the curve
/// * `stacks` - steps around the tube
/// * `radius` - uniform scale of the whole knot (curve and tube)
pub fn knot(slices: u32, stacks: u32, radius: f32) -> GeometryResult<Geometry> {
    check_count("slices", slices)?;
    check_count("stacks", stacks)?;

    let mut vertices = Vec::with_capacity(slices as usize * stacks as usize);
    for slice in 0..slices {
        let s = slice as f32 / slices as f32;
        let (center, normal, binormal) = trefoil_frame(s);

        for stack in 0..stacks {
            let t = stack as f32 / stacks as f32;
            let (sin_t, cos_t) = (t * TAU).sin_cos();
            let dir = normal * cos_t + binormal * sin_t;

            vertices.push(Vertex::new(
                (center + dir * TREFOIL_TUBE) * radius,
                dir,
                Vec2::new(s, t),
            ));
        }
    }

    let indices = wrapped_grid_indices(slices, stacks);

    debug!(
        "Generated trefoil knot: {}x{}, {} vertices, {} indices",
        slices,
        stacks,
        vertices.len(),
        indices.len()
    );

    Ok(Geometry {
        vertices,
        indices,
        topology: Topology::IndexedTriangleList,
    })
}

/// Two triangles per cell of a `rows x cols` vertex grid (row-major),
/// wrapping the last row and column back to the first.
fn wrapped_grid_indices(rows: u32, cols: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(rows as usize * cols as usize * 6);
    for row in 0..rows {
        let next_row = (row + 1) % rows;
        for col in 0..cols {
            let next_col = (col + 1) % cols;

            let a = row * cols + col;
            let b = next_row * cols + col;
            let c = next_row * cols + next_col;
            let d = row * cols + next_col;

            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_rejects_small_counts() {
        let err = sphere(Vec3::ONE, Vec3::ZERO, 2, 24).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DegenerateTessellation {
                parameter: "rings",
                value: 2,
                minimum: MIN_TESSELLATION,
            }
        );

        assert!(sphere(Vec3::ONE, Vec3::ZERO, 24, 0).is_err());
        assert!(torus(2, 1.0, 0.25).is_err());
        assert!(torus_with(8, 1, 1.0, 0.25).is_err());
        assert!(knot(64, 2, 1.0).is_err());
        assert!(knot(0, 8, 1.0).is_err());
    }

    #[test]
    fn test_minimum_counts_accepted() {
        assert!(sphere(Vec3::ONE, Vec3::ZERO, 3, 3).is_ok());
        assert!(torus(3, 1.0, 0.25).is_ok());
        assert!(knot(3, 3, 1.0).is_ok());
    }

    #[test]
    fn test_sphere_poles_and_offset() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        let g = sphere(Vec3::splat(2.0), offset, 8, 8).unwrap();

        // First vertex is the north pole, last is the south pole.
        let first = g.vertices.first().unwrap();
        let last = g.vertices.last().unwrap();
        assert!(approx_eq_vec3(first.position, offset + Vec3::new(0.0, 2.0, 0.0)));
        assert!(approx_eq_vec3(first.normal, Vec3::Y));
        assert!(approx_eq_vec3(last.position, offset + Vec3::new(0.0, -2.0, 0.0)));
        assert!(approx_eq_vec3(last.normal, Vec3::NEG_Y));
    }

    #[test]
    fn test_sphere_ellipsoid_normals() {
        let radius = Vec3::new(3.0, 1.0, 0.5);
        let g = sphere(radius, Vec3::ZERO, 12, 12).unwrap();

        for v in &g.vertices {
            assert!(approx_eq(v.normal.length(), 1.0));
            // Gradient of the implicit surface points along p / r^2.
            let gradient = (v.position / (radius * radius)).normalize();
            assert!(approx_eq_vec3(v.normal, gradient));
        }
    }

    #[test]
    fn test_quad_layout() {
        let g = quad(Vec2::new(4.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(g.topology, Topology::TriangleList);
        assert_eq!(g.vertex_count(), 6);
        assert!(g.indices.is_empty());
        assert_eq!(g.triangle_count(), 2);

        for v in &g.vertices {
            assert_eq!(v.normal, Vec3::Z);
            assert_eq!(v.position.z, -1.0);
            assert!(v.position.x.abs() == 2.0 && v.position.y.abs() == 1.0);
        }

        // Both triangles wind counter-clockwise seen from +Z.
        for tri in g.vertices.chunks(3) {
            let n = (tri[1].position - tri[0].position).cross(tri[2].position - tri[0].position);
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn test_cube_winding_is_outward() {
        let g = cube(Vec3::ONE, Vec3::ZERO);
        for tri in g.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| g.vertices[tri[i] as usize]);
            let face = (b.position - a.position).cross(c.position - a.position);
            assert!(face.dot(a.normal) > 0.0);
        }
    }

    #[test]
    fn test_trefoil_is_closed() {
        for t in [0.0, 0.25, 0.6] {
            let start = evaluate_trefoil(0.0, t);
            let end = evaluate_trefoil(1.0, t);
            assert!((start - end).length() < 1e-3);
        }
    }

    #[test]
    fn test_knot_normals_are_radial() {
        let g = knot(32, 8, 2.0).unwrap();
        for (i, v) in g.vertices.iter().enumerate() {
            assert!(approx_eq(v.normal.length(), 1.0), "vertex {i}");
            assert!(v.tex_coord.x >= 0.0 && v.tex_coord.x <= 1.0);
            assert!(v.tex_coord.y >= 0.0 && v.tex_coord.y <= 1.0);
        }

        // Opposite points of one cross-section are a tube diameter apart.
        let a = g.vertices[0].position;
        let b = g.vertices[4].position;
        assert!(((a - b).length() - 2.0 * TREFOIL_TUBE * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_topology_triangle_counts() {
        assert_eq!(Topology::TriangleStrip.triangle_count(10, 0), 8);
        assert_eq!(Topology::TriangleStrip.triangle_count(1, 0), 0);
        assert_eq!(Topology::TriangleList.triangle_count(9, 0), 3);
        assert_eq!(Topology::IndexedTriangleList.triangle_count(4, 6), 2);
        assert!(Topology::IndexedTriangleList.is_indexed());
        assert!(!Topology::TriangleStrip.is_indexed());
    }
}
