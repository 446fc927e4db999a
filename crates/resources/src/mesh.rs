//! Generated meshes and their draw parameters.

use glam::{Vec2, Vec3};

use crate::error::GeometryResult;
use crate::geometry::{self, Geometry, Topology};
use crate::vertex::Vertex;

/// Vertex data, optional index data and the topology needed to draw them.
///
/// A mesh is treated as immutable once generated. The `gen_*` methods
/// [`clear`](Mesh::clear) before generating, so a failed or repeated
/// generation never leaves stale geometry behind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    topology: Topology,
}

/// Everything a renderer needs for one draw call.
#[derive(Clone, Copy, Debug)]
pub struct DrawCall<'a> {
    /// How vertices (or indices) form triangles.
    pub topology: Topology,
    /// Vertex data.
    pub vertices: &'a [Vertex],
    /// Index data, present only for indexed topologies.
    pub indices: Option<&'a [u32]>,
}

impl DrawCall<'_> {
    /// Number of vertices to bind.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices to draw, zero when not indexed.
    pub fn index_count(&self) -> usize {
        self.indices.map_or(0, <[u32]>::len)
    }

    /// Number of triangles the draw produces.
    pub fn triangle_count(&self) -> usize {
        self.topology
            .triangle_count(self.vertex_count(), self.index_count())
    }

    /// Vertex data as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }
}

impl From<Geometry> for Mesh {
    fn from(geometry: Geometry) -> Self {
        Self {
            vertices: geometry.vertices,
            indices: geometry.indices,
            topology: geometry.topology,
        }
    }
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a sphere strip. See [`geometry::sphere`].
    pub fn sphere(radius: Vec3, offset: Vec3, rings: u32, segments: u32) -> GeometryResult<Self> {
        geometry::sphere(radius, offset, rings, segments).map(Self::from)
    }

    /// Generate a box. See [`geometry::cube`].
    pub fn cube(size: Vec3, offset: Vec3) -> Self {
        geometry::cube(size, offset).into()
    }

    /// Generate a quad. See [`geometry::quad`].
    pub fn quad(size: Vec2, offset: Vec3) -> Self {
        geometry::quad(size, offset).into()
    }

    /// Generate a torus. See [`geometry::torus`].
    pub fn torus(segments: u32, radius: f32, fatness: f32) -> GeometryResult<Self> {
        geometry::torus(segments, radius, fatness).map(Self::from)
    }

    /// Generate a trefoil knot. See [`geometry::knot`].
    pub fn knot(slices: u32, stacks: u32, radius: f32) -> GeometryResult<Self> {
        geometry::knot(slices, stacks, radius).map(Self::from)
    }

    /// Discard all vertex and index data.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.topology = Topology::default();
    }

    /// Regenerate as a sphere strip.
    pub fn gen_sphere(
        &mut self,
        radius: Vec3,
        offset: Vec3,
        rings: u32,
        segments: u32,
    ) -> GeometryResult<()> {
        self.clear();
        self.set_geometry(geometry::sphere(radius, offset, rings, segments)?);
        Ok(())
    }

    /// Regenerate as a box.
    pub fn gen_cube(&mut self, size: Vec3, offset: Vec3) {
        self.clear();
        self.set_geometry(geometry::cube(size, offset));
    }

    /// Regenerate as a quad.
    pub fn gen_quad(&mut self, size: Vec2, offset: Vec3) {
        self.clear();
        self.set_geometry(geometry::quad(size, offset));
    }

    /// Regenerate as a torus.
    pub fn gen_torus(&mut self, segments: u32, radius: f32, fatness: f32) -> GeometryResult<()> {
        self.clear();
        self.set_geometry(geometry::torus(segments, radius, fatness)?);
        Ok(())
    }

    /// Regenerate as a trefoil knot.
    pub fn gen_knot(&mut self, slices: u32, stacks: u32, radius: f32) -> GeometryResult<()> {
        self.clear();
        self.set_geometry(geometry::knot(slices, stacks, radius)?);
        Ok(())
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        *self = geometry.into();
    }

    /// Vertex data.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Index data, `None` unless the topology is indexed.
    pub fn indices(&self) -> Option<&[u32]> {
        self.topology.is_indexed().then_some(self.indices.as_slice())
    }

    /// Number of indices, zero when not indexed.
    pub fn index_count(&self) -> usize {
        self.indices().map_or(0, <[u32]>::len)
    }

    /// Topology tag.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Whether the mesh holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounds of all vertex positions, `None` when empty.
    pub fn aabb(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.min(v.position), max.max(v.position))
        }))
    }

    /// Parameters for a single draw call.
    pub fn draw_call(&self) -> DrawCall<'_> {
        DrawCall {
            topology: self.topology,
            vertices: &self.vertices,
            indices: self.indices(),
        }
    }
}
