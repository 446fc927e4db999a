//! Vertex data structures.
//!
//! # Memory Layout
//!
//! [`Vertex`] uses `#[repr(C)]` so a renderer can describe it with fixed
//! attribute offsets:
//! - Offset 0: position (12 bytes)
//! - Offset 12: normal (12 bytes)
//! - Offset 24: tex_coord (8 bytes)
//! - Total size (stride): 32 bytes

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Vertex record produced by every geometry generator.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in object space.
    pub position: Vec3,
    /// Outward-facing unit normal.
    pub normal: Vec3,
    /// Texture coordinates (UV).
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Byte offset of `position`.
    pub const POSITION_OFFSET: usize = 0;
    /// Byte offset of `normal`.
    pub const NORMAL_OFFSET: usize = 12;
    /// Byte offset of `tex_coord`.
    pub const TEX_COORD_OFFSET: usize = 24;

    /// Creates a new vertex with the specified attributes.
    #[inline]
    pub const fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }

    /// Number of bytes between consecutive vertices.
    #[inline]
    pub const fn stride() -> usize {
        std::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        // Vec3 (12) + Vec3 (12) + Vec2 (8) = 32 bytes
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(Vertex::stride(), 32);
    }

    #[test]
    fn test_vertex_offsets() {
        use std::mem::offset_of;

        assert_eq!(offset_of!(Vertex, position), Vertex::POSITION_OFFSET);
        assert_eq!(offset_of!(Vertex, normal), Vertex::NORMAL_OFFSET);
        assert_eq!(offset_of!(Vertex, tex_coord), Vertex::TEX_COORD_OFFSET);
    }

    #[test]
    fn test_vertex_as_bytes() {
        let vertices = [
            Vertex::new(Vec3::X, Vec3::Y, Vec2::new(0.5, 0.25)),
            Vertex::default(),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 64);

        let back: &[Vertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back[0].tex_coord, Vec2::new(0.5, 0.25));
    }
}
