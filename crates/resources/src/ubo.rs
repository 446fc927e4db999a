//! Uniform block structures handed to the renderer.
//!
//! All structures use `#[repr(C)]` and implement `bytemuck::Pod` and
//! `bytemuck::Zeroable`, so a renderer can upload them as raw bytes.
//!
//! # Overview
//!
//! - [`CameraUbo`] holds the view and projection pair of the active camera
//! - [`ObjectUbo`] holds the per-node model and model-view-projection matrices
//! - [`MaterialUbo`] holds material colors for lighting
//!
//! # Example
//!
//! ```
//! use nodal_resources::ubo::{CameraUbo, ObjectUbo};
//! use glam::{Mat4, Vec3};
//!
//! let camera = CameraUbo::new(
//!     Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
//!     Mat4::perspective_rh_gl(45.0_f32.to_radians(), 16.0 / 9.0, 0.1, 100.0),
//!     Vec3::new(0.0, 0.0, 5.0),
//! );
//!
//! let object = ObjectUbo::new(Mat4::IDENTITY, camera.view_projection);
//!
//! let camera_bytes: &[u8] = bytemuck::bytes_of(&camera);
//! let object_bytes: &[u8] = bytemuck::bytes_of(&object);
//! assert_eq!(camera_bytes.len(), CameraUbo::size());
//! assert_eq!(object_bytes.len(), ObjectUbo::size());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::material::Material;

/// Camera uniform block.
///
/// # Memory Layout
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 64   | view |
/// | 64     | 64   | projection |
/// | 128    | 64   | view_projection |
/// | 192    | 12   | camera_position |
/// | 204    | 4    | _padding |
///
/// Total size: 208 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CameraUbo {
    /// View matrix (world space to camera space).
    pub view: Mat4,
    /// Projection matrix (camera space to clip space).
    pub projection: Mat4,
    /// `projection * view`.
    pub view_projection: Mat4,
    /// Camera position in world space.
    pub camera_position: Vec3,
    /// Padding to align structure to 16 bytes.
    pub _padding: f32,
}

impl CameraUbo {
    /// Creates a camera block; the view-projection matrix is derived.
    #[inline]
    pub fn new(view: Mat4, projection: Mat4, camera_position: Vec3) -> Self {
        Self {
            view,
            projection,
            view_projection: projection * view,
            camera_position,
            _padding: 0.0,
        }
    }

    /// Returns the size of this structure in bytes.
    #[inline]
    pub const fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

/// Per-object uniform block.
///
/// # Memory Layout
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 64   | model |
/// | 64     | 64   | model_view_projection |
/// | 128    | 64   | normal_matrix |
///
/// Total size: 192 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectUbo {
    /// Model matrix (object space to world space), the node's world matrix.
    pub model: Mat4,
    /// `projection * view * model`.
    pub model_view_projection: Mat4,
    /// Transpose of the inverse model matrix, for transforming normals.
    pub normal_matrix: Mat4,
}

impl ObjectUbo {
    /// Creates an object block from a world matrix and the camera's
    /// view-projection matrix.
    #[inline]
    pub fn new(model: Mat4, view_projection: Mat4) -> Self {
        Self {
            model,
            model_view_projection: view_projection * model,
            normal_matrix: Self::compute_normal_matrix(model),
        }
    }

    /// Computes the normal matrix from a model matrix.
    ///
    /// # Non-invertible matrices
    ///
    /// If the model matrix is not invertible (e.g., zero scale somewhere up
    /// the hierarchy), the identity matrix is returned so NaN/Inf values do
    /// not reach shaders.
    #[inline]
    pub fn compute_normal_matrix(model: Mat4) -> Mat4 {
        const EPSILON: f32 = 1e-6;
        if model.determinant().abs() < EPSILON {
            Mat4::IDENTITY
        } else {
            model.inverse().transpose()
        }
    }

    /// Returns the size of this structure in bytes.
    #[inline]
    pub const fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

/// Material uniform block.
///
/// # Memory Layout
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 16   | ambient |
/// | 16     | 16   | diffuse |
/// | 32     | 16   | specular |
/// | 48     | 16   | emissive |
/// | 64     | 4    | specular_power |
/// | 68     | 12   | _padding |
///
/// Total size: 80 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MaterialUbo {
    /// Ambient color.
    pub ambient: Vec4,
    /// Diffuse color.
    pub diffuse: Vec4,
    /// Specular color.
    pub specular: Vec4,
    /// Emissive color.
    pub emissive: Vec4,
    /// Specular exponent.
    pub specular_power: f32,
    /// Padding for 16-byte alignment.
    pub _padding: [f32; 3],
}

impl MaterialUbo {
    /// Creates a material block from a material.
    #[inline]
    pub fn new(material: &Material) -> Self {
        Self {
            ambient: material.ambient,
            diffuse: material.diffuse,
            specular: material.specular,
            emissive: material.emissive,
            specular_power: material.specular_power,
            _padding: [0.0; 3],
        }
    }

    /// Returns the size of this structure in bytes.
    #[inline]
    pub const fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_ubo_sizes() {
        assert_eq!(CameraUbo::size(), 208);
        assert_eq!(ObjectUbo::size(), 192);
        assert_eq!(MaterialUbo::size(), 80);
    }

    #[test]
    fn test_ubo_offsets() {
        assert_eq!(offset_of!(CameraUbo, view_projection), 128);
        assert_eq!(offset_of!(CameraUbo, camera_position), 192);
        assert_eq!(offset_of!(ObjectUbo, model_view_projection), 64);
        assert_eq!(offset_of!(ObjectUbo, normal_matrix), 128);
        assert_eq!(offset_of!(MaterialUbo, specular_power), 64);
    }

    #[test]
    fn test_camera_view_projection() {
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let projection = Mat4::perspective_rh_gl(1.0, 1.5, 0.1, 100.0);
        let camera = CameraUbo::new(view, projection, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.view_projection, projection * view);
    }

    #[test]
    fn test_object_mvp() {
        let model = Mat4::from_translation(Vec3::X);
        let view_projection = Mat4::from_scale(Vec3::splat(2.0));
        let object = ObjectUbo::new(model, view_projection);

        assert_eq!(object.model, model);
        assert_eq!(object.model_view_projection, view_projection * model);
        assert_eq!(object.normal_matrix, model.inverse().transpose());
    }

    #[test]
    fn test_normal_matrix_non_invertible() {
        let model = Mat4::from_scale(Vec3::ZERO);
        let normal = ObjectUbo::compute_normal_matrix(model);
        assert_eq!(normal, Mat4::IDENTITY);
    }

    #[test]
    fn test_material_block() {
        let material = Material::new().with_specular(Vec4::new(0.5, 0.5, 0.5, 1.0), 8.0);
        let block = MaterialUbo::new(&material);
        assert_eq!(block.specular_power, 8.0);
        assert_eq!(block.specular, Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(block.diffuse, material.diffuse);
        assert_eq!(bytemuck::bytes_of(&block).len(), 80);
    }
}
