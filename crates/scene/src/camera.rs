//! Camera projection.
//!
//! A [`Camera`] stores its four optical parameters and the perspective
//! matrix derived from them. The view matrix depends on where the camera
//! sits in the hierarchy, so it comes from
//! [`SceneGraph::view_matrix`](crate::SceneGraph::view_matrix).

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec4};
use tracing::debug;

/// Perspective camera parameters and projection matrix.
///
/// The projection matrix is always the one derived from the stored
/// parameters; it is rebuilt on every parameter change.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(FRAC_PI_2, 1.0, 1.0, 500.0)
    }
}

impl Camera {
    /// Create a camera.
    ///
    /// # Arguments
    /// * `fov` - horizontal field of view in radians, in (0, π)
    /// * `aspect` - width / height
    /// * `near` - near plane distance, > 0
    /// * `far` - far plane distance, > `near`
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.set_projection_parameters(fov, aspect, near, far);
        camera
    }

    /// Create a camera from `(fov, aspect, near, far)`.
    pub fn from_parameters(parameters: Vec4) -> Self {
        Self::new(parameters.x, parameters.y, parameters.z, parameters.w)
    }

    /// Store new parameters and rebuild the projection matrix.
    ///
    /// Parameters are not validated: a non-positive near plane, `far <= near`
    /// or a field of view outside (0, π) produce a degenerate matrix.
    pub fn set_projection_parameters(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.projection = Mat4::perspective_rh_gl(self.vertical_fov(), aspect, near, far);

        debug!(
            "Camera projection: fov {:.3} rad, aspect {:.3}, near {}, far {}",
            fov, aspect, near, far
        );
    }

    /// [`set_projection_parameters`](Self::set_projection_parameters) from
    /// `(fov, aspect, near, far)`.
    pub fn set_parameters(&mut self, parameters: Vec4) {
        self.set_projection_parameters(parameters.x, parameters.y, parameters.z, parameters.w);
    }

    /// Stored parameters as `(fov, aspect, near, far)`.
    pub fn projection_parameters(&self) -> Vec4 {
        Vec4::new(self.fov, self.aspect, self.near, self.far)
    }

    /// Change only the aspect ratio, e.g. after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.set_projection_parameters(self.fov, aspect, self.near, self.far);
    }

    /// Horizontal field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Vertical field of view derived from the horizontal one and the aspect.
    pub fn vertical_fov(&self) -> f32 {
        2.0 * ((self.fov * 0.5).tan() / self.aspect).atan()
    }

    /// Aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near plane distance.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far plane distance.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Perspective projection matrix (right-handed, OpenGL clip depth).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }
}
