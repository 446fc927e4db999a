//! Renderer collaborator interface.
//!
//! The scene graph never talks to a graphics API. During
//! [`SceneGraph::render`](crate::SceneGraph::render) it hands matrices,
//! materials and draw calls to a [`RenderTarget`], which owns every GPU
//! resource. The target is borrowed for the traversal and cannot reach back
//! into the graph.

use glam::{Mat4, Vec3};
use nodal_resources::Topology;
use nodal_resources::mesh::DrawCall;
use nodal_resources::ubo::{CameraUbo, MaterialUbo, ObjectUbo};

/// Receives the output of a scene traversal.
pub trait RenderTarget {
    /// View matrix of the active camera.
    fn view_matrix(&self) -> Mat4;

    /// Projection matrix of the active camera.
    fn projection_matrix(&self) -> Mat4;

    /// Make a camera active for the following draws.
    fn set_camera(&mut self, camera: &CameraUbo);

    /// Model and model-view-projection matrices of the node about to draw.
    fn upload_object(&mut self, object: &ObjectUbo);

    /// Apply a material to the current draw state.
    fn apply_material(&mut self, material: &MaterialUbo);

    /// Issue one draw call.
    fn draw(&mut self, call: DrawCall<'_>);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRecord {
    /// Topology of the mesh.
    pub topology: Topology,
    /// Vertices bound.
    pub vertex_count: usize,
    /// Indices drawn, zero when not indexed.
    pub index_count: usize,
    /// Triangles produced.
    pub triangle_count: usize,
    /// Object block uploaded before the draw.
    pub object: ObjectUbo,
    /// Material applied before the draw, if any.
    pub material: Option<MaterialUbo>,
}

/// A [`RenderTarget`] that records what a traversal produced instead of
/// drawing it. Used for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    camera: CameraUbo,
    pending_object: ObjectUbo,
    pending_material: Option<MaterialUbo>,
    object_uploads: usize,
    draws: Vec<DrawRecord>,
}

impl RecordingTarget {
    /// Create a target with identity view and projection.
    pub fn new() -> Self {
        Self {
            camera: CameraUbo::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO),
            ..Self::default()
        }
    }

    /// Forget the draws of the previous frame.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
        self.pending_material = None;
        self.object_uploads = 0;
    }

    /// Active camera block.
    pub fn camera(&self) -> &CameraUbo {
        &self.camera
    }

    /// Draws recorded since the last [`begin_frame`](Self::begin_frame).
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// Object blocks uploaded since the last frame start.
    pub fn object_uploads(&self) -> usize {
        self.object_uploads
    }

    /// Total triangles recorded since the last frame start.
    pub fn triangle_count(&self) -> usize {
        self.draws.iter().map(|d| d.triangle_count).sum()
    }
}

impl RenderTarget for RecordingTarget {
    fn view_matrix(&self) -> Mat4 {
        self.camera.view
    }

    fn projection_matrix(&self) -> Mat4 {
        self.camera.projection
    }

    fn set_camera(&mut self, camera: &CameraUbo) {
        self.camera = *camera;
    }

    fn upload_object(&mut self, object: &ObjectUbo) {
        self.pending_object = *object;
        self.object_uploads += 1;
    }

    fn apply_material(&mut self, material: &MaterialUbo) {
        self.pending_material = Some(*material);
    }

    fn draw(&mut self, call: DrawCall<'_>) {
        self.draws.push(DrawRecord {
            topology: call.topology,
            vertex_count: call.vertex_count(),
            index_count: call.index_count(),
            triangle_count: call.triangle_count(),
            object: self.pending_object,
            material: self.pending_material.take(),
        });
    }
}
