//! Mesh nodes: a shared mesh and material placed in the hierarchy.

use std::sync::Arc;

use glam::Mat4;
use nodal_resources::ubo::ObjectUbo;
use nodal_resources::{Material, Mesh};

use crate::render::RenderTarget;

/// Mesh and material references of a mesh node.
///
/// Either may be absent: without a mesh the node is transform-only, without
/// a material the renderer's current material state is left alone. Several
/// nodes may share the same mesh and material.
#[derive(Clone, Debug, Default)]
pub struct MeshNode {
    mesh: Option<Arc<Mesh>>,
    material: Option<Arc<Material>>,
}

impl MeshNode {
    /// Create a mesh node with the given references.
    pub fn new(mesh: Option<Arc<Mesh>>, material: Option<Arc<Material>>) -> Self {
        Self { mesh, material }
    }

    /// Shared mesh, if any.
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    /// Set, switch or disable the mesh.
    pub fn set_mesh(&mut self, mesh: Option<Arc<Mesh>>) {
        self.mesh = mesh;
    }

    /// Shared material, if any.
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    /// Set, switch or disable the material.
    pub fn set_material(&mut self, material: Option<Arc<Material>>) {
        self.material = material;
    }

    /// Upload matrices, apply the material and issue the draw call.
    ///
    /// Returns `false` without touching the target when there is no mesh.
    pub(crate) fn draw(&self, world: Mat4, target: &mut dyn RenderTarget) -> bool {
        let Some(mesh) = &self.mesh else {
            return false;
        };

        let view_projection = target.projection_matrix() * target.view_matrix();
        target.upload_object(&ObjectUbo::new(world, view_projection));

        if let Some(material) = &self.material {
            target.apply_material(&material.uniforms());
        }

        target.draw(mesh.draw_call());
        true
    }
}
