//! Scene graph nodes.
//!
//! A [`Node`] holds a local transform matrix plus the motion and rotation
//! state that [`Node::integrate`] advances every frame. What the node is
//! (a plain transform, a camera or a mesh) is carried by its [`NodeKind`].
//!
//! Nodes are built standalone and handed to a
//! [`SceneGraph`](crate::SceneGraph), which owns them and maintains the
//! parent and child links.
//!
//! # Example
//!
//! ```
//! use nodal_scene::Node;
//! use glam::Vec3;
//!
//! let mut planet = Node::new("planet")
//!     .with_position(Vec3::new(10.0, 0.0, 0.0))
//!     .with_rotation(Vec3::Y, 1.0);
//!
//! planet.integrate(0.5);
//! assert_eq!(planet.rotation_angle(), 0.5);
//! assert_eq!(planet.position(), Vec3::new(10.0, 0.0, 0.0));
//! ```

use std::f32::consts::TAU;
use std::fmt;

use glam::{Mat4, Quat, Vec3};

use crate::camera::Camera;
use crate::mesh_node::MeshNode;

/// Identifier of a node inside a [`SceneGraph`](crate::SceneGraph).
///
/// Ids are never reused, so an id kept after its node was removed simply
/// stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw numeric value.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node contributes during traversal beyond its transform.
#[derive(Clone, Debug, Default)]
pub enum NodeKind {
    /// Transform only; no drawing of its own.
    #[default]
    Transform,
    /// Supplies view and projection matrices.
    Camera(Camera),
    /// Draws a mesh with an optional material.
    Mesh(MeshNode),
}

/// Wrap an angle into the open interval (-2π, 2π), keeping its sign.
pub fn wrap_angle(angle: f32) -> f32 {
    angle % TAU
}

/// A node in the transform hierarchy.
///
/// # Rotation integration and scale
///
/// While the rotation speed is non-zero, every [`integrate`](Node::integrate)
/// rebuilds the local matrix from the rotation axis and angle. Translation
/// and per-axis scale (the lengths of the basis columns) are carried over;
/// any shear, mirroring or orientation set through
/// [`set_matrix`](Node::set_matrix) is replaced. With a rotation speed of
/// zero the local matrix is never rebuilt.
#[derive(Clone, Debug)]
pub struct Node {
    name: String,
    matrix: Mat4,
    velocity: Vec3,
    rotation_axis: Vec3,
    rotation_angle: f32,
    rotation_speed: f32,
    radius: f32,
    kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            matrix: Mat4::IDENTITY,
            velocity: Vec3::ZERO,
            rotation_axis: Vec3::NEG_Z,
            rotation_angle: 0.0,
            rotation_speed: 0.0,
            radius: 1.0,
            kind: NodeKind::Transform,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    /// Create a detached transform node with an identity matrix and no
    /// motion or rotation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a camera node.
    pub fn camera(name: impl Into<String>, camera: Camera) -> Self {
        Self::new(name).with_kind(NodeKind::Camera(camera))
    }

    /// Create a mesh node.
    pub fn mesh(name: impl Into<String>, mesh: MeshNode) -> Self {
        Self::new(name).with_kind(NodeKind::Mesh(mesh))
    }

    /// Replace the node kind.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Set the velocity.
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the rotation axis and angular speed (radians per second).
    pub fn with_rotation(mut self, axis: Vec3, speed: f32) -> Self {
        self.set_rotation_axis(axis);
        self.rotation_speed = speed;
        self
    }

    /// Set the radius hint.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Advance motion and rotation by `delta_time` seconds.
    ///
    /// Velocity moves the position. With a non-zero rotation speed the
    /// local matrix is rebuilt from the current angle, after which the angle
    /// advances and wraps into (-2π, 2π). Only this node is touched; the
    /// graph recurses into children.
    pub fn integrate(&mut self, delta_time: f32) {
        let position = self.position() + self.velocity * delta_time;

        if self.rotation_speed != 0.0 {
            self.rebuild_rotation();
            self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * delta_time);
        }

        self.set_position(position);
    }

    fn rebuild_rotation(&mut self) {
        let rotation = Quat::from_axis_angle(self.rotation_axis, self.rotation_angle);
        self.matrix = Mat4::from_scale_rotation_translation(self.scale(), rotation, self.position());
    }

    /// Node name, not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the node.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Local transform matrix.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Replace the local transform matrix.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    /// Position, read from the translation column of the local matrix.
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Write the translation column of the local matrix.
    pub fn set_position(&mut self, position: Vec3) {
        self.matrix.w_axis = position.extend(1.0);
    }

    /// Per-axis scale, the lengths of the local matrix's basis columns.
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.matrix.x_axis.truncate().length(),
            self.matrix.y_axis.truncate().length(),
            self.matrix.z_axis.truncate().length(),
        )
    }

    /// Velocity in units per second.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set the velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Rotate to `angle` radians about `axis`, keeping position and scale.
    ///
    /// The axis is normalized and stored; a zero axis yields NaNs.
    pub fn rotate_axis_angle(&mut self, axis: Vec3, angle: f32) {
        self.rotation_axis = axis.normalize();
        self.rotation_angle = angle;
        self.rebuild_rotation();
    }

    /// Unit rotation axis.
    pub fn rotation_axis(&self) -> Vec3 {
        self.rotation_axis
    }

    /// Change the rotation axis, keeping the current angle.
    pub fn set_rotation_axis(&mut self, axis: Vec3) {
        self.rotate_axis_angle(axis, self.rotation_angle);
    }

    /// Current rotation angle in radians.
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    /// Change the rotation angle, keeping the current axis.
    pub fn set_rotation_angle(&mut self, angle: f32) {
        self.rotate_axis_angle(self.rotation_axis, angle);
    }

    /// Angular speed in radians per second.
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Set the angular speed. Zero stops rotation integration entirely.
    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = speed;
    }

    /// Size hint for callers; not used internally.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the size hint.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Point the local matrix from `from` towards `at` with +Y up.
    ///
    /// Used to aim cameras. Degenerates when `at == from` or the direction is
    /// parallel to +Y.
    pub fn look_at(&mut self, from: Vec3, at: Vec3) {
        self.matrix = Mat4::look_at_rh(from, at, Vec3::Y).inverse();
    }

    /// Parent node, `None` for roots and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable node kind.
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Camera data, if this is a camera node.
    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Mutable camera data, if this is a camera node.
    pub fn as_camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Mesh reference, if this is a mesh node.
    pub fn mesh_node(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Mutable mesh reference, if this is a mesh node.
    pub fn mesh_node_mut(&mut self) -> Option<&mut MeshNode> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
