//! Scene graph arena.
//!
//! The [`SceneGraph`] owns every [`Node`] and keys it by [`NodeId`]. Parent
//! links are plain ids, so a child never keeps its parent alive and the
//! hierarchy has a single owner.
//!
//! Traversals (`update`, `render`, `find_node`) are depth-first pre-order
//! with children visited in insertion order. They run on an explicit stack
//! rather than recursion so deep chains cannot overflow.
//!
//! # Example
//!
//! ```
//! use nodal_scene::{Node, SceneGraph};
//! use glam::{Mat4, Vec3};
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.insert(Node::new("root").with_position(Vec3::new(1.0, 0.0, 0.0)));
//! let child = graph.insert(Node::new("child").with_position(Vec3::new(0.0, 2.0, 0.0)));
//! graph.add_child(root, child).unwrap();
//!
//! let world = graph.world_matrix(child).unwrap();
//! assert_eq!(world, Mat4::from_translation(Vec3::new(1.0, 2.0, 0.0)));
//! assert_eq!(graph.find_node(root, "child"), Some(child));
//! ```

use std::collections::HashMap;

use glam::Mat4;
use nodal_resources::ubo::CameraUbo;
use tracing::{debug, trace};

use crate::error::{SceneError, SceneResult};
use crate::node::{Node, NodeId, NodeKind};
use crate::render::RenderTarget;

/// Owner of all nodes and their parent/child links.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    next_id: u32,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a node and return its id.
    ///
    /// The node is inserted detached, whatever links it carried before.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        node.parent = None;
        node.children.clear();

        debug!("Inserted node {} '{}'", id, node.name());
        self.nodes.insert(id, node);
        id
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Borrow a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutably borrow a node.
    ///
    /// Links are maintained by the graph and cannot be changed through the
    /// returned reference.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Parent of `id`, `None` for roots or unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(Node::parent)
    }

    /// Children of `id` in insertion order, empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(Node::children).unwrap_or(&[])
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// - [`SceneError::NodeNotFound`] if either id is unknown
    /// - [`SceneError::SelfAttachment`] if both ids are the same
    /// - [`SceneError::AlreadyAttached`] if `child` already has a parent
    /// - [`SceneError::CycleDetected`] if `child` is an ancestor of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        if parent == child {
            return Err(SceneError::SelfAttachment(child));
        }
        self.node(parent)?;
        if let Some(current) = self.node(child)?.parent() {
            return Err(SceneError::AlreadyAttached {
                child,
                parent: current,
            });
        }

        // A detached child can still be the root of the parent's tree.
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(SceneError::CycleDetected { child, parent });
            }
            ancestor = self.parent(id);
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }

        debug!("Attached node {} under {}", child, parent);
        Ok(())
    }

    /// Remove a node and its whole subtree.
    ///
    /// The node is first detached from its parent. Returns the number of
    /// nodes removed.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<usize> {
        let parent = self.node(id)?.parent();
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed += 1;
            }
        }

        debug!("Removed node {} and {} descendant(s)", id, removed - 1);
        Ok(removed)
    }

    /// World matrix of `id`: the product of every ancestor's local matrix
    /// and its own, root first.
    ///
    /// Computed on every call in O(depth).
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(&id)?;
        let mut world = node.matrix();
        while let Some(parent) = node.parent() {
            node = self.nodes.get(&parent)?;
            world = node.matrix() * world;
        }
        Some(world)
    }

    /// View matrix of a node: the inverse of its world matrix.
    ///
    /// Meaningless if the world matrix is singular.
    pub fn view_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.world_matrix(id).map(|world| world.inverse())
    }

    /// Integrate every node of the subtree rooted at `root` by `delta_time`
    /// seconds, parents before children.
    pub fn update(&mut self, root: NodeId, delta_time: f32) -> SceneResult<()> {
        self.node(root)?;

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            node.integrate(delta_time);
            stack.extend(node.children.iter().rev());
        }
        Ok(())
    }

    /// Draw the subtree rooted at `root` into `target`.
    ///
    /// Every node is visited exactly once. Mesh nodes draw themselves with
    /// their world matrix before their children are visited; transform and
    /// camera nodes only pass through. Returns the number of draw calls.
    pub fn render(&self, root: NodeId, target: &mut dyn RenderTarget) -> SceneResult<usize> {
        let root_node = self.node(root)?;
        let base = match root_node.parent() {
            Some(parent) => self.world_matrix(parent).unwrap_or(Mat4::IDENTITY),
            None => Mat4::IDENTITY,
        };

        let mut draws = 0;
        let mut stack = vec![(root, base)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let world = parent_world * node.matrix();

            if let NodeKind::Mesh(mesh) = node.kind()
                && mesh.draw(world, target)
            {
                trace!("Drew node {} '{}'", id, node.name());
                draws += 1;
            }

            stack.extend(node.children().iter().rev().map(|&child| (child, world)));
        }
        Ok(draws)
    }

    /// First node named `name` in pre-order below and including `root`.
    pub fn find_node(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(&id)?;
            if node.name() == name {
                return Some(id);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }

    /// Push the view and projection of camera node `id` into `target`.
    ///
    /// # Errors
    ///
    /// - [`SceneError::NodeNotFound`] if `id` is unknown
    /// - [`SceneError::NotACamera`] if the node is not a camera
    pub fn activate_camera(&self, id: NodeId, target: &mut dyn RenderTarget) -> SceneResult<()> {
        let camera = self.node(id)?.as_camera().ok_or(SceneError::NotACamera(id))?;
        let world = self.world_matrix(id).ok_or(SceneError::NodeNotFound(id))?;

        target.set_camera(&CameraUbo::new(
            world.inverse(),
            camera.projection_matrix(),
            world.w_axis.truncate(),
        ));
        Ok(())
    }
}
