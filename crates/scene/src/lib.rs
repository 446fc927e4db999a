//! Transform hierarchy with camera and mesh nodes.
//!
//! This crate provides:
//! - [`SceneGraph`], the arena that owns nodes and their parent/child links
//! - [`Node`] with per-frame motion and rotation integration
//! - Camera and mesh node kinds
//! - The [`RenderTarget`] interface the graph draws into
//!
//! A frame is `update(root, dt)`, then `activate_camera`, then
//! `render(root, target)`.

pub mod camera;
mod error;
pub mod graph;
pub mod mesh_node;
pub mod node;
pub mod render;

pub use camera::Camera;
pub use error::{SceneError, SceneResult};
pub use graph::SceneGraph;
pub use mesh_node::MeshNode;
pub use node::{Node, NodeId, NodeKind, wrap_angle};
pub use render::{DrawRecord, RecordingTarget, RenderTarget};
