//! Scene graph error types.

use thiserror::Error;

use crate::node::NodeId;

/// Error type for structural scene graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not name a live node.
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// The child already has a parent; nodes are attached exactly once.
    #[error("Node {child} is already attached to {parent}")]
    AlreadyAttached {
        /// Node that was being attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// A node cannot be its own child.
    #[error("Node {0} cannot be attached to itself")]
    SelfAttachment(NodeId),

    /// The child is an ancestor of the requested parent.
    #[error("Attaching {child} under {parent} would create a cycle")]
    CycleDetected {
        /// Node that was being attached.
        child: NodeId,
        /// Requested parent, a descendant of `child`.
        parent: NodeId,
    },

    /// A camera operation was requested on a non-camera node.
    #[error("Node {0} is not a camera")]
    NotACamera(NodeId),
}

/// Result type alias for scene graph operations.
pub type SceneResult<T> = Result<T, SceneError>;
