//! Procedural geometry and render resources.
//!
//! This crate provides the data the scene graph draws:
//! - Vertex layout
//! - Geometry generators (sphere, cube, quad, torus, trefoil knot)
//! - Meshes and their draw parameters
//! - Material definitions
//! - Uniform blocks for the renderer

mod error;

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod ubo;
pub mod vertex;

pub use error::{GeometryError, GeometryResult};
pub use geometry::{Geometry, Topology};
pub use material::Material;
pub use mesh::{DrawCall, Mesh};
pub use vertex::Vertex;
