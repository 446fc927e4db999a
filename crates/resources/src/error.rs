//! Error types for geometry generation.

use thiserror::Error;

/// Error type for geometry generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A tessellation count is too small to produce a closed surface.
    #[error("Degenerate tessellation: {parameter} = {value}, must be at least {minimum}")]
    DegenerateTessellation {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value that was passed.
        value: u32,
        /// Smallest accepted value.
        minimum: u32,
    },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
