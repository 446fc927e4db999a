//! Error types shared by the nodal crates.

use thiserror::Error;

/// Main error type for the frame driver and its configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using the core Error type.
pub type Result<T> = std::result::Result<T, Error>;
