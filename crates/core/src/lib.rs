//! Core utilities for the nodal scene crates.
//!
//! This crate provides foundational types used across the workspace:
//! - Error types and result aliases
//! - Logging initialization
//! - Frame timer
//! - Frame driver configuration

mod error;

pub mod config;
pub mod logging;
pub mod timer;

pub use config::FrameConfig;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use timer::Timer;
