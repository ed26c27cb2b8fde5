//! Error types for the engine.

use thiserror::Error;

/// Engine-wide error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Hexagon radius was zero, negative or not finite
    #[error("Invalid hexagon radius: {0} (must be finite and > 0)")]
    InvalidRadius(f32),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
