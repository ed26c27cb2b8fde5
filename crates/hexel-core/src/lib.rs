//! Core types and math for the Hexel engine.
//!
//! This crate provides the foundational pieces shared by every other crate:
//! - Vector and matrix primitives (re-exported from glam)
//! - The hexagon vertex generator and its shared unit table
//! - The engine error type

pub mod error;
pub mod hex;
pub mod math;

pub use error::{Error, Result};
pub use hex::{hex_vertices, try_hex_vertices, HEX_POINTS};
pub use math::{Mat4, Vec2, Vec3, Vec4};

/// Engine-wide constants
pub mod constants {
    /// Circumradius of the hexagonal prism cap
    pub const HEX_RADIUS: f32 = 1.0;
    /// Half of the prism height (caps sit at `y = ±VOXEL_HALF_THICKNESS`)
    pub const VOXEL_HALF_THICKNESS: f32 = 0.5;
    /// Number of points in a hexagon table (center + 6 ring points)
    pub const HEX_POINT_COUNT: usize = 7;
}
