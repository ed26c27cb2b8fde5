//! Hexagon vertex generation.
//!
//! A hexagon table holds seven 2D points: the center at index 0, followed by
//! the six ring vertices counter-clockwise from the +X axis. The cell prism
//! maps table `x` to world X and table `y` to world Z.

use std::f32::consts::FRAC_PI_3;
use std::sync::LazyLock;

use glam::Vec2;

use crate::constants::{HEX_POINT_COUNT, HEX_RADIUS};
use crate::error::{Error, Result};

/// Unit hexagon table shared by all cell geometry. Computed once.
pub static HEX_POINTS: LazyLock<[Vec2; HEX_POINT_COUNT]> =
    LazyLock::new(|| hex_vertices(HEX_RADIUS));

/// Compute the center and ring vertices of a regular hexagon.
///
/// Ring vertex `i` (table index `i + 1`) sits at angle `i * 60°` and distance
/// `radius` from the center.
///
/// # Panics
///
/// Panics if `radius` is not finite or not strictly positive. A degenerate
/// radius would collapse the ring onto the center.
#[must_use]
pub fn hex_vertices(radius: f32) -> [Vec2; HEX_POINT_COUNT] {
    assert!(
        radius.is_finite() && radius > 0.0,
        "hexagon radius must be finite and > 0, got {radius}"
    );

    let mut points = [Vec2::ZERO; HEX_POINT_COUNT];
    for (i, point) in points.iter_mut().skip(1).enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let angle = i as f32 * FRAC_PI_3;
        *point = Vec2::new(radius * angle.cos(), radius * angle.sin());
    }
    points
}

/// Fallible variant of [`hex_vertices`] for radii that come from input.
pub fn try_hex_vertices(radius: f32) -> Result<[Vec2; HEX_POINT_COUNT]> {
    if radius.is_finite() && radius > 0.0 {
        Ok(hex_vertices(radius))
    } else {
        Err(Error::InvalidRadius(radius))
    }
}
