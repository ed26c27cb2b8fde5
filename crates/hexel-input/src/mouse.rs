//! Pointer state tracking.

use glam::Vec2;
use winit::event::MouseScrollDelta;

/// Pixels per scroll line when a device reports pixel deltas.
const PIXELS_PER_LINE: f32 = 100.0;

/// How the window treats the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Visible, free cursor.
    #[default]
    Normal,
    /// Hidden and captured by the window (FPS-style look).
    Grabbed,
}

/// Pointer position, accumulated scroll, and cursor mode.
#[derive(Debug, Default)]
pub struct MouseState {
    /// Absolute cursor position in window coordinates.
    position: Vec2,
    /// Scroll since the last `end_frame`, in lines.
    scroll_delta: Vec2,
    cursor_mode: CursorMode,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
    }

    /// Accumulate a scroll event.
    #[allow(clippy::cast_possible_truncation)]
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
            }
        };
    }

    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Scroll since the last frame (x = horizontal, y = vertical).
    #[must_use]
    pub const fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    #[must_use]
    pub const fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    /// Reset per-frame accumulators.
    pub fn end_frame(&mut self) {
        self.scroll_delta = Vec2::ZERO;
    }
}
