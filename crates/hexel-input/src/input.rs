//! Input manager combining keyboard and pointer state.

use glam::Vec2;
use tracing::debug;
use winit::event::WindowEvent;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;
use crate::mouse::{CursorMode, MouseState};

/// Polled input state for one window.
///
/// Window events update the state as they arrive; game code reads it once per
/// frame and then calls [`InputManager::end_frame`]. Headless hosts and tests
/// drive the same state through the direct mutators (`press_key`,
/// `move_pointer`, ...).
#[derive(Debug)]
pub struct InputManager {
    keyboard: KeyboardState,
    mouse: MouseState,
    focused: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            focused: true,
        }
    }
}

impl InputManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub const fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Process a window event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if self.focused {
                    self.keyboard.process_key_event(event);
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.set_position(position.x, position.y);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.process_scroll(*delta);
                true
            }
            WindowEvent::Focused(focused) => {
                self.set_focused(*focused);
                true
            }
            _ => false,
        }
    }

    /// Called at the end of each frame to drop transitions and reset deltas.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    // ===== Direct mutators =====

    /// Press `key`. Ignored while unfocused, like keyboard events.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.focused {
            self.keyboard.press(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keyboard.release(key);
    }

    pub fn move_pointer(&mut self, position: Vec2) {
        self.mouse
            .set_position(f64::from(position.x), f64::from(position.y));
    }

    /// Scroll vertically by `lines`.
    pub fn scroll(&mut self, lines: f32) {
        self.mouse
            .process_scroll(winit::event::MouseScrollDelta::LineDelta(0.0, lines));
    }

    /// Update window focus. Losing focus releases every key, since the
    /// matching key-up events go to another window.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        debug!(focused, "Window focus changed");
        self.focused = focused;
        if !focused {
            self.keyboard.clear();
        }
    }

    // ===== Queries =====

    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_pressed(key)
    }

    #[must_use]
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_just_pressed(key)
    }

    /// Current pointer position in window coordinates.
    #[must_use]
    pub const fn pointer_position(&self) -> Vec2 {
        self.mouse.position()
    }

    /// Vertical scroll since the last frame, in lines.
    #[must_use]
    pub const fn scroll_delta(&self) -> f32 {
        self.mouse.scroll_delta().y
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn cursor_mode(&self) -> CursorMode {
        self.mouse.cursor_mode()
    }

    /// Set the cursor mode.
    ///
    /// **Note**: This only updates the internal state. The caller is
    /// responsible for applying the mode to the actual window.
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        debug!(?mode, "Cursor mode changed");
        self.mouse.set_cursor_mode(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_focused_and_idle() {
        let input = InputManager::new();
        assert!(input.is_focused());
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert_eq!(input.pointer_position(), Vec2::ZERO);
        assert_eq!(input.cursor_mode(), CursorMode::Normal);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut input = InputManager::new();
        input.press_key(KeyCode::KeyW);
        input.set_focused(false);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(!input.is_focused());
    }

    #[test]
    fn presses_while_unfocused_are_ignored() {
        let mut input = InputManager::new();
        input.set_focused(false);
        input.press_key(KeyCode::KeyW);
        input.set_focused(true);
        assert!(!input.is_key_pressed(KeyCode::KeyW));

        input.press_key(KeyCode::KeyW);
        assert!(input.is_key_just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn focus_event_is_consumed() {
        let mut input = InputManager::new();
        assert!(input.process_window_event(&WindowEvent::Focused(false)));
        assert!(!input.is_focused());
        assert!(!input.process_window_event(&WindowEvent::CloseRequested));
    }

    #[test]
    fn scroll_resets_each_frame() {
        let mut input = InputManager::new();
        input.scroll(2.0);
        assert!((input.scroll_delta() - 2.0).abs() < f32::EPSILON);
        input.end_frame();
        assert!(input.scroll_delta().abs() < f32::EPSILON);
    }

    #[test]
    fn pointer_moves() {
        let mut input = InputManager::new();
        input.move_pointer(Vec2::new(100.0, 90.0));
        assert_eq!(input.pointer_position(), Vec2::new(100.0, 90.0));
    }
}
