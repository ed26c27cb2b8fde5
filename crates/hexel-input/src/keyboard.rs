//! Keyboard state tracking.

use hashbrown::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::button_state::ButtonState;

/// State of every key seen so far, by physical key code.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, ButtonState>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key event. Keys without a known physical code are ignored.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };

        match event.state {
            ElementState::Pressed => self.press(key),
            ElementState::Released => self.release(key),
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys.entry(key).or_default().set(true);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys.entry(key).or_default().set(false);
    }

    /// Returns `true` if the key is currently down.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_pressed())
    }

    /// Returns `true` if the key went down this frame.
    #[must_use]
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_just_pressed())
    }

    /// Called at end of frame to drop this frame's transitions.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            state.end_frame();
        }
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keyboard = KeyboardState::new();
        assert!(!keyboard.is_pressed(KeyCode::KeyW));

        keyboard.press(KeyCode::KeyW);
        assert!(keyboard.is_pressed(KeyCode::KeyW));
        assert!(keyboard.is_just_pressed(KeyCode::KeyW));
        assert!(!keyboard.is_pressed(KeyCode::KeyS));

        keyboard.end_frame();
        assert!(keyboard.is_pressed(KeyCode::KeyW));
        assert!(!keyboard.is_just_pressed(KeyCode::KeyW));

        keyboard.release(KeyCode::KeyW);
        assert!(!keyboard.is_pressed(KeyCode::KeyW));
    }

    #[test]
    fn clear_releases_everything() {
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::Space);
        keyboard.clear();
        assert!(!keyboard.is_pressed(KeyCode::KeyA));
        assert!(!keyboard.is_pressed(KeyCode::Space));
    }
}
