//! Input polling for the Hexel engine.
//!
//! The host feeds winit window events into an [`InputManager`] as they
//! arrive; game code then polls it once per frame. There is no event queue:
//! the manager only answers "is this key down" and "where is the pointer".
//!
//! # Usage
//!
//! ```ignore
//! use hexel_input::{InputManager, KeyCode};
//!
//! // In the event handler
//! fn on_event(input: &mut InputManager, event: &WindowEvent) -> bool {
//!     input.process_window_event(event)
//! }
//!
//! // In the update loop
//! fn update(input: &mut InputManager, camera: &mut Camera, dt: f32) {
//!     if input.is_key_just_pressed(KeyCode::Escape) {
//!         // Quit
//!     }
//!     camera.process_input(input, dt);
//!
//!     // MUST call at end of update
//!     input.end_frame();
//! }
//! ```

mod button_state;
mod input;
mod keyboard;
mod mouse;

pub use button_state::ButtonState;
pub use input::InputManager;
pub use keyboard::KeyboardState;
pub use mouse::{CursorMode, MouseState};

// Re-export winit types commonly used with input
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
