//! Press tracking for a single key.

/// Whether a key is held, and whether that changed during the current frame.
///
/// ```text
/// up ─set(true)─> down+changed ─end_frame()─> down
///  ^                                           │
///  └──end_frame()── up+changed <──set(false)───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    down: bool,
    changed: bool,
}

impl ButtonState {
    /// Returns `true` while the key is held.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        self.down
    }

    /// Returns `true` if the key went down this frame.
    #[inline]
    #[must_use]
    pub const fn is_just_pressed(self) -> bool {
        self.down && self.changed
    }

    /// Returns `true` if the key went up this frame.
    #[inline]
    #[must_use]
    pub const fn is_just_released(self) -> bool {
        !self.down && self.changed
    }

    /// Record a new physical state. Repeats of the current state are ignored.
    #[inline]
    pub fn set(&mut self, down: bool) {
        if self.down != down {
            self.down = down;
            self.changed = true;
        }
    }

    /// Forget this frame's transition.
    #[inline]
    pub fn end_frame(&mut self) {
        self.changed = false;
    }
}
