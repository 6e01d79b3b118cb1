use std::collections::HashSet;

/// Re-exported key enum from `winit` so callers don't need the dependency.
pub use winit::keyboard::KeyCode;

/// Keyboard and pointer state as seen by the frame driver.
///
/// The host feeds raw events in through [`crate::InputEvent`]; the frame
/// driver applies them here at the start of every frame and the controller
/// reads the result.
#[derive(Debug, Default)]
pub struct InputState {
    keys_held: HashSet<KeyCode>,
    shift: bool,
    /// pointer capture (cursor grab) is engaged
    captured: bool,
    /// movement accumulated since the last `consume_mouse_delta`
    mouse_delta: (f32, f32),
}

impl InputState {
    /// Creates a fresh, empty input state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Records a key press.
    ///
    /// OS auto-repeat events are ignored, so a held key registers once per
    /// physical press.  Returns `true` only for a fresh press.
    pub fn key_down(&mut self, key: KeyCode, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        self.keys_held.insert(key)
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Returns true if the given key is currently held down.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.keys_held.len()
    }

    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Engage or release pointer capture.  Releasing drops any motion that
    /// was accumulated but not consumed yet.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            self.mouse_delta = (0.0, 0.0);
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Accumulate raw relative motion.  Ignored while the pointer is not
    /// captured.
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.mouse_delta.0 += dx;
            self.mouse_delta.1 += dy;
        }
    }

    /// Retrieve and reset the mouse movement since the last call.
    pub fn consume_mouse_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Forget every held key, e.g. when the window loses focus and key-up
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.shift = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_held(KeyCode::KeyA));
        assert!(state.key_down(KeyCode::KeyA, false));
        assert!(state.is_key_held(KeyCode::KeyA));
        state.key_up(KeyCode::KeyA);
        assert!(!state.is_key_held(KeyCode::KeyA));
    }

    #[test]
    fn auto_repeat_is_suppressed() {
        let mut state = InputState::new();
        assert!(state.key_down(KeyCode::KeyW, false));
        assert!(!state.key_down(KeyCode::KeyW, true));
        // a second non-repeat press while still held is not a fresh press either
        assert!(!state.key_down(KeyCode::KeyW, false));
        assert_eq!(state.held_count(), 1);
    }

    #[test]
    fn repeat_without_prior_press_does_not_register() {
        let mut state = InputState::new();
        assert!(!state.key_down(KeyCode::KeyS, true));
        assert!(!state.is_key_held(KeyCode::KeyS));
    }

    #[test]
    fn motion_requires_capture() {
        let mut state = InputState::new();
        state.add_mouse_motion(5.0, 5.0);
        assert_eq!(state.consume_mouse_delta(), (0.0, 0.0));

        state.set_captured(true);
        state.add_mouse_motion(5.0, -2.0);
        state.add_mouse_motion(1.0, 1.0);
        assert_eq!(state.consume_mouse_delta(), (6.0, -1.0));
        // consumption resets
        assert_eq!(state.consume_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn losing_capture_discards_pending_motion() {
        let mut state = InputState::new();
        state.set_captured(true);
        state.add_mouse_motion(3.0, 4.0);
        state.set_captured(false);
        assert_eq!(state.consume_mouse_delta(), (0.0, 0.0));
    }
}
