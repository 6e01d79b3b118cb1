use std::collections::VecDeque;

use crate::input::KeyCode;

/// Host events, in the form the frame driver consumes them.
///
/// The windowing layer translates its native events into these and pushes
/// them onto an [`EventQueue`]; nothing in `vista_core` depends on the
/// window system itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, repeat: bool },
    KeyUp { key: KeyCode },
    /// Modifier state changed.
    Modifiers { shift: bool },
    /// Raw relative pointer motion in pixels.
    MouseMotion { dx: f32, dy: f32 },
    /// Pointer capture was engaged (`true`) or released (`false`).
    CaptureChanged(bool),
    /// The window lost focus: every key counts as released.
    FocusLost,
    Resized { width: u32, height: u32 },
    Shutdown,
}

/// FIFO of events waiting for the next frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}
