//! Pointer capture: hides the cursor and turns mouse motion into look
//! deltas.

use log::{debug, warn};
use winit::error::ExternalError;
use winit::window::{CursorGrabMode, Window};

/// Grabs the cursor.  `Locked` is tried first; platforms without it
/// (X11, Windows) fall back to `Confined`, which still delivers raw
/// device motion.
pub fn engage(window: &Window) -> Result<CursorGrabMode, ExternalError> {
    let mode = match window.set_cursor_grab(CursorGrabMode::Locked) {
        Ok(()) => CursorGrabMode::Locked,
        Err(ExternalError::NotSupported(_)) => {
            debug!("locked cursor unsupported, confining instead");
            window.set_cursor_grab(CursorGrabMode::Confined)?;
            CursorGrabMode::Confined
        }
        Err(err) => return Err(err),
    };
    window.set_cursor_visible(false);
    Ok(mode)
}

pub fn release(window: &Window) {
    if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        warn!("could not release cursor: {err}");
    }
    window.set_cursor_visible(true);
}
