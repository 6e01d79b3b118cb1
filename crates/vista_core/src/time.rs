//! Frame timing utilities.
//!
//! `Time` is produced once per frame by the frame driver and handed to the
//! per-frame hook.  The clock's origin is the moment it was created, so the
//! very first frame's `delta` covers everything between start-up and that
//! frame (the same start-up artifact a browser frame callback has when its
//! previous timestamp starts at zero).

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// A snapshot of timing information for the current frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    /// Seconds elapsed since the previous frame.
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames produced so far (starts at 0 for the first frame).
    pub frame_count: u64,
}

// ─── Clock ─────────────────────────────────────────────────────────────────

/// Stateful timer that produces [`Time`] snapshots.
///
/// Timestamps are fed in from outside (`tick_at`) so the host's
/// frame-presentation callback decides when a frame happens.
#[derive(Debug, Clone)]
pub struct TimeClock {
    start: Instant,
    last_tick: f64,
    frame_count: u64,
}

impl TimeClock {
    /// Create a new clock, starting the epoch now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_tick: 0.0,
            frame_count: 0,
        }
    }

    /// Seconds since the clock was created.
    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Advance by one frame to the timestamp `now` (seconds since start).
    pub fn tick_at(&mut self, now: f64) -> Time {
        let delta = (now - self.last_tick) as f32;
        let count = self.frame_count;

        self.last_tick = now;
        self.frame_count += 1;

        Time {
            delta,
            elapsed: now,
            frame_count: count,
        }
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_delta_is_measured_from_origin() {
        let mut clock = TimeClock::new();
        let t = clock.tick_at(0.25);
        assert_eq!(t.frame_count, 0);
        assert!((t.delta - 0.25).abs() < 1e-6);
    }

    #[test]
    fn deltas_are_consecutive_differences() {
        let mut clock = TimeClock::new();
        clock.tick_at(1.0);
        let t = clock.tick_at(1.016);
        assert_eq!(t.frame_count, 1);
        assert!((t.delta - 0.016).abs() < 1e-5);
        assert!((t.elapsed - 1.016).abs() < 1e-9);
    }
}
