//! Frame clock: turns host frame timestamps into per-frame deltas.

use std::time::{Duration, Instant};

/// Default cap on a single frame delta.
pub const DEFAULT_MAX_FRAME_GAP: Duration = Duration::from_millis(250);

/// Measures elapsed time between consecutive display frames.
///
/// The first frame after creation or [`reset`](Self::reset) reports zero.
/// Deltas are capped at `max_gap` so a window that was hidden or stalled
/// resumes where it left off instead of jumping ahead.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_gap: Duration,
}

impl FrameClock {
    pub fn new(max_gap: Duration) -> Self {
        Self {
            last: None,
            max_gap,
        }
    }

    /// Milliseconds since the previous frame.
    pub fn frame_at(&mut self, now: Instant) -> f64 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).min(self.max_gap),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt.as_secs_f64() * 1000.0
    }

    /// Milliseconds since the previous frame, measured now.
    pub fn frame(&mut self) -> f64 {
        self.frame_at(Instant::now())
    }

    /// Forget the previous frame.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn max_gap(&self) -> Duration {
        self.max_gap
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_GAP)
    }
}
