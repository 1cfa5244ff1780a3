//! Motion data model: segments, runs and the shared animated offset.
//!
//! A [`MotionRun`] is a start offset followed by an ordered list of
//! [`MotionSegment`]s. Each segment moves the offset from wherever the
//! previous segment left it to its own target.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::easing::{lerp_eased, Easing};

// ── Segment ─────────────────────────────────────────────────────

/// One timed move of the offset toward `target_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSegment {
    /// Offset reached at the end of the segment.
    pub target_offset: f64,
    /// Segment length in milliseconds. Negative or NaN means zero.
    pub duration_ms: f64,
    /// Timing curve for this segment.
    #[serde(default)]
    pub easing: Easing,
}

impl MotionSegment {
    pub fn new(target_offset: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            target_offset,
            duration_ms,
            easing,
        }
    }

    /// A constant-velocity move.
    pub fn linear(target_offset: f64, duration_ms: f64) -> Self {
        Self::new(target_offset, duration_ms, Easing::Linear)
    }

    /// Stay at `offset` for `duration_ms`.
    pub fn hold(offset: f64, duration_ms: f64) -> Self {
        Self::new(offset, duration_ms, Easing::Linear)
    }

    /// Duration clamped to a usable value: NaN and negatives become 0.
    #[inline]
    pub fn effective_duration_ms(&self) -> f64 {
        if self.duration_ms.is_nan() || self.duration_ms < 0.0 {
            0.0
        } else {
            self.duration_ms
        }
    }

    /// Whether the segment resolves instantly, without motion frames.
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.effective_duration_ms() <= 0.0
    }

    /// Offset after `elapsed_ms` of this segment, starting from `from`.
    pub fn value_at(&self, from: f64, elapsed_ms: f64) -> f64 {
        let duration = self.effective_duration_ms();
        if duration <= 0.0 || elapsed_ms >= duration {
            return self.target_offset;
        }
        if elapsed_ms <= 0.0 {
            return from;
        }
        lerp_eased(self.easing, from, self.target_offset, elapsed_ms / duration)
    }
}

// ── Run ─────────────────────────────────────────────────────────

/// An ordered sequence of segments played from `start_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionRun {
    /// Value the offset snaps to when the run (or each repeat) begins.
    pub start_offset: f64,
    /// Segments played in order.
    pub segments: Vec<MotionSegment>,
    /// Restart from `start_offset` after the last segment, forever.
    #[serde(default)]
    pub repeat: bool,
}

impl MotionRun {
    /// Create an empty, non-repeating run starting at `start_offset`.
    pub fn new(start_offset: f64) -> Self {
        Self {
            start_offset,
            segments: Vec::new(),
            repeat: false,
        }
    }

    /// Append a segment.
    pub fn then(mut self, segment: MotionSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Set whether the run loops.
    pub fn repeating(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Length of one pass through all segments.
    pub fn total_duration_ms(&self) -> f64 {
        self.segments
            .iter()
            .map(MotionSegment::effective_duration_ms)
            .sum()
    }

    /// Offset left behind by the last segment.
    pub fn end_offset(&self) -> f64 {
        self.segments
            .last()
            .map_or(self.start_offset, |seg| seg.target_offset)
    }

    /// Whether the last segment returns to the start offset, so looping
    /// produces no visible jump.
    pub fn is_round_trip(&self) -> bool {
        (self.end_offset() - self.start_offset).abs() < 1e-9
    }

    /// Evaluate the run `elapsed_ms` after it started.
    ///
    /// Repeating runs wrap by their cycle length; one-shot runs hold their
    /// final value once complete.
    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        let mut t = if elapsed_ms.is_nan() {
            0.0
        } else {
            elapsed_ms.max(0.0)
        };
        let total = self.total_duration_ms();
        if self.repeat && total > 0.0 && t >= total {
            t %= total;
        }

        let mut from = self.start_offset;
        for seg in &self.segments {
            let duration = seg.effective_duration_ms();
            if t < duration {
                return seg.value_at(from, t);
            }
            t -= duration;
            from = seg.target_offset;
        }
        from
    }
}

impl fmt::Display for MotionRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MotionRun(from {:.1}, {} segments, {:.0}ms{})",
            self.start_offset,
            self.segments.len(),
            self.total_duration_ms(),
            if self.repeat { ", repeating" } else { "" }
        )
    }
}

// ── Animated offset ─────────────────────────────────────────────

/// A shared, observable offset value.
///
/// Clones observe the same value. The sequencer that owns it is the only
/// writer while a run is active; renderers read it every frame.
#[derive(Debug, Clone, Default)]
pub struct AnimatedOffset {
    value: Rc<Cell<f64>>,
}

impl AnimatedOffset {
    pub fn new(value: f64) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.value.set(value);
    }
}

// ── Tests ───────────────────────────────────────────────────────
