//! Frame-driven motion sequencer.
//!
//! [`MotionSequencer`] drives one [`AnimatedOffset`] through a
//! [`MotionRun`]. The host calls [`MotionSequencer::tick`] once per display
//! frame with the elapsed time; all state changes happen inside `tick`,
//! `start` and the layout callback, so there is nothing to synchronize.
//!
//! At most one run is in flight per sequencer. Runs that depend on the
//! panel's measured height are deferred until a layout pass reports it.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::layout::{Choreography, PanelExtent, PanelLayout};
use crate::motion::{AnimatedOffset, MotionRun};

/// Result of asking the sequencer to start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The offset snapped to the run's start and motion begins next tick.
    Started,
    /// The panel has not been measured yet; the run starts on the first
    /// layout pass that reports a height.
    Deferred,
    /// A run is already active or pending; nothing changed.
    Ignored,
}

/// Notable transitions reported by [`MotionSequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// Segment `index` reached its target.
    SegmentCompleted { index: usize },
    /// A repeating run wrapped around; `cycle` counts completed passes.
    CycleCompleted { cycle: u64 },
    /// A one-shot run played its last segment.
    Finished,
    /// The run ended at a segment boundary after [`MotionSequencer::stop`].
    Stopped,
}

/// Events from a single tick. Most frames produce none.
pub type MotionEvents = SmallVec<[MotionEvent; 4]>;

/// Playback position inside the active run.
#[derive(Debug, Clone)]
struct ActiveRun {
    run: MotionRun,
    segment: usize,
    segment_from: f64,
    segment_elapsed_ms: f64,
    cycle: u64,
}

impl ActiveRun {
    fn new(run: MotionRun) -> Self {
        let start = run.start_offset;
        Self {
            run,
            segment: 0,
            segment_from: start,
            segment_elapsed_ms: 0.0,
            cycle: 0,
        }
    }

    fn rewind(&mut self) {
        self.segment = 0;
        self.segment_from = self.run.start_offset;
        self.segment_elapsed_ms = 0.0;
    }
}

/// Drives an [`AnimatedOffset`] through timed, eased segments.
pub struct MotionSequencer {
    offset: AnimatedOffset,
    layout: PanelLayout,
    active: Option<ActiveRun>,
    deferred: Option<Box<dyn Choreography>>,
    stop_requested: bool,
}

impl MotionSequencer {
    /// Create a sequencer for a freshly mounted panel. The offset starts at
    /// zero and no layout is known yet.
    pub fn new() -> Self {
        Self::with_offset(AnimatedOffset::new(0.0))
    }

    /// Create a sequencer that writes into an existing offset handle.
    pub fn with_offset(offset: AnimatedOffset) -> Self {
        Self {
            offset,
            layout: PanelLayout::default(),
            active: None,
            deferred: None,
            stop_requested: false,
        }
    }

    /// The driven offset. Clones observe every update.
    #[inline]
    pub fn offset(&self) -> &AnimatedOffset {
        &self.offset
    }

    /// Current offset value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.offset.get()
    }

    /// Latest reported layout.
    #[inline]
    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// Whether a run is currently in flight.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a start is waiting for the panel to be measured.
    #[inline]
    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Whether a stop has been requested and not yet honored.
    #[inline]
    pub fn is_stopping(&self) -> bool {
        self.stop_requested
    }

    /// Index of the playing segment and its progress fraction in [0, 1].
    pub fn progress(&self) -> Option<(usize, f64)> {
        let active = self.active.as_ref()?;
        let seg = active.run.segments.get(active.segment)?;
        let duration = seg.effective_duration_ms();
        let fraction = if duration > 0.0 {
            (active.segment_elapsed_ms / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some((active.segment, fraction))
    }

    /// Start a run unless one is already active or pending.
    ///
    /// If the panel has not been measured, the request is kept and started
    /// by the first [`update_layout`](Self::update_layout) that reports a
    /// height. Calling `start` while running leaves the trajectory untouched.
    pub fn start<C>(&mut self, choreography: C) -> StartOutcome
    where
        C: Choreography + 'static,
    {
        if self.active.is_some() || self.deferred.is_some() {
            trace!(choreography = choreography.name(), "start ignored, run in flight");
            return StartOutcome::Ignored;
        }
        if !self.layout.panel_extent.is_known() {
            debug!(
                choreography = choreography.name(),
                "panel not measured yet, deferring start"
            );
            self.deferred = Some(Box::new(choreography));
            return StartOutcome::Deferred;
        }
        self.begin(&choreography);
        StartOutcome::Started
    }

    /// Replace whatever is running (or pending) with a new run.
    pub fn restart<C>(&mut self, choreography: C) -> StartOutcome
    where
        C: Choreography + 'static,
    {
        self.cancel();
        self.start(choreography)
    }

    /// Record a layout pass. Starts a deferred run once the panel height is
    /// known; returns `true` if that happened.
    ///
    /// An active run keeps the layout it was composed with.
    pub fn update_layout(&mut self, container_height: f64, panel_extent: PanelExtent) -> bool {
        let layout = PanelLayout::new(container_height, panel_extent);
        if layout != self.layout {
            trace!(
                container_height,
                panel_height = panel_extent.height(),
                "layout updated"
            );
            self.layout = layout;
        }
        if !panel_extent.is_known() {
            return false;
        }
        match self.deferred.take() {
            Some(choreography) => {
                self.begin(choreography.as_ref());
                true
            }
            None => false,
        }
    }

    /// End the run at the next segment boundary, including the boundary at
    /// the end of a repeating cycle. Drops a deferred start.
    ///
    /// Returns `false` if there was nothing to stop.
    pub fn stop(&mut self) -> bool {
        if self.deferred.take().is_some() {
            debug!("deferred start dropped by stop");
            return true;
        }
        if self.active.is_some() {
            debug!("stop requested, finishing at next segment boundary");
            self.stop_requested = true;
            return true;
        }
        false
    }

    /// End the run immediately, leaving the offset where it is.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            debug!(offset = self.offset.get(), "motion run cancelled");
        }
        self.deferred = None;
        self.stop_requested = false;
    }

    /// Advance the active run by `dt_ms` milliseconds.
    ///
    /// Crosses as many segment boundaries as the elapsed time covers, so a
    /// long frame never leaves the offset behind. Negative and non-finite
    /// deltas are treated as zero.
    pub fn tick(&mut self, dt_ms: f64) -> MotionEvents {
        let mut events = MotionEvents::new();
        let Some(active) = self.active.as_mut() else {
            return events;
        };

        let mut budget = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let total = active.run.total_duration_ms();

        // Whole cycles bring a looping run back to the same position.
        if active.run.repeat && !self.stop_requested && total > 0.0 && budget >= total {
            let whole = (budget / total).floor();
            budget %= total;
            active.cycle = active.cycle.saturating_add(whole as u64);
            events.push(MotionEvent::CycleCompleted {
                cycle: active.cycle,
            });
            trace!(skipped = whole, "skipped whole motion cycles");
        }

        let ended = loop {
            let Some(seg) = active.run.segments.get(active.segment).copied() else {
                if active.run.repeat && !self.stop_requested {
                    active.cycle = active.cycle.saturating_add(1);
                    events.push(MotionEvent::CycleCompleted {
                        cycle: active.cycle,
                    });
                    active.rewind();
                    self.offset.set(active.run.start_offset);
                    if total <= 0.0 {
                        // Zero-length cycles wrap at most once per frame.
                        break None;
                    }
                    continue;
                }
                break Some(if self.stop_requested {
                    MotionEvent::Stopped
                } else {
                    MotionEvent::Finished
                });
            };

            let remaining = seg.effective_duration_ms() - active.segment_elapsed_ms;
            if budget >= remaining {
                budget -= remaining.max(0.0);
                self.offset.set(seg.target_offset);
                events.push(MotionEvent::SegmentCompleted {
                    index: active.segment,
                });
                active.segment += 1;
                active.segment_from = seg.target_offset;
                active.segment_elapsed_ms = 0.0;
                if self.stop_requested {
                    break Some(MotionEvent::Stopped);
                }
                continue;
            }

            active.segment_elapsed_ms += budget;
            self.offset
                .set(seg.value_at(active.segment_from, active.segment_elapsed_ms));
            break None;
        };

        if let Some(event) = ended {
            debug!(
                offset = self.offset.get(),
                cycles = active.cycle,
                ?event,
                "motion run ended"
            );
            events.push(event);
            self.active = None;
            self.stop_requested = false;
        }
        events
    }

    /// Compose and begin a run from the current layout.
    fn begin(&mut self, choreography: &dyn Choreography) {
        let run = choreography.compose(&self.layout);
        if run
            .segments
            .iter()
            .any(|seg| seg.duration_ms.is_nan() || seg.duration_ms < 0.0)
        {
            warn!(%run, "run has negative or NaN durations, treating them as instant");
        }
        if run.repeat && !run.is_round_trip() {
            debug!(%run, "repeating run does not return to its start, loop will jump");
        }
        debug!(
            choreography = choreography.name(),
            %run,
            container_height = self.layout.container_height,
            panel_height = self.layout.panel_extent.height(),
            "motion run started"
        );
        self.offset.set(run.start_offset);
        self.active = Some(ActiveRun::new(run));
        self.stop_requested = false;
    }
}

impl Default for MotionSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MotionSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionSequencer")
            .field("offset", &self.offset.get())
            .field("layout", &self.layout)
            .field("active", &self.active)
            .field("deferred", &self.deferred.as_ref().map(|c| c.name()))
            .field("stop_requested", &self.stop_requested)
            .finish()
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::layout::{EasedReveal, SlideLoop};
    use crate::motion::MotionSegment;
    use proptest::prelude::*;

    fn measured() -> MotionSequencer {
        let mut seq = MotionSequencer::new();
        seq.update_layout(800.0, PanelExtent(200.0));
        seq
    }

    fn advance(seq: &mut MotionSequencer, total_ms: f64, step_ms: f64) {
        let mut t = 0.0;
        while t + step_ms <= total_ms + 1e-9 {
            seq.tick(step_ms);
            t += step_ms;
        }
    }

    #[test]
    fn test_start_teleports_to_start_offset() {
        let mut seq = measured();
        assert_eq!(seq.start(SlideLoop::default()), StartOutcome::Started);
        assert_eq!(seq.value(), -500.0);
        assert!(seq.is_running());
    }

    #[test]
    fn test_slide_loop_scenario() {
        let mut seq = measured();
        seq.start(SlideLoop::default());

        seq.tick(2000.0);
        assert_eq!(seq.value(), -250.0);
        seq.tick(2000.0);
        assert_eq!(seq.value(), 0.0);
        let events = seq.tick(4000.0);
        assert_eq!(seq.value(), -500.0);
        assert!(events.contains(&MotionEvent::CycleCompleted { cycle: 1 }));
        assert!(seq.is_running());
    }

    #[test]
    fn test_frame_stepping_matches_reference() {
        let mut seq = measured();
        seq.start(SlideLoop::default());
        let reference = SlideLoop::default().compose(&seq.layout());

        let step = 1000.0 / 60.0;
        let mut elapsed = 0.0;
        for _ in 0..1000 {
            seq.tick(step);
            elapsed += step;
            assert!((seq.value() - reference.value_at(elapsed)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut seq = measured();
        seq.start(SlideLoop::default());
        seq.tick(1000.0);
        let before = seq.value();

        let other = MotionRun::new(99.0).then(MotionSegment::linear(100.0, 10.0));
        assert_eq!(seq.start(other), StartOutcome::Ignored);
        assert_eq!(seq.value(), before);

        seq.tick(1000.0);
        assert_eq!(seq.value(), -250.0);
    }

    #[test]
    fn test_deferred_until_measured() {
        let mut seq = MotionSequencer::new();
        seq.offset().set(12.0);
        assert_eq!(seq.start(SlideLoop::default()), StartOutcome::Deferred);
        assert!(seq.is_deferred());
        assert!(!seq.is_running());

        seq.tick(500.0);
        assert!(!seq.update_layout(800.0, PanelExtent::UNMEASURED));
        assert_eq!(seq.value(), 12.0);

        assert!(seq.update_layout(800.0, PanelExtent(200.0)));
        assert!(seq.is_running());
        assert_eq!(seq.value(), -500.0);

        // Later layout passes do not start a second run.
        seq.tick(1000.0);
        assert!(!seq.update_layout(800.0, PanelExtent(200.0)));
        assert_eq!(seq.value(), -375.0);
    }

    #[test]
    fn test_start_while_deferred_is_ignored() {
        let mut seq = MotionSequencer::new();
        seq.start(SlideLoop::default());
        assert_eq!(seq.start(EasedReveal::default()), StartOutcome::Ignored);
        seq.update_layout(800.0, PanelExtent(200.0));
        assert_eq!(seq.value(), -500.0);
    }

    #[test]
    fn test_one_shot_finishes_at_final_value() {
        let mut seq = measured();
        seq.start(EasedReveal::default());
        assert_eq!(seq.value(), 0.0);

        seq.tick(1000.0);
        assert_eq!(seq.value(), -500.0);
        seq.tick(2000.0);
        assert_eq!(seq.value(), -500.0);
        let events = seq.tick(1500.0);
        assert_eq!(seq.value(), 0.0);
        assert_eq!(events.last(), Some(&MotionEvent::Finished));
        assert!(!seq.is_running());

        // Finishing frees the sequencer for another run.
        assert_eq!(seq.start(EasedReveal::default()), StartOutcome::Started);
    }

    #[test]
    fn test_eased_segments_shape() {
        let mut seq = measured();
        seq.start(EasedReveal::default());
        seq.tick(500.0);
        // Decelerating entry has covered well over half the distance.
        assert!(seq.value() < -400.0);
        seq.tick(2500.0 + 500.0);
        // Accelerating exit has covered less than half of the way back.
        assert!(seq.value() < -250.0);
    }

    #[test]
    fn test_restart_supersedes() {
        let mut seq = measured();
        seq.start(EasedReveal::default());
        seq.tick(1500.0);
        assert_eq!(seq.restart(EasedReveal::default()), StartOutcome::Started);
        assert_eq!(seq.value(), 0.0);
        assert_eq!(seq.progress(), Some((0, 0.0)));
    }

    #[test]
    fn test_stop_at_segment_boundary() {
        let mut seq = measured();
        seq.start(SlideLoop::default());
        seq.tick(1000.0);
        assert!(seq.stop());
        assert!(seq.is_stopping());

        let events = seq.tick(1000.0);
        assert!(events.is_empty());
        assert_eq!(seq.value(), -250.0);

        let events = seq.tick(5000.0);
        assert_eq!(
            events.as_slice(),
            &[
                MotionEvent::SegmentCompleted { index: 0 },
                MotionEvent::Stopped
            ]
        );
        assert_eq!(seq.value(), 0.0);
        assert!(!seq.is_running());
        assert!(!seq.stop());
    }

    #[test]
    fn test_cancel_freezes_offset() {
        let mut seq = measured();
        seq.start(SlideLoop::default());
        seq.tick(1000.0);
        seq.cancel();
        assert!(!seq.is_running());
        seq.tick(1000.0);
        assert_eq!(seq.value(), -375.0);
    }

    #[test]
    fn test_instant_segments_jump() {
        let mut seq = measured();
        let run = MotionRun::new(0.0)
            .then(MotionSegment::linear(10.0, 0.0))
            .then(MotionSegment::linear(20.0, -5.0))
            .then(MotionSegment::linear(30.0, f64::NAN));
        seq.start(run);
        let events = seq.tick(0.0);
        assert_eq!(seq.value(), 30.0);
        assert_eq!(events.last(), Some(&MotionEvent::Finished));
    }

    #[test]
    fn test_zero_length_repeat_does_not_spin() {
        let mut seq = measured();
        let run = MotionRun::new(1.0)
            .then(MotionSegment::linear(2.0, 0.0))
            .repeating(true);
        seq.start(run);
        for cycle in 1..=3 {
            let events = seq.tick(16.0);
            assert!(events.contains(&MotionEvent::CycleCompleted { cycle }));
        }
        assert!(seq.is_running());
    }

    #[test]
    fn test_long_frame_skips_whole_cycles() {
        let mut seq = measured();
        seq.start(SlideLoop::default());
        seq.tick(8000.0 * 1000.0 + 2000.0);
        assert_eq!(seq.value(), -250.0);
    }

    #[test]
    fn test_non_finite_and_huge_frames() {
        let mut seq = measured();
        seq.start(SlideLoop::default());
        seq.tick(1000.0);
        assert!(seq.tick(f64::INFINITY).is_empty());
        assert!(seq.tick(f64::INFINITY).is_empty());
        assert_eq!(seq.value(), -375.0);

        // Cycle counting saturates instead of overflowing.
        for _ in 0..3 {
            seq.tick(f64::MAX);
        }
        assert!(seq.is_running());
        let value = seq.value();
        assert!((-500.0..=0.0).contains(&value));
    }

    #[test]
    fn test_hold_segment_is_flat() {
        let mut seq = measured();
        let run = MotionRun::new(0.0)
            .then(MotionSegment::new(-100.0, 100.0, Easing::EASE_OUT))
            .then(MotionSegment::hold(-100.0, 100.0));
        seq.start(run);
        seq.tick(100.0);
        for _ in 0..9 {
            seq.tick(10.0);
            assert_eq!(seq.value(), -100.0);
        }
    }

    #[test]
    fn test_ticks_without_run_are_harmless() {
        let mut seq = MotionSequencer::new();
        assert!(seq.tick(16.0).is_empty());
        assert_eq!(seq.value(), 0.0);
        assert_eq!(seq.progress(), None);
    }

    proptest! {
        #[test]
        fn periodic_under_frame_stepping(t in 0.0f64..16_000.0) {
            let mut a = measured();
            a.start(SlideLoop::default());
            a.tick(t);
            let mut b = measured();
            b.start(SlideLoop::default());
            b.tick(t);
            b.tick(8000.0);
            prop_assert!((a.value() - b.value()).abs() < 1e-6);
        }

        #[test]
        fn split_frames_match_single_frame(t in 0.0f64..8000.0, split in 0.0f64..1.0) {
            let mut whole = measured();
            whole.start(EasedReveal::default());
            whole.tick(t);

            let mut parts = measured();
            parts.start(EasedReveal::default());
            parts.tick(t * split);
            parts.tick(t - t * split);
            prop_assert!((whole.value() - parts.value()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_advance_helper_reaches_end() {
        let mut seq = measured();
        seq.start(EasedReveal::default());
        advance(&mut seq, 4000.0, 10.0);
        assert_eq!(seq.value(), 0.0);
        assert!(!seq.is_running());
    }
}
