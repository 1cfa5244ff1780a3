//! Integration tests for motion sequencing.
//!
//! Exercises layout measurement, choreography composition, the sequencer
//! and the frame clock together.

use std::time::{Duration, Instant};

use glassmorph_core::{
    AnimatedOffset, Choreography, DemoConfig, EasedReveal, Easing, FrameClock, MotionEvent,
    MotionRun, MotionSegment, MotionSequencer, PanelExtent, PanelLayout, SlideLoop, StartOutcome,
};

// ── Helpers ────────────────────────────────────────────────────

const SCREEN_HEIGHT: f64 = 800.0;

fn mounted_loop() -> MotionSequencer {
    let mut seq = MotionSequencer::new();
    assert_eq!(seq.start(SlideLoop::default()), StartOutcome::Deferred);
    seq.update_layout(SCREEN_HEIGHT, PanelExtent(200.0));
    seq
}

// ── Looping slide ──────────────────────────────────────────────

#[test]
fn slide_loop_hits_reference_points() {
    let mut seq = mounted_loop();
    assert_eq!(seq.value(), -500.0);

    seq.tick(2000.0);
    assert_eq!(seq.value(), -250.0);
    seq.tick(2000.0);
    assert_eq!(seq.value(), 0.0);
    seq.tick(4000.0);
    assert_eq!(seq.value(), -500.0);
}

#[test]
fn slide_loop_is_periodic_at_sixty_fps() {
    let mut seq = mounted_loop();
    let frame = 1000.0 / 60.0;
    let cycle_frames = 480; // 8000ms at 60fps

    let mut first_cycle = Vec::with_capacity(cycle_frames);
    for _ in 0..cycle_frames {
        seq.tick(frame);
        first_cycle.push(seq.value());
    }
    for expected in first_cycle {
        seq.tick(frame);
        assert!((seq.value() - expected).abs() < 1e-6);
    }
}

#[test]
fn observers_see_every_update() {
    let offset = AnimatedOffset::new(0.0);
    let observer = offset.clone();
    let mut seq = MotionSequencer::with_offset(offset);
    seq.update_layout(SCREEN_HEIGHT, PanelExtent(200.0));
    seq.start(SlideLoop { travel_ms: 1000.0 });

    seq.tick(500.0);
    assert_eq!(observer.get(), -250.0);
}

// ── Deferred start ─────────────────────────────────────────────

#[test]
fn deferred_start_runs_exactly_once() {
    let mut seq = MotionSequencer::new();
    seq.offset().set(3.0);
    assert_eq!(seq.start(SlideLoop::default()), StartOutcome::Deferred);

    for _ in 0..5 {
        seq.tick(16.0);
        seq.update_layout(SCREEN_HEIGHT, PanelExtent::UNMEASURED);
    }
    assert_eq!(seq.value(), 3.0);

    let mut started = 0;
    for _ in 0..5 {
        if seq.update_layout(SCREEN_HEIGHT, PanelExtent(200.0)) {
            started += 1;
        }
        seq.tick(16.0);
    }
    assert_eq!(started, 1);
    assert!(seq.is_running());
}

// ── Eased reveal ───────────────────────────────────────────────

#[test]
fn eased_reveal_segments_are_continuous() {
    let layout = PanelLayout::new(SCREEN_HEIGHT, PanelExtent(250.0));
    let run = EasedReveal::default().compose(&layout);

    for boundary in [1000.0, 3000.0] {
        let before = run.value_at(boundary - 1e-6);
        let after = run.value_at(boundary);
        assert!((before - after).abs() < 1e-3, "jump at {boundary}ms");
    }
    assert_eq!(run.value_at(0.0), 0.0);
    assert_eq!(run.value_at(4000.0), 0.0);
}

#[test]
fn sequencer_matches_run_reference_for_reveal() {
    let mut seq = MotionSequencer::new();
    seq.update_layout(SCREEN_HEIGHT, PanelExtent(250.0));
    seq.start(EasedReveal::default());
    let reference = EasedReveal::default().compose(&seq.layout());

    let mut elapsed = 0.0;
    while seq.is_running() {
        seq.tick(7.0);
        elapsed += 7.0;
        assert!(
            (seq.value() - reference.value_at(elapsed)).abs() < 1e-6,
            "diverged at {elapsed}ms"
        );
    }
    assert_eq!(seq.value(), 0.0);
}

#[test]
fn configured_timings_flow_into_runs() {
    let config = DemoConfig::from_json(
        br#"{"version": 1, "reveal": {"enter_ms": 200, "hold_ms": 0, "exit_ms": 200}}"#,
    )
    .unwrap();
    let mut seq = MotionSequencer::new();
    seq.update_layout(SCREEN_HEIGHT, PanelExtent(250.0));
    seq.start(config.reveal);

    let events = seq.tick(400.0);
    assert_eq!(events.last(), Some(&MotionEvent::Finished));
    assert_eq!(seq.value(), 0.0);
}

// ── Guards ─────────────────────────────────────────────────────

#[test]
fn start_during_run_leaves_trajectory_unchanged() {
    let mut guarded = mounted_loop();
    let mut reference = mounted_loop();

    for i in 0..100 {
        guarded.tick(33.0);
        reference.tick(33.0);
        if i % 10 == 0 {
            let hijack = MotionRun::new(1e6).then(MotionSegment::new(0.0, 1.0, Easing::EASE_IN));
            assert_eq!(guarded.start(hijack), StartOutcome::Ignored);
        }
        assert_eq!(guarded.value(), reference.value());
    }
}

#[test]
fn stop_breaks_infinite_loop() {
    let mut seq = mounted_loop();
    seq.tick(6000.0);
    seq.stop();
    let events = seq.tick(10_000.0);
    assert!(events.contains(&MotionEvent::Stopped));
    assert_eq!(seq.value(), -500.0);
    assert!(!seq.is_running());
}

#[test]
fn frame_clock_drives_sequencer() {
    let mut clock = FrameClock::new(Duration::from_millis(250));
    let mut seq = mounted_loop();
    let t0 = Instant::now();

    seq.tick(clock.frame_at(t0));
    assert_eq!(seq.value(), -500.0);
    seq.tick(clock.frame_at(t0 + Duration::from_millis(200)));
    assert!((seq.value() - -475.0).abs() < 1e-9);
    // A stalled window resumes without skipping ahead.
    seq.tick(clock.frame_at(t0 + Duration::from_secs(60)));
    assert!((seq.value() - -443.75).abs() < 1e-9);
}
