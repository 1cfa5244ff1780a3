//! Integration tests for the demo screens.
//!
//! Drives real egui frames through each screen and checks the motion the
//! panels go through.

use egui::{Pos2, Rect, Vec2};
use glassmorph_core::{DemoConfig, PanelStyle};
use glassmorph_ui::{LoopingGlassScreen, RevealGlassScreen, Screen, ScreenKind};

// ── Helpers ────────────────────────────────────────────────────

struct Harness {
    ctx: egui::Context,
    size: Vec2,
}

impl Harness {
    fn new(width: f32, height: f32) -> Self {
        Self {
            ctx: egui::Context::default(),
            size: Vec2::new(width, height),
        }
    }

    fn frame(&self, screen: &mut dyn Screen, dt_ms: f64) {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, self.size)),
            ..Default::default()
        };
        let _ = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| screen.show(ui, dt_ms));
        });
    }
}

// ── Screen wiring ──────────────────────────────────────────────

#[test]
fn every_screen_kind_builds_and_renders() {
    let harness = Harness::new(400.0, 800.0);
    let config = DemoConfig::default();
    for kind in ScreenKind::ALL {
        let mut screen = kind.build(&config);
        harness.frame(screen.as_mut(), 0.0);
        harness.frame(screen.as_mut(), 16.0);
        assert!(!screen.title().is_empty());
        assert_eq!(screen.is_animating(), kind == ScreenKind::Loop);
    }
}

#[test]
fn loop_offset_depends_on_measured_panel_and_window() {
    let harness = Harness::new(400.0, 600.0);
    let mut config = DemoConfig::default();
    config.loop_panel = PanelStyle::new(300.0, 100.0, 10.0);

    let mut screen = LoopingGlassScreen::new(&config);
    harness.frame(&mut screen, 0.0);
    // -(600 + 100) / 2
    assert_eq!(screen.sequencer().value(), -350.0);
}

#[test]
fn loop_keeps_cycling_across_frames() {
    let harness = Harness::new(400.0, 800.0);
    let mut screen = LoopingGlassScreen::new(&DemoConfig::default());
    harness.frame(&mut screen, 0.0);

    for _ in 0..4 {
        harness.frame(&mut screen, 4000.0);
        assert_eq!(screen.sequencer().value(), 0.0);
        harness.frame(&mut screen, 4000.0);
        assert_eq!(screen.sequencer().value(), -500.0);
    }
    assert!(screen.is_animating());
}

#[test]
fn reveal_button_replays_from_rest() {
    let harness = Harness::new(400.0, 800.0);
    let mut screen = RevealGlassScreen::new(&DemoConfig::default());
    harness.frame(&mut screen, 0.0);

    screen.trigger();
    harness.frame(&mut screen, 500.0);
    let mid_entry = screen.sequencer().value();
    assert!(mid_entry < -400.0);

    // Pressing again mid-flight starts over from the resting position.
    screen.trigger();
    assert_eq!(screen.sequencer().value(), 0.0);
    harness.frame(&mut screen, 500.0);
    assert_eq!(screen.sequencer().value(), mid_entry);
}

#[test]
fn dropping_a_screen_ends_its_motion() {
    let harness = Harness::new(400.0, 800.0);
    let mut screen = LoopingGlassScreen::new(&DemoConfig::default());
    harness.frame(&mut screen, 0.0);
    let observer = screen.sequencer().offset().clone();
    harness.frame(&mut screen, 1000.0);
    let last = observer.get();

    drop(screen);
    assert_eq!(observer.get(), last);
}
