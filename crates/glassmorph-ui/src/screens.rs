//! The three glass demo screens.
//!
//! Each screen paints the backdrop, then one glass panel. The animated
//! screens own a [`MotionSequencer`] and translate the panel vertically by
//! its offset. The panel's height is fed back to the sequencer after every
//! layout pass, which is what releases a deferred start.

use std::fmt;
use std::str::FromStr;

use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Stroke, Vec2};
use glassmorph_core::{
    DemoConfig, EasedReveal, MotionEvent, MotionEvents, MotionSequencer, PanelExtent, SlideLoop,
    StartOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::backdrop::{paint_backdrop, paint_title};
use crate::glass::GlassPanel;
use crate::theme::GlassTheme;

/// Label shown on every panel.
pub const PANEL_LABEL: &str = "Glassmorphism Effect";

/// Gap between the label and the button on the reveal panel.
const REVEAL_LABEL_LIFT: f32 = 30.0;
const REVEAL_BUTTON_SIZE: Vec2 = Vec2::new(170.0, 40.0);

/// A full-window demo screen.
pub trait Screen {
    /// Human-readable screen name.
    fn title(&self) -> &'static str;

    /// Advance animations by `dt_ms` and draw into `ui`.
    fn show(&mut self, ui: &mut egui::Ui, dt_ms: f64);

    /// Whether the screen needs more frames without user input.
    fn is_animating(&self) -> bool {
        false
    }
}

/// Which demo to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenKind {
    /// Static frosted panel.
    #[default]
    Static,
    /// Panel sliding in and out forever.
    Loop,
    /// Panel moved by a button with eased timing.
    Reveal,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 3] = [ScreenKind::Static, ScreenKind::Loop, ScreenKind::Reveal];

    /// Build a fresh screen. The previous screen of the same kind, if any,
    /// is not reused: switching screens remounts them.
    pub fn build(self, config: &DemoConfig) -> Box<dyn Screen> {
        match self {
            ScreenKind::Static => Box::new(StaticGlassScreen::new(config)),
            ScreenKind::Loop => Box::new(LoopingGlassScreen::new(config)),
            ScreenKind::Reveal => Box::new(RevealGlassScreen::new(config)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenKind::Static => "static",
            ScreenKind::Loop => "loop",
            ScreenKind::Reveal => "reveal",
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(ScreenKind::Static),
            "loop" => Ok(ScreenKind::Loop),
            "reveal" => Ok(ScreenKind::Reveal),
            other => Err(format!(
                "unknown screen '{other}', expected one of: static, loop, reveal"
            )),
        }
    }
}

fn log_events(screen: &str, events: &MotionEvents) {
    for event in events {
        match event {
            MotionEvent::SegmentCompleted { index } => trace!(screen, index, "segment completed"),
            other => debug!(screen, event = ?other, "motion event"),
        }
    }
}

fn paint_label(painter: &egui::Painter, pos: Pos2, size: f32, color: Color32) {
    painter.text(pos, Align2::CENTER_CENTER, PANEL_LABEL, FontId::proportional(size), color);
}

fn report_layout(sequencer: &mut MotionSequencer, container: Rect, panel: Rect) {
    if sequencer.update_layout(container.height() as f64, PanelExtent(panel.height() as f64)) {
        debug!(panel_height = panel.height(), "panel measured, deferred run started");
    }
}

// ── Static ──────────────────────────────────────────────────────

/// A frosted panel centered over the backdrop.
pub struct StaticGlassScreen {
    panel: GlassPanel,
}

impl StaticGlassScreen {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            panel: GlassPanel::from_style(&config.static_panel)
                .border(Stroke::new(GlassTheme::STROKE_HAIRLINE, GlassTheme::glass_border()))
                .reduced_transparency(config.reduced_transparency),
        }
    }
}

impl Screen for StaticGlassScreen {
    fn title(&self) -> &'static str {
        "Static glass"
    }

    fn show(&mut self, ui: &mut egui::Ui, _dt_ms: f64) {
        let rect = ui.max_rect();
        paint_backdrop(ui.painter(), rect);
        self.panel.show(ui, rect.center(), |ui| {
            paint_label(
                ui.painter(),
                ui.max_rect().center(),
                GlassTheme::FONT_PANEL,
                GlassTheme::text_light(),
            );
        });
    }
}

// ── Looping ─────────────────────────────────────────────────────

/// A panel that slides in from above and back out, forever.
pub struct LoopingGlassScreen {
    panel: GlassPanel,
    sequencer: MotionSequencer,
}

impl LoopingGlassScreen {
    /// Mount the screen. The loop is requested immediately and begins once
    /// the panel has been measured.
    pub fn new(config: &DemoConfig) -> Self {
        let mut sequencer = MotionSequencer::new();
        let outcome = sequencer.start(config.slide_loop);
        debug!(?outcome, "looping screen mounted");
        Self {
            panel: GlassPanel::from_style(&config.loop_panel)
                .tint(GlassTheme::glass_frosted())
                .reduced_transparency(config.reduced_transparency),
            sequencer,
        }
    }

    pub fn sequencer(&self) -> &MotionSequencer {
        &self.sequencer
    }

    /// Break the loop at the next segment boundary.
    pub fn stop(&mut self) -> bool {
        self.sequencer.stop()
    }

    /// Resume looping after a stop.
    pub fn resume(&mut self, slide: SlideLoop) -> StartOutcome {
        self.sequencer.start(slide)
    }
}

impl Screen for LoopingGlassScreen {
    fn title(&self) -> &'static str {
        "Looping glass"
    }

    fn show(&mut self, ui: &mut egui::Ui, dt_ms: f64) {
        log_events(self.title(), &self.sequencer.tick(dt_ms));

        let rect = ui.max_rect();
        paint_backdrop(ui.painter(), rect);
        paint_title(ui.painter(), rect, PANEL_LABEL);

        let center = rect.center() + Vec2::new(0.0, self.sequencer.value() as f32);
        let response = self.panel.show(ui, center, |ui| {
            paint_label(
                ui.painter(),
                ui.max_rect().center(),
                GlassTheme::FONT_PANEL_LG,
                GlassTheme::text_dark(),
            );
        });

        report_layout(&mut self.sequencer, rect, response.rect);
    }

    fn is_animating(&self) -> bool {
        self.sequencer.is_running() || self.sequencer.is_deferred()
    }
}

// ── Reveal ──────────────────────────────────────────────────────

/// A panel with a button that plays an eased out-hold-back move.
pub struct RevealGlassScreen {
    panel: GlassPanel,
    reveal: EasedReveal,
    sequencer: MotionSequencer,
}

impl RevealGlassScreen {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            panel: GlassPanel::from_style(&config.reveal_panel)
                .tint(GlassTheme::glass_frosted())
                .reduced_transparency(config.reduced_transparency),
            reveal: config.reveal,
            sequencer: MotionSequencer::new(),
        }
    }

    pub fn sequencer(&self) -> &MotionSequencer {
        &self.sequencer
    }

    /// What the button does: replay the reveal from the start.
    pub fn trigger(&mut self) -> StartOutcome {
        let outcome = self.sequencer.restart(self.reveal);
        info!(?outcome, "reveal animation triggered");
        outcome
    }
}

impl Screen for RevealGlassScreen {
    fn title(&self) -> &'static str {
        "Eased reveal"
    }

    fn show(&mut self, ui: &mut egui::Ui, dt_ms: f64) {
        log_events(self.title(), &self.sequencer.tick(dt_ms));

        let rect = ui.max_rect();
        paint_backdrop(ui.painter(), rect);

        let center = rect.center() + Vec2::new(0.0, self.sequencer.value() as f32);
        let response = self.panel.show(ui, center, |ui| {
            let inner = ui.max_rect();
            paint_label(
                ui.painter(),
                inner.center() - Vec2::new(0.0, REVEAL_LABEL_LIFT),
                GlassTheme::FONT_PANEL_LG,
                GlassTheme::text_dark(),
            );
            let button = egui::Button::new(
                RichText::new("Start Animation")
                    .size(GlassTheme::FONT_BUTTON)
                    .color(GlassTheme::text_light()),
            )
            .fill(GlassTheme::button_fill())
            .rounding(GlassTheme::RADIUS_BUTTON);
            let button_rect = Rect::from_center_size(
                inner.center() + Vec2::new(0.0, REVEAL_LABEL_LIFT),
                REVEAL_BUTTON_SIZE,
            );
            ui.put(button_rect, button).clicked()
        });

        if response.inner {
            self.trigger();
        }
        report_layout(&mut self.sequencer, rect, response.rect);
    }

    fn is_animating(&self) -> bool {
        self.sequencer.is_running() || self.sequencer.is_deferred()
    }
}
