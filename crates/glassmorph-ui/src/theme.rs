//! Glass theme: the translucent palette and sizes shared by every screen.

use egui::{Color32, Rounding, Stroke, Vec2};

/// Central theme for the glass demos.
pub struct GlassTheme;

impl GlassTheme {
    // ── Typography ─────────────────────────────────────────────
    pub const FONT_BUTTON: f32 = 16.0;
    pub const FONT_PANEL: f32 = 18.0; // static panel label
    pub const FONT_PANEL_LG: f32 = 22.0; // animated panel label
    pub const FONT_TITLE: f32 = 50.0; // backdrop title

    // ── Spacing ────────────────────────────────────────────────
    pub const SPACE_SM: f32 = 10.0;
    pub const SPACE_MD: f32 = 20.0;
    pub const TITLE_TOP: f32 = 50.0;

    // ── Border radius ──────────────────────────────────────────
    pub const RADIUS_PANEL: f32 = 15.0;
    pub const RADIUS_BUTTON: f32 = 8.0;

    // ── Stroke widths ──────────────────────────────────────────
    pub const STROKE_HAIRLINE: f32 = 1.0;

    // ── Glass fills ────────────────────────────────────────────
    /// White @ 20%, the static panel fill.
    pub const fn glass_clear() -> Color32 {
        Color32::from_rgba_premultiplied(51, 51, 51, 51)
    }
    /// Grey (150) @ 40%, the animated panel fill.
    pub const fn glass_frosted() -> Color32 {
        Color32::from_rgba_premultiplied(60, 60, 60, 102)
    }
    /// White @ 30%, panel border.
    pub const fn glass_border() -> Color32 {
        Color32::from_rgba_premultiplied(77, 77, 77, 77)
    }
    /// Opaque fill used when transparency is reduced.
    pub const fn glass_fallback() -> Color32 {
        Color32::WHITE
    }

    // ── Text ───────────────────────────────────────────────────
    pub const fn text_light() -> Color32 {
        Color32::WHITE
    }
    pub const fn text_dark() -> Color32 {
        Color32::BLACK
    }
    pub const fn title_text() -> Color32 {
        Color32::from_rgb(250, 250, 250)
    }

    // ── Button ─────────────────────────────────────────────────
    pub const fn button_fill() -> Color32 {
        Color32::from_rgb(0x24, 0x24, 0x24)
    }
    pub const fn button_hover() -> Color32 {
        Color32::from_rgb(0x3a, 0x3a, 0x3a)
    }

    // ── Backdrop ───────────────────────────────────────────────
    pub const fn sky_top() -> Color32 {
        Color32::from_rgb(38, 52, 112)
    }
    pub const fn sky_bottom() -> Color32 {
        Color32::from_rgb(214, 96, 132)
    }
    pub const fn blob_colors() -> [Color32; 4] {
        [
            Color32::from_rgb(255, 184, 48),
            Color32::from_rgb(48, 213, 160),
            Color32::from_rgb(167, 139, 250),
            Color32::from_rgb(244, 114, 182),
        ]
    }

    // ── Color helpers ──────────────────────────────────────────

    /// Return a color with replaced alpha.
    pub const fn with_alpha(c: Color32, a: u8) -> Color32 {
        Color32::from_rgba_premultiplied(
            (c.r() as u16 * a as u16 / 255) as u8,
            (c.g() as u16 * a as u16 / 255) as u8,
            (c.b() as u16 * a as u16 / 255) as u8,
            a,
        )
    }

    /// Blend a color toward another by `t` (0..1).
    pub fn lerp(a: Color32, b: Color32, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        Color32::from_rgba_premultiplied(
            (a.r() as f32 * inv + b.r() as f32 * t) as u8,
            (a.g() as f32 * inv + b.g() as f32 * t) as u8,
            (a.b() as f32 * inv + b.b() as f32 * t) as u8,
            (a.a() as f32 * inv + b.a() as f32 * t) as u8,
        )
    }

    // ── Theme application ──────────────────────────────────────

    /// Apply the glass theme to an egui context.
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        *visuals = egui::Visuals::dark();

        visuals.widgets.inactive.weak_bg_fill = Self::button_fill();
        visuals.widgets.inactive.bg_fill = Self::button_fill();
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::text_light());
        visuals.widgets.inactive.rounding = Rounding::same(Self::RADIUS_BUTTON);

        visuals.widgets.hovered.weak_bg_fill = Self::button_hover();
        visuals.widgets.hovered.bg_fill = Self::button_hover();
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Self::text_light());
        visuals.widgets.hovered.rounding = Rounding::same(Self::RADIUS_BUTTON);

        visuals.widgets.active.weak_bg_fill = Self::button_hover();
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Self::text_light());
        visuals.widgets.active.rounding = Rounding::same(Self::RADIUS_BUTTON);

        style.spacing.button_padding = Vec2::new(Self::SPACE_MD, Self::SPACE_SM);

        ctx.set_style(style);
    }
}
