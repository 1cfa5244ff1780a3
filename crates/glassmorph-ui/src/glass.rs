//! Frosted glass panel painter.
//!
//! egui cannot sample what is behind a shape, so the blur is approximated:
//! a stack of faint, progressively larger rounded rects diffuses the panel
//! edge, and the fill opacity rises with the blur amount so the backdrop
//! reads as softened through it.

use egui::{Color32, Pos2, Rect, Rounding, Stroke, UiBuilder, Vec2};
use glassmorph_core::PanelStyle;

use crate::theme::GlassTheme;

/// Largest halo layer count, reached at blur 100.
const MAX_HALO_LAYERS: usize = 10;
/// Halo spread in points per unit of blur.
const HALO_SPREAD_PER_BLUR: f32 = 0.25;

/// A translucent panel with a blurred-glass look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlassPanel {
    pub size: Vec2,
    /// 0 (clear) to 100.
    pub blur_amount: f32,
    pub tint: Color32,
    pub border: Option<Stroke>,
    pub rounding: f32,
    /// Swap the translucent fill for an opaque fallback.
    pub reduced_transparency: bool,
}

/// What a panel reports after being laid out and painted.
pub struct GlassPanelResponse<R> {
    /// Where the panel was drawn.
    pub rect: Rect,
    /// Value returned by the contents closure.
    pub inner: R,
}

impl<R> GlassPanelResponse<R> {
    /// Rendered height of the panel.
    pub fn height(&self) -> f32 {
        self.rect.height()
    }
}

impl GlassPanel {
    /// A panel sized and blurred per `style`, using the clear glass tint.
    pub fn from_style(style: &PanelStyle) -> Self {
        Self {
            size: Vec2::new(style.width, style.height),
            blur_amount: style.blur_amount.clamp(0.0, 100.0),
            tint: GlassTheme::glass_clear(),
            border: None,
            rounding: GlassTheme::RADIUS_PANEL,
            reduced_transparency: false,
        }
    }

    pub fn tint(mut self, tint: Color32) -> Self {
        self.tint = tint;
        self
    }

    pub fn border(mut self, stroke: Stroke) -> Self {
        self.border = Some(stroke);
        self
    }

    pub fn reduced_transparency(mut self, reduced: bool) -> Self {
        self.reduced_transparency = reduced;
        self
    }

    /// Number of halo layers drawn for the current blur amount.
    pub fn halo_layers(&self) -> usize {
        if self.reduced_transparency {
            return 0;
        }
        ((self.blur_amount / 100.0) * MAX_HALO_LAYERS as f32).ceil() as usize
    }

    /// Panel fill after accounting for blur and reduced transparency.
    pub fn effective_fill(&self) -> Color32 {
        if self.reduced_transparency {
            return GlassTheme::glass_fallback();
        }
        // Heavier blur lets less detail through: push toward a milky fill.
        let frost = (self.blur_amount / 100.0) * 0.35;
        GlassTheme::lerp(self.tint, GlassTheme::with_alpha(Color32::WHITE, 140), frost)
    }

    /// Paint the panel into `rect` without contents.
    pub fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let rounding = Rounding::same(self.rounding);

        let layers = self.halo_layers();
        let spread = self.blur_amount * HALO_SPREAD_PER_BLUR;
        for layer in (1..=layers).rev() {
            let t = layer as f32 / layers as f32;
            let halo_rect = rect.expand(spread * t);
            let alpha = (18.0 * (1.0 - t) + 4.0) as u8;
            painter.rect_filled(
                halo_rect,
                Rounding::same(self.rounding + spread * t),
                GlassTheme::with_alpha(Color32::WHITE, alpha),
            );
        }

        painter.rect_filled(rect, rounding, self.effective_fill());

        if !self.reduced_transparency {
            // Sheen along the top edge.
            let sheen = Rect::from_min_size(rect.min, Vec2::new(rect.width(), rect.height() * 0.35));
            painter.rect_filled(
                sheen,
                Rounding {
                    nw: self.rounding,
                    ne: self.rounding,
                    sw: 0.0,
                    se: 0.0,
                },
                GlassTheme::with_alpha(Color32::WHITE, 14),
            );
        }

        if let Some(stroke) = self.border {
            painter.rect_stroke(rect, rounding, stroke);
        }
    }

    /// Lay out the panel centered on `center`, paint it, and run
    /// `add_contents` in a child ui confined to the panel.
    pub fn show<R>(
        &self,
        ui: &mut egui::Ui,
        center: Pos2,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> GlassPanelResponse<R> {
        let rect = Rect::from_center_size(center, self.size);
        self.paint(ui.painter(), rect);

        let inner = ui
            .allocate_new_ui(
                UiBuilder::new()
                    .max_rect(rect)
                    .layout(egui::Layout::top_down(egui::Align::Center)),
                add_contents,
            )
            .inner;

        GlassPanelResponse { rect, inner }
    }
}
