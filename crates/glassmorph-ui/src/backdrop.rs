//! Procedural backdrop painted behind the glass panels.
//!
//! A vertical gradient with a few soft color blobs, so the translucent
//! panel has something to frost.

use egui::{Color32, Mesh, Pos2, Rect, Shape};

use crate::theme::GlassTheme;

/// Rings used to fake a soft edge on each blob.
const BLOB_RINGS: usize = 6;

/// Blob centers and radii as fractions of the backdrop rect.
const BLOBS: [(f32, f32, f32); 4] = [
    (0.22, 0.30, 0.22),
    (0.78, 0.42, 0.18),
    (0.35, 0.78, 0.20),
    (0.70, 0.85, 0.16),
];

/// Build the vertical gradient quad covering `rect`.
pub fn gradient_mesh(rect: Rect, top: Color32, bottom: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    mesh
}

/// Paint the backdrop into `rect`.
pub fn paint_backdrop(painter: &egui::Painter, rect: Rect) {
    painter.add(Shape::mesh(gradient_mesh(
        rect,
        GlassTheme::sky_top(),
        GlassTheme::sky_bottom(),
    )));

    let scale = rect.width().min(rect.height());
    for ((fx, fy, fr), color) in BLOBS.iter().zip(GlassTheme::blob_colors()) {
        let center = Pos2::new(rect.left() + fx * rect.width(), rect.top() + fy * rect.height());
        let radius = fr * scale;
        // Outer rings are larger and fainter.
        for ring in (0..BLOB_RINGS).rev() {
            let t = ring as f32 / BLOB_RINGS as f32;
            let alpha = (160.0 * (1.0 - t) * (1.0 - t)) as u8 + 12;
            painter.circle_filled(
                center,
                radius * (1.0 + t),
                GlassTheme::with_alpha(color, alpha),
            );
        }
    }
}

/// Paint the large title across the top of the backdrop.
pub fn paint_title(painter: &egui::Painter, rect: Rect, title: &str) {
    painter.text(
        Pos2::new(rect.center().x, rect.top() + GlassTheme::TITLE_TOP),
        egui::Align2::CENTER_TOP,
        title,
        egui::FontId::proportional(GlassTheme::FONT_TITLE),
        GlassTheme::title_text(),
    );
}
