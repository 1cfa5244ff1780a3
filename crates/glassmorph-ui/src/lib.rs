//! Glassmorph UI - egui glass panels
//!
//! Provides UI components:
//! - Glass theme and procedural backdrop
//! - Frosted glass panel painter
//! - Static, looping and button-triggered demo screens

pub mod backdrop;
pub mod glass;
pub mod screens;
pub mod theme;

pub use glass::{GlassPanel, GlassPanelResponse};
pub use screens::{
    LoopingGlassScreen, RevealGlassScreen, Screen, ScreenKind, StaticGlassScreen, PANEL_LABEL,
};
pub use theme::GlassTheme;
