//! Glassmorph Core - motion sequencing for glass panels
//!
//! This crate provides the UI-independent pieces of the Glassmorph demos:
//! - Easing curves (linear, cubic Bézier presets)
//! - Motion segments, runs and the shared animated offset
//! - Panel measurement and layout-dependent choreography
//! - The frame-driven motion sequencer and frame clock
//! - Versioned demo configuration

pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod layout;
pub mod motion;
pub mod sequencer;

pub use clock::FrameClock;
pub use config::{DemoConfig, PanelStyle};
pub use easing::{lerp_eased, CubicBezier, Easing};
pub use error::{GlassmorphError, Result};
pub use layout::{Choreography, EasedReveal, PanelExtent, PanelLayout, SlideLoop};
pub use motion::{AnimatedOffset, MotionRun, MotionSegment};
pub use sequencer::{MotionEvent, MotionEvents, MotionSequencer, StartOutcome};
