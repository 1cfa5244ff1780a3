//! Panel measurement and layout-dependent choreography.
//!
//! The panel's height is only known after the host has laid it out once, so
//! runs that travel off-screen are composed from a [`PanelLayout`] at the
//! moment they actually start.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::motion::{MotionRun, MotionSegment};

/// Rendered height of the glass panel.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct PanelExtent(pub f64);

impl PanelExtent {
    /// Height before the first layout pass.
    pub const UNMEASURED: Self = Self(0.0);

    /// Whether a real measurement has been reported.
    #[inline]
    pub fn is_known(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.0
    }
}

/// Container and panel heights from the latest layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelLayout {
    pub container_height: f64,
    pub panel_extent: PanelExtent,
}

impl PanelLayout {
    pub fn new(container_height: f64, panel_extent: PanelExtent) -> Self {
        Self {
            container_height,
            panel_extent,
        }
    }

    /// Vertical offset that places a centered panel fully above the container.
    pub fn offscreen_offset(&self) -> f64 {
        -(self.container_height + self.panel_extent.height()) / 2.0
    }
}

/// Builds a concrete run once the layout is known.
pub trait Choreography {
    /// Compose the run for the measured layout.
    fn compose(&self, layout: &PanelLayout) -> MotionRun;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

impl Choreography for MotionRun {
    fn compose(&self, _layout: &PanelLayout) -> MotionRun {
        self.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Slide in from above, slide back out, forever. Both legs are linear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideLoop {
    /// Duration of each leg.
    pub travel_ms: f64,
}

impl Default for SlideLoop {
    fn default() -> Self {
        Self { travel_ms: 4000.0 }
    }
}

impl Choreography for SlideLoop {
    fn compose(&self, layout: &PanelLayout) -> MotionRun {
        let offscreen = layout.offscreen_offset();
        MotionRun::new(offscreen)
            .then(MotionSegment::linear(0.0, self.travel_ms))
            .then(MotionSegment::linear(offscreen, self.travel_ms))
            .repeating(true)
    }

    fn name(&self) -> &'static str {
        "slide-loop"
    }
}

/// Decelerate away from the resting position, hold, then accelerate back.
/// Plays once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasedReveal {
    pub enter_ms: f64,
    pub hold_ms: f64,
    pub exit_ms: f64,
}

impl Default for EasedReveal {
    fn default() -> Self {
        Self {
            enter_ms: 1000.0,
            hold_ms: 2000.0,
            exit_ms: 1000.0,
        }
    }
}

impl Choreography for EasedReveal {
    fn compose(&self, layout: &PanelLayout) -> MotionRun {
        let away = layout.offscreen_offset();
        MotionRun::new(0.0)
            .then(MotionSegment::new(away, self.enter_ms, Easing::EASE_OUT))
            .then(MotionSegment::hold(away, self.hold_ms))
            .then(MotionSegment::new(0.0, self.exit_ms, Easing::EASE_IN))
    }

    fn name(&self) -> &'static str {
        "eased-reveal"
    }
}
