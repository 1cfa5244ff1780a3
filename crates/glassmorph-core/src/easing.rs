//! Easing curves with cubic Bézier timing.
//!
//! A Bézier curve is evaluated by solving for the curve parameter whose X
//! coordinate equals the input progress (Newton-Raphson with a bisection
//! fallback), then returning the Y coordinate at that parameter.

use serde::{Deserialize, Serialize};

use crate::error::{GlassmorphError, Result};

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-6;
const SOLVE_EPSILON: f64 = 1e-12;
const BISECTION_ITERATIONS: usize = 48;

// ── Cubic Bézier ────────────────────────────────────────────────

/// Cubic Bézier control points for easing (x1, y1, x2, y2).
/// The curve goes from (0,0) to (1,1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a curve, rejecting control points whose X lies outside [0, 1].
    ///
    /// Such curves are not functions of time and cannot be used for timing.
    pub fn try_new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        let valid_x = |x: f64| (0.0..=1.0).contains(&x);
        if !valid_x(x1) || !valid_x(x2) {
            return Err(GlassmorphError::InvalidParameter(format!(
                "bezier control x values must lie in [0, 1], got x1={x1}, x2={x2}"
            )));
        }
        if !y1.is_finite() || !y2.is_finite() {
            return Err(GlassmorphError::InvalidParameter(format!(
                "bezier control y values must be finite, got y1={y1}, y2={y2}"
            )));
        }
        Ok(Self::new(x1, y1, x2, y2))
    }

    /// Evaluate the X coordinate of the curve at parameter s.
    fn sample_x(&self, s: f64) -> f64 {
        let ms = 1.0 - s;
        3.0 * ms * ms * s * self.x1 + 3.0 * ms * s * s * self.x2 + s * s * s
    }

    /// Evaluate the Y coordinate of the curve at parameter s.
    fn sample_y(&self, s: f64) -> f64 {
        let ms = 1.0 - s;
        3.0 * ms * ms * s * self.y1 + 3.0 * ms * s * s * self.y2 + s * s * s
    }

    /// Derivative of X with respect to s.
    fn sample_dx(&self, s: f64) -> f64 {
        let ms = 1.0 - s;
        3.0 * ms * ms * self.x1 + 6.0 * ms * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Find the curve parameter whose X coordinate equals `x`.
    fn solve_parameter(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(s) - x;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = self.sample_dx(s);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            s = (s - err / slope).clamp(0.0, 1.0);
        }

        // X(s) is monotonic for x1, x2 in [0, 1], so bisection always converges.
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let x_est = self.sample_x(s);
            if (x_est - x).abs() < SOLVE_EPSILON {
                break;
            }
            if x_est < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }

    /// Map linear progress `x` in [0, 1] to eased progress.
    ///
    /// The endpoints are exact: `evaluate(0.0) == 0.0` and
    /// `evaluate(1.0) == 1.0`. Inputs outside [0, 1] are clamped.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        self.sample_y(self.solve_parameter(x))
    }

    // CSS timing presets
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    /// Material "standard decelerate": fast start, gentle landing. Used for
    /// panels entering the screen.
    pub const MATERIAL_DECELERATE: Self = Self::new(0.0, 0.0, 0.2, 1.0);
    /// Material "standard accelerate": gentle start, fast exit. Used for
    /// panels leaving the screen.
    pub const MATERIAL_ACCELERATE: Self = Self::new(0.4, 0.0, 1.0, 1.0);
}

// ── Easing ──────────────────────────────────────────────────────

/// Timing curve applied to a segment's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Cubic Bézier timing curve.
    Bezier(CubicBezier),
}

impl Easing {
    pub const EASE_OUT: Self = Self::Bezier(CubicBezier::MATERIAL_DECELERATE);
    pub const EASE_IN: Self = Self::Bezier(CubicBezier::MATERIAL_ACCELERATE);

    /// Apply the curve to progress `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => {
                if t.is_nan() {
                    0.0
                } else {
                    t.clamp(0.0, 1.0)
                }
            }
            Easing::Bezier(bezier) => bezier.evaluate(t),
        }
    }
}

/// Interpolate from `start` to `end` at progress `t` through `easing`.
///
/// Returns `end` exactly when `t >= 1`.
#[inline]
pub fn lerp_eased(easing: Easing, start: f64, end: f64, t: f64) -> f64 {
    if t >= 1.0 {
        return end;
    }
    start + (end - start) * easing.apply(t)
}

// ── Tests ───────────────────────────────────────────────────────
