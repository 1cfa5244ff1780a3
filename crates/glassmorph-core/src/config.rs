//! Demo configuration with versioning and migration.
//!
//! Stored as JSON with a schema version field. Files written before the
//! version field existed are migrated on load.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GlassmorphError, Result};
use crate::layout::{EasedReveal, SlideLoop};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Largest accepted `max_frame_gap_ms`.
pub const MAX_FRAME_GAP_LIMIT_MS: f64 = 60_000.0;

/// Size and blur of one glass panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub width: f32,
    pub height: f32,
    /// Blur strength, 0 (clear) to 100.
    pub blur_amount: f32,
}

impl PanelStyle {
    pub const fn new(width: f32, height: f32, blur_amount: f32) -> Self {
        Self {
            width,
            height,
            blur_amount,
        }
    }

    fn validate(&self, which: &str) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(GlassmorphError::Config(format!(
                "{which} panel size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=100.0).contains(&self.blur_amount) {
            return Err(GlassmorphError::Config(format!(
                "{which} blur_amount must be within 0..=100, got {}",
                self.blur_amount
            )));
        }
        Ok(())
    }
}

/// Everything the three demo screens can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Schema version for migration.
    pub version: u32,
    /// Static screen panel.
    pub static_panel: PanelStyle,
    /// Looping screen panel.
    pub loop_panel: PanelStyle,
    /// Button-triggered screen panel.
    pub reveal_panel: PanelStyle,
    /// Timing of the looping screen.
    pub slide_loop: SlideLoop,
    /// Timing of the button-triggered screen.
    pub reveal: EasedReveal,
    /// Cap on a single frame delta.
    pub max_frame_gap_ms: f64,
    /// Replace translucent glass with an opaque fallback fill.
    pub reduced_transparency: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            static_panel: PanelStyle::new(300.0, 200.0, 20.0),
            loop_panel: PanelStyle::new(300.0, 200.0, 10.0),
            reveal_panel: PanelStyle::new(300.0, 250.0, 10.0),
            slide_loop: SlideLoop::default(),
            reveal: EasedReveal::default(),
            max_frame_gap_ms: 250.0,
            reduced_transparency: false,
        }
    }
}

impl DemoConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        self.static_panel.validate("static")?;
        self.loop_panel.validate("loop")?;
        self.reveal_panel.validate("reveal")?;

        let durations = [
            ("slide_loop.travel_ms", self.slide_loop.travel_ms),
            ("reveal.enter_ms", self.reveal.enter_ms),
            ("reveal.hold_ms", self.reveal.hold_ms),
            ("reveal.exit_ms", self.reveal.exit_ms),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(GlassmorphError::Config(format!(
                    "{name} must be a non-negative number of milliseconds, got {value}"
                )));
            }
        }
        if !self.max_frame_gap_ms.is_finite()
            || self.max_frame_gap_ms <= 0.0
            || self.max_frame_gap_ms > MAX_FRAME_GAP_LIMIT_MS
        {
            return Err(GlassmorphError::Config(format!(
                "max_frame_gap_ms must be in (0, {MAX_FRAME_GAP_LIMIT_MS}], got {}",
                self.max_frame_gap_ms
            )));
        }
        Ok(())
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            GlassmorphError::Serialization(format!("Failed to serialize config: {}", e))
        })
    }

    /// Deserialize from JSON bytes, applying migrations and validation.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| GlassmorphError::Serialization(format!("Invalid JSON: {}", e)))?;

        let version = match raw.get("version") {
            None => 0,
            Some(v) => v
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    GlassmorphError::Config(format!("Config version {} is not supported", v))
                })?,
        };
        if version > CURRENT_VERSION {
            return Err(GlassmorphError::Config(format!(
                "Config version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(raw, version)?;
        let config: Self = serde_json::from_value(migrated).map_err(|e| {
            GlassmorphError::Serialization(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a file path.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let config = Self::from_json(&data).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "rejected demo config");
        })?;
        debug!(path = %path.display(), "loaded demo config");
        Ok(config)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: durations were a single `duration_ms` shared by
                // both legs of the loop, and there was no version field.
                let Some(obj) = data.as_object_mut() else {
                    return Err(GlassmorphError::Config(
                        "Config root must be a JSON object".to_string(),
                    ));
                };
                if let Some(duration) = obj.remove("duration_ms") {
                    obj.insert(
                        "slide_loop".to_string(),
                        serde_json::json!({ "travel_ms": duration }),
                    );
                }
                obj.insert("version".to_string(), serde_json::json!(1));
                version = 1;
            }
            _ => {
                return Err(GlassmorphError::Config(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}
