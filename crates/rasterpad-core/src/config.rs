//! Engine configuration.

use crate::error::{EngineError, EngineResult};
use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};

/// Default number of undo snapshots kept.
pub const DEFAULT_UNDO_CAPACITY: usize = 20;

/// Tunables of the drawing engine. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Canvas background, also the eraser color.
    pub background: SerializableColor,
    /// Maximum undo depth.
    pub undo_capacity: usize,
    /// Pencil width as a fraction of the brush width.
    pub pencil_width_ratio: f64,
    /// Pencil opacity multiplier.
    pub pencil_opacity: f64,
    /// Color of the dashed Bezier guide.
    pub guide_color: SerializableColor,
    /// Width of the dashed Bezier guide.
    pub guide_width: f64,
    /// Dash and gap length of the Bezier guide.
    pub guide_dash: f64,
    /// Radius of the control point markers.
    pub marker_radius: f64,
    /// Fill of the control point markers.
    pub marker_color: SerializableColor,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: SerializableColor::white(),
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            pencil_width_ratio: 0.5,
            pencil_opacity: 0.6,
            guide_color: SerializableColor::new(120, 120, 120, 255),
            guide_width: 1.0,
            guide_dash: 4.0,
            marker_radius: 4.0,
            marker_color: SerializableColor::new(59, 130, 246, 255),
        }
    }
}

impl EngineConfig {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::Config(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.undo_capacity == 0 {
            return Err(EngineError::Config("undo_capacity must be at least 1".into()));
        }
        if !(self.pencil_width_ratio > 0.0 && self.pencil_width_ratio <= 1.0) {
            return Err(EngineError::Config(format!(
                "pencil_width_ratio must be in (0, 1], got {}",
                self.pencil_width_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.pencil_opacity) {
            return Err(EngineError::Config(format!(
                "pencil_opacity must be in [0, 1], got {}",
                self.pencil_opacity
            )));
        }
        for (name, value) in [
            ("guide_width", self.guide_width),
            ("guide_dash", self.guide_dash),
            ("marker_radius", self.marker_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}
