//! Brush configuration and the stroke profiles derived from it.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::shapes::{SerializableColor, ShapeStyle};
use kurbo::{Cap, Join, Stroke};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Current stroke style, mutated only by explicit configuration actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    pub color: SerializableColor,
    pub width: f64,
    /// Opacity of brush and pencil strokes, in `[0, 1]`.
    pub hardness: f64,
    /// Eraser override, independent of the selected tool.
    pub eraser: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 5.0,
            hardness: 1.0,
            eraser: false,
        }
    }
}

impl BrushConfig {
    pub fn set_width(&mut self, width: f64) -> EngineResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(EngineError::invalid(format!("brush width must be positive, got {width}")));
        }
        self.width = width;
        Ok(())
    }

    pub fn set_hardness(&mut self, hardness: f64) -> EngineResult<()> {
        if hardness.is_nan() {
            return Err(EngineError::invalid("brush hardness is NaN"));
        }
        self.hardness = hardness.clamp(0.0, 1.0);
        Ok(())
    }

    /// Style for parametric shapes drawn with this brush.
    pub fn shape_style(&self, filled: bool) -> ShapeStyle {
        ShapeStyle {
            color: self.color,
            width: self.width,
            filled,
        }
    }
}

/// Freehand tool flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreehandKind {
    Brush,
    Pencil,
    Eraser,
}

/// Derived style of a freehand stroke, fixed when the gesture begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeProfile {
    pub kind: FreehandKind,
    pub color: SerializableColor,
    pub width: f64,
    pub opacity: f64,
}

impl StrokeProfile {
    pub fn derive(kind: FreehandKind, brush: &BrushConfig, config: &EngineConfig) -> Self {
        match kind {
            FreehandKind::Brush => Self {
                kind,
                color: brush.color,
                width: brush.width,
                opacity: brush.hardness,
            },
            FreehandKind::Pencil => Self {
                kind,
                color: brush.color,
                width: (brush.width * config.pencil_width_ratio).max(1.0).min(brush.width),
                opacity: brush.hardness * config.pencil_opacity,
            },
            FreehandKind::Eraser => Self {
                kind,
                color: config.background,
                width: brush.width,
                opacity: 1.0,
            },
        }
    }

    /// Paint color with the profile opacity applied.
    pub fn paint_color(&self) -> Color {
        self.color.with_opacity(self.opacity).into()
    }

    pub fn stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.width);
        match self.kind {
            FreehandKind::Brush | FreehandKind::Eraser => {
                stroke.with_caps(Cap::Round).with_join(Join::Round)
            }
            FreehandKind::Pencil => stroke.with_caps(Cap::Square).with_join(Join::Miter),
        }
    }
}
