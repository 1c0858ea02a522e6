//! Tool selection for the drawing surface.

use crate::brush::{BrushConfig, FreehandKind};
use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Brush,
    Pencil,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
    Line,
    Diamond,
    Bezier,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Brush,
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Line,
        ToolKind::Diamond,
        ToolKind::Bezier,
    ];

    /// How a pointer interaction with this tool is handled.
    pub fn gesture(self) -> GestureKind {
        match self {
            ToolKind::Brush => GestureKind::Freehand(FreehandKind::Brush),
            ToolKind::Pencil => GestureKind::Freehand(FreehandKind::Pencil),
            ToolKind::Eraser => GestureKind::Freehand(FreehandKind::Eraser),
            ToolKind::Rectangle => GestureKind::Shape(ShapeKind::Rectangle),
            ToolKind::Circle => GestureKind::Shape(ShapeKind::Circle),
            ToolKind::Triangle => GestureKind::Shape(ShapeKind::Triangle),
            ToolKind::Line => GestureKind::Shape(ShapeKind::Line),
            ToolKind::Diamond => GestureKind::Shape(ShapeKind::Diamond),
            ToolKind::Bezier => GestureKind::Curve,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Triangle => "Triangle",
            ToolKind::Line => "Line",
            ToolKind::Diamond => "Diamond",
            ToolKind::Bezier => "Curve",
        }
    }
}

/// Dispatch class of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Drag that accumulates segments on the live canvas.
    Freehand(FreehandKind),
    /// Drag with snapshot-restore preview, committed on release.
    Shape(ShapeKind),
    /// Click-driven two-point curve.
    Curve,
}

/// Selected tool plus the fill/stroke mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolState {
    pub tool: ToolKind,
    /// Fill shapes instead of outlining them.
    pub fill: bool,
}

impl ToolState {
    /// Create a new tool state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool. Returns true if the selection changed.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        let changed = self.tool != tool;
        self.tool = tool;
        changed
    }

    /// The gesture a pointer interaction starts, honoring the eraser override.
    pub fn effective_gesture(&self, brush: &BrushConfig) -> GestureKind {
        if brush.eraser {
            GestureKind::Freehand(FreehandKind::Eraser)
        } else {
            self.tool.gesture()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut ts = ToolState::new();
        assert_eq!(ts.tool, ToolKind::Brush);
        assert!(!ts.fill);

        assert!(ts.set_tool(ToolKind::Rectangle));
        assert_eq!(ts.tool, ToolKind::Rectangle);
        assert!(!ts.set_tool(ToolKind::Rectangle));
    }

    #[test]
    fn test_gesture_dispatch_is_total() {
        for tool in ToolKind::ALL {
            let gesture = tool.gesture();
            match tool {
                ToolKind::Brush | ToolKind::Pencil | ToolKind::Eraser => {
                    assert!(matches!(gesture, GestureKind::Freehand(_)))
                }
                ToolKind::Bezier => assert_eq!(gesture, GestureKind::Curve),
                _ => assert!(matches!(gesture, GestureKind::Shape(_))),
            }
        }
    }

    #[test]
    fn test_eraser_flag_overrides_tool() {
        let ts = ToolState {
            tool: ToolKind::Circle,
            fill: true,
        };
        let brush = BrushConfig {
            eraser: true,
            ..BrushConfig::default()
        };
        assert_eq!(
            ts.effective_gesture(&brush),
            GestureKind::Freehand(FreehandKind::Eraser)
        );
        assert_eq!(
            ts.effective_gesture(&BrushConfig::default()),
            GestureKind::Shape(ShapeKind::Circle)
        );
    }

    #[test]
    fn test_tool_kind_json() {
        let tool: ToolKind = serde_json::from_str("\"diamond\"").unwrap();
        assert_eq!(tool, ToolKind::Diamond);
        assert_eq!(serde_json::to_string(&ToolKind::Bezier).unwrap(), "\"bezier\"");
    }
}
