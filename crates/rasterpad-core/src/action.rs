//! Named host actions, one per input the engine accepts.

use crate::input::{CanvasRect, PointerEvent};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// A host input with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    PointerDown { event: PointerEvent },
    PointerMove { event: PointerEvent },
    PointerUp { event: PointerEvent },
    /// Discrete click, drives the curve tool.
    Click { event: PointerEvent },
    PointerLeave,
    SelectTool { tool: ToolKind },
    SetBrushWidth { width: f64 },
    /// CSS color string from a picker or swatch.
    SetColor { color: String },
    SetHardness { hardness: f64 },
    SetEraser { enabled: bool },
    SetFill { enabled: bool },
    ToggleFill,
    SetCanvasRect { rect: CanvasRect },
    Resize { width: u32, height: u32 },
    Clear,
    Undo,
    Export,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::PointerDown { .. } => "pointer_down",
            Action::PointerMove { .. } => "pointer_move",
            Action::PointerUp { .. } => "pointer_up",
            Action::Click { .. } => "click",
            Action::PointerLeave => "pointer_leave",
            Action::SelectTool { .. } => "select_tool",
            Action::SetBrushWidth { .. } => "set_brush_width",
            Action::SetColor { .. } => "set_color",
            Action::SetHardness { .. } => "set_hardness",
            Action::SetEraser { .. } => "set_eraser",
            Action::SetFill { .. } => "set_fill",
            Action::ToggleFill => "toggle_fill",
            Action::SetCanvasRect { .. } => "set_canvas_rect",
            Action::Resize { .. } => "resize",
            Action::Clear => "clear",
            Action::Undo => "undo",
            Action::Export => "export",
        }
    }
}

/// What applying an action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<S> {
    Applied,
    /// Copy of the committed canvas.
    Export(S),
}

impl<S> ActionOutcome<S> {
    pub fn into_export(self) -> Option<S> {
        match self {
            ActionOutcome::Export(snapshot) => Some(snapshot),
            ActionOutcome::Applied => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_action_json() {
        let action: Action = serde_json::from_str(
            r#"{ "action": "pointer_down", "event": { "source": "mouse", "client_x": 1.0, "client_y": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::PointerDown {
                event: PointerEvent::mouse(1.0, 2.0)
            }
        );
        assert_eq!(action.name(), "pointer_down");
    }

    #[test]
    fn test_unit_actions_json() {
        let actions: Vec<Action> =
            serde_json::from_str(r#"[{ "action": "undo" }, { "action": "toggle_fill" }, { "action": "export" }]"#)
                .unwrap();
        assert_eq!(actions, vec![Action::Undo, Action::ToggleFill, Action::Export]);
    }

    #[test]
    fn test_config_actions_json() {
        let action: Action = serde_json::from_str(r#"{ "action": "select_tool", "tool": "triangle" }"#).unwrap();
        assert_eq!(action, Action::SelectTool { tool: ToolKind::Triangle });

        let action: Action = serde_json::from_str(r##"{ "action": "set_color", "color": "#ff0000" }"##).unwrap();
        assert_eq!(action.name(), "set_color");
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(serde_json::from_str::<Action>(r#"{ "action": "redo" }"#).is_err());
    }

    #[test]
    fn test_outcome_into_export() {
        assert_eq!(ActionOutcome::Export(7).into_export(), Some(7));
        assert_eq!(ActionOutcome::<u8>::Applied.into_export(), None);
    }
}
