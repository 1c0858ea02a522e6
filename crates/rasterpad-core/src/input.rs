//! Pointer normalization for mouse and touch events.

use crate::error::{EngineError, EngineResult, ensure_finite};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A single touch contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Raw pointer event as delivered by the host, for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PointerEvent {
    Mouse { client_x: f64, client_y: f64 },
    Touch { touches: Vec<TouchPoint> },
}

impl PointerEvent {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self::Mouse { client_x, client_y }
    }

    pub fn touch(client_x: f64, client_y: f64) -> Self {
        Self::Touch {
            touches: vec![TouchPoint { client_x, client_y }],
        }
    }

    /// Client position of the primary contact. Additional touches are ignored.
    fn client_position(&self) -> EngineResult<Point> {
        match self {
            PointerEvent::Mouse { client_x, client_y } => Ok(Point::new(*client_x, *client_y)),
            PointerEvent::Touch { touches } => touches
                .first()
                .map(|t| Point::new(t.client_x, t.client_y))
                .ok_or_else(|| EngineError::invalid("touch event without contacts")),
        }
    }
}

/// Bounding rectangle of the canvas element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect placed at the client origin.
    pub fn at_origin(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Normalize a raw event to canvas-local coordinates.
    pub fn to_canvas(&self, event: &PointerEvent) -> EngineResult<Point> {
        let client = event.client_position()?;
        ensure_finite(Point::new(client.x - self.left, client.y - self.top))
    }
}
