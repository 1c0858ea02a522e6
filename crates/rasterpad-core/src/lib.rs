//! RasterPad Core Library
//!
//! Platform-agnostic drawing engine: input normalization, the tool and
//! gesture state machine, the committed drawing model and bounded undo.
//! Pixels live behind the [`RasterSurface`] trait.

pub mod action;
pub mod bezier;
pub mod brush;
pub mod config;
pub mod drawing;
pub mod error;
pub mod history;
pub mod input;
pub mod raster;
pub mod render;
pub mod session;
pub mod shapes;
pub mod tools;

pub use action::{Action, ActionOutcome};
pub use bezier::{BezierGesture, BezierPhase, BezierStep};
pub use brush::{BrushConfig, FreehandKind, StrokeProfile};
pub use config::EngineConfig;
pub use drawing::{DrawItem, Drawing};
pub use error::{EngineError, EngineResult};
pub use history::{UndoEntry, UndoStack};
pub use input::{CanvasRect, PointerEvent, TouchPoint};
pub use raster::RasterSurface;
pub use session::{GesturePhase, Session};
pub use shapes::{FreehandStroke, ItemId, SerializableColor, Shape, ShapeKind, ShapeStyle};
pub use tools::{GestureKind, ToolKind, ToolState};
