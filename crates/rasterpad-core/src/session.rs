//! The drawing session: the gesture state machine over a raster surface.
//!
//! All drawing state lives here. Hosts feed pointer and configuration input
//! through the entry points (or [`Session::apply`]) and read the canvas back
//! through [`Session::export`].

use crate::action::{Action, ActionOutcome};
use crate::bezier::{BezierGesture, BezierStep};
use crate::brush::{BrushConfig, StrokeProfile};
use crate::config::EngineConfig;
use crate::drawing::{DrawItem, Drawing};
use crate::error::{EngineError, EngineResult, ensure_finite};
use crate::history::{UndoEntry, UndoStack};
use crate::input::{CanvasRect, PointerEvent};
use crate::raster::RasterSurface;
use crate::render;
use crate::shapes::{FreehandStroke, SerializableColor, Shape, ShapeKind};
use crate::tools::{GestureKind, ToolKind, ToolState};
use kurbo::Point;

/// Observable phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Freehand,
    ShapePreview,
    BezierAwaiting,
}

impl GesturePhase {
    pub fn is_active(self) -> bool {
        self != GesturePhase::Idle
    }
}

/// In-progress gesture. Each active variant owns the pre-gesture snapshot,
/// so the snapshot buffer exists exactly while a gesture does.
#[derive(Debug)]
enum Gesture<S> {
    Idle,
    Freehand {
        snapshot: S,
        stroke: FreehandStroke,
    },
    ShapePreview {
        snapshot: S,
        kind: ShapeKind,
        anchor: Point,
    },
    BezierAwaiting {
        snapshot: S,
    },
}

impl<S> Gesture<S> {
    fn phase(&self) -> GesturePhase {
        match self {
            Gesture::Idle => GesturePhase::Idle,
            Gesture::Freehand { .. } => GesturePhase::Freehand,
            Gesture::ShapePreview { .. } => GesturePhase::ShapePreview,
            Gesture::BezierAwaiting { .. } => GesturePhase::BezierAwaiting,
        }
    }

    fn snapshot(&self) -> Option<&S> {
        match self {
            Gesture::Idle => None,
            Gesture::Freehand { snapshot, .. }
            | Gesture::ShapePreview { snapshot, .. }
            | Gesture::BezierAwaiting { snapshot } => Some(snapshot),
        }
    }

    fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// Drawing session over a surface `R`.
pub struct Session<R: RasterSurface> {
    config: EngineConfig,
    surface: R,
    tools: ToolState,
    brush: BrushConfig,
    drawing: Drawing,
    undo: UndoStack<UndoEntry<R::Snapshot>>,
    /// Entry pushed out by the active gesture's undo push, handed back on abort.
    evicted: Option<UndoEntry<R::Snapshot>>,
    bezier: BezierGesture,
    gesture: Gesture<R::Snapshot>,
    canvas_rect: CanvasRect,
    dirty: bool,
}

impl<R: RasterSurface> Session<R> {
    /// Create a session, sizing the surface to the config and filling it
    /// with the background.
    pub fn new(config: EngineConfig, mut surface: R) -> EngineResult<Self> {
        config.validate()?;
        if (surface.width(), surface.height()) != (config.width, config.height)
            && !surface.resize(config.width, config.height)
        {
            return Err(EngineError::Config(format!(
                "surface cannot be sized to {}x{}",
                config.width, config.height
            )));
        }
        surface.fill(config.background.into());

        Ok(Self {
            undo: UndoStack::new(config.undo_capacity),
            canvas_rect: CanvasRect::at_origin(f64::from(config.width), f64::from(config.height)),
            config,
            surface,
            tools: ToolState::new(),
            brush: BrushConfig::default(),
            drawing: Drawing::new(),
            evicted: None,
            bezier: BezierGesture::new(),
            gesture: Gesture::Idle,
            dirty: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn into_surface(self) -> R {
        self.surface
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.tool
    }

    pub fn fill_enabled(&self) -> bool {
        self.tools.fill
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Reference points of the curve being placed.
    pub fn bezier_points(&self) -> &[Point] {
        self.bezier.points()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn canvas_rect(&self) -> CanvasRect {
        self.canvas_rect
    }

    /// True after a commit or undo, until the next clear or export.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // --- configuration ---

    /// Switch tools. Aborts any gesture and drops pending curve points.
    pub fn select_tool(&mut self, tool: ToolKind) {
        if !self.tools.set_tool(tool) {
            return;
        }
        if self.gesture.is_active() {
            log::debug!("Tool switched mid-gesture, aborting");
        }
        self.abort();
        self.bezier.reset();
        log::debug!("Selected tool: {}", tool.name());
    }

    pub fn set_fill(&mut self, enabled: bool) {
        self.tools.fill = enabled;
    }

    pub fn toggle_fill(&mut self) {
        self.tools.fill = !self.tools.fill;
    }

    pub fn set_brush_width(&mut self, width: f64) -> EngineResult<()> {
        self.brush.set_width(width).inspect_err(|err| log::warn!("{err}"))
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.brush.color = color;
    }

    /// Set the brush color from a CSS color string.
    pub fn set_color_str(&mut self, color: &str) -> EngineResult<()> {
        let parsed = SerializableColor::parse(color)
            .ok_or_else(|| EngineError::invalid(format!("unrecognized color {color:?}")))
            .inspect_err(|err| log::warn!("{err}"))?;
        self.set_color(parsed);
        Ok(())
    }

    pub fn set_hardness(&mut self, hardness: f64) -> EngineResult<()> {
        self.brush.set_hardness(hardness).inspect_err(|err| log::warn!("{err}"))
    }

    /// Toggle the eraser override. Behaves like a tool switch when it changes
    /// what a pointer interaction does.
    pub fn set_eraser(&mut self, enabled: bool) {
        let before = self.tools.effective_gesture(&self.brush);
        self.brush.eraser = enabled;
        if self.tools.effective_gesture(&self.brush) != before {
            self.abort();
            self.bezier.reset();
        }
    }

    pub fn set_canvas_rect(&mut self, rect: CanvasRect) -> EngineResult<()> {
        if ![rect.left, rect.top, rect.width, rect.height].iter().all(|v| v.is_finite()) {
            let err = EngineError::invalid(format!("non-finite canvas rect {rect:?}"));
            log::warn!("{err}");
            return Err(err);
        }
        self.canvas_rect = rect;
        Ok(())
    }

    // --- pointer input ---

    pub fn pointer_down(&mut self, event: &PointerEvent) -> EngineResult<()> {
        let point = self.locate(event)?;
        if self.curve_tool_active() {
            log::trace!("Pointer down ignored by the curve tool");
            return Ok(());
        }
        self.begin(point)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> EngineResult<()> {
        let point = self.locate(event)?;
        self.update(point)
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> EngineResult<()> {
        let point = self.locate(event)?;
        if self.curve_tool_active() {
            log::trace!("Pointer up ignored by the curve tool");
            return Ok(());
        }
        self.end(point)
    }

    /// The pointer left the canvas. Drags are aborted; an armed curve keeps
    /// its points and only shows its markers.
    pub fn pointer_leave(&mut self) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::BezierAwaiting { .. } => self.paint_curve_preview(None),
            Gesture::Freehand { .. } | Gesture::ShapePreview { .. } => {
                log::debug!("Pointer left the canvas, aborting gesture");
                self.abort();
            }
        }
    }

    /// Discrete click. Only the curve tool reacts.
    pub fn click(&mut self, event: &PointerEvent) -> EngineResult<()> {
        let point = self.locate(event)?;
        if !self.curve_tool_active() {
            log::trace!("Click ignored by the {} tool", self.tools.tool.name());
            return Ok(());
        }
        self.add_curve_point(point);
        Ok(())
    }

    fn locate(&mut self, event: &PointerEvent) -> EngineResult<Point> {
        let located = self.canvas_rect.to_canvas(event);
        self.reject_invalid(located)
    }

    fn checked(&mut self, point: Point) -> EngineResult<Point> {
        let checked = ensure_finite(point);
        self.reject_invalid(checked)
    }

    /// Invalid geometry aborts whatever gesture is in progress.
    fn reject_invalid(&mut self, result: EngineResult<Point>) -> EngineResult<Point> {
        if let Err(err) = &result {
            log::warn!("Rejected pointer input: {err}");
            self.abort();
        }
        result
    }

    fn curve_tool_active(&self) -> bool {
        self.tools.effective_gesture(&self.brush) == GestureKind::Curve
    }

    // --- gesture state machine ---

    /// Start a drag gesture at `point`. An active gesture is aborted first.
    pub fn begin(&mut self, point: Point) -> EngineResult<()> {
        let point = self.checked(point)?;
        let kind = self.tools.effective_gesture(&self.brush);
        if kind == GestureKind::Curve {
            log::debug!("{}", EngineError::GestureMisuse("drag begin with the curve tool"));
            return Ok(());
        }
        if self.gesture.is_active() {
            log::debug!("{}", EngineError::GestureMisuse("begin while a gesture is active"));
            self.abort();
        }

        let snapshot = self.push_undo();
        self.gesture = match kind {
            GestureKind::Freehand(freehand) => {
                let profile = StrokeProfile::derive(freehand, &self.brush, &self.config);
                Gesture::Freehand {
                    snapshot,
                    stroke: FreehandStroke::new(point, profile),
                }
            }
            GestureKind::Shape(shape) => Gesture::ShapePreview {
                snapshot,
                kind: shape,
                anchor: point,
            },
            GestureKind::Curve => Gesture::BezierAwaiting { snapshot },
        };
        log::debug!("Gesture {:?} started at ({}, {})", self.phase(), point.x, point.y);
        Ok(())
    }

    /// Extend the active gesture. Tolerated while idle.
    pub fn update(&mut self, point: Point) -> EngineResult<()> {
        let point = self.checked(point)?;
        match &mut self.gesture {
            Gesture::Idle => log::trace!("{}", EngineError::GestureMisuse("update while idle")),
            Gesture::Freehand { stroke, .. } => match stroke.last_point() {
                Some(last) if last == point => {}
                Some(last) => {
                    render::paint_segment(&mut self.surface, last, point, stroke.profile());
                    stroke.push(point);
                }
                None => stroke.push(point),
            },
            Gesture::ShapePreview {
                snapshot,
                kind,
                anchor,
            } => {
                self.surface.restore(snapshot);
                let preview = Shape::new(*kind, *anchor, point, self.brush.shape_style(self.tools.fill));
                render::paint_shape(&mut self.surface, &preview);
                log::trace!("Preview {:?} to ({}, {})", kind, point.x, point.y);
            }
            Gesture::BezierAwaiting { .. } => self.paint_curve_preview(Some(point)),
        }
        Ok(())
    }

    /// Finish the active drag gesture at `point` and commit its result.
    pub fn end(&mut self, point: Point) -> EngineResult<()> {
        let point = self.checked(point)?;
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => log::debug!("{}", EngineError::GestureMisuse("end while idle")),
            Gesture::Freehand { mut stroke, .. } => {
                if let Some(last) = stroke.last_point().filter(|last| *last != point) {
                    render::paint_segment(&mut self.surface, last, point, stroke.profile());
                    stroke.push(point);
                }
                log::debug!("Committed stroke with {} points", stroke.len());
                self.commit(DrawItem::Stroke(stroke));
            }
            Gesture::ShapePreview { kind, anchor, .. } => {
                let shape = Shape::new(kind, anchor, point, self.brush.shape_style(self.tools.fill));
                log::debug!("Committed {kind:?}");
                self.commit(DrawItem::Shape(shape));
                self.redraw();
            }
            awaiting @ Gesture::BezierAwaiting { .. } => {
                log::debug!("{}", EngineError::GestureMisuse("drag end while placing a curve"));
                self.gesture = awaiting;
            }
        }
        Ok(())
    }

    /// Abandon the active gesture: restore the pre-gesture canvas and drop
    /// its undo entry. No-op while idle.
    pub fn abort(&mut self) {
        let snapshot = match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => return,
            Gesture::Freehand { snapshot, .. } | Gesture::ShapePreview { snapshot, .. } => snapshot,
            Gesture::BezierAwaiting { snapshot } => {
                self.bezier.reset();
                snapshot
            }
        };
        if !self.surface.restore(&snapshot) {
            self.replay_committed();
        }
        self.undo.pop();
        if let Some(entry) = self.evicted.take() {
            self.undo.restore_oldest(entry);
        }
        log::debug!("Gesture aborted");
    }

    /// Push the current canvas as an undo entry and return the snapshot
    /// buffer for the new gesture.
    fn push_undo(&mut self) -> R::Snapshot {
        let snapshot = self.surface.snapshot();
        self.evicted = self.undo.push(UndoEntry {
            snapshot: snapshot.clone(),
            model_len: self.drawing.len(),
        });
        snapshot
    }

    fn commit(&mut self, item: DrawItem) {
        self.drawing.push(item);
        self.evicted = None;
        self.dirty = true;
    }

    // --- curve tool ---

    fn add_curve_point(&mut self, point: Point) {
        if matches!(self.gesture, Gesture::Freehand { .. } | Gesture::ShapePreview { .. }) {
            self.abort();
        }
        match self.bezier.add_point(point) {
            BezierStep::Armed(first) => {
                let snapshot = self.push_undo();
                self.gesture = Gesture::BezierAwaiting { snapshot };
                self.paint_curve_preview(None);
                log::debug!("Curve armed at ({}, {})", first.x, first.y);
            }
            BezierStep::Complete { .. } => self.render_curve(),
        }
    }

    /// Commit the curve through the recorded points. Silent no-op until both
    /// points exist.
    pub fn render_curve(&mut self) {
        let curve = match self.bezier.curve() {
            Ok(curve) => curve,
            Err(err) => {
                log::debug!("{err}");
                return;
            }
        };
        if let Gesture::BezierAwaiting { snapshot } = std::mem::replace(&mut self.gesture, Gesture::Idle) {
            self.surface.restore(&snapshot);
        }
        let shape = Shape::new(ShapeKind::Bezier, curve.p0, curve.p3, self.brush.shape_style(false));
        self.commit(DrawItem::Shape(shape));
        self.bezier.reset();
        self.redraw();
        log::debug!("Committed curve");
    }

    fn paint_curve_preview(&mut self, cursor: Option<Point>) {
        let Gesture::BezierAwaiting { snapshot } = &self.gesture else {
            return;
        };
        self.surface.restore(snapshot);
        let guide = self.bezier.guide_points(cursor);
        render::paint_curve_guides(&mut self.surface, self.bezier.points(), &guide, &self.config);
        log::trace!("Curve guide through {} points", guide.len());
    }

    // --- commands ---

    /// Revert the last committed gesture. While a gesture is active this only
    /// aborts it. Returns whether a commit was reverted.
    pub fn undo(&mut self) -> bool {
        let was_active = self.gesture.is_active();
        match self.try_undo() {
            Ok(()) => !was_active,
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    /// Like [`Session::undo`], reporting `EmptyUndo` when there is nothing to revert.
    pub fn try_undo(&mut self) -> EngineResult<()> {
        if self.gesture.is_active() {
            self.abort();
            return Ok(());
        }
        let entry = self.undo.pop().ok_or(EngineError::EmptyUndo)?;
        self.drawing.truncate(entry.model_len);
        if !self.surface.restore(&entry.snapshot) {
            log::debug!("Undo snapshot no longer matches the canvas size, replaying");
            self.replay_committed();
        }
        self.dirty = true;
        Ok(())
    }

    /// Drop everything: gesture, drawing, undo history and curve points.
    pub fn clear(&mut self) {
        self.gesture = Gesture::Idle;
        self.evicted = None;
        self.drawing.clear();
        self.undo.clear();
        self.bezier.reset();
        self.surface.fill(self.config.background.into());
        self.dirty = false;
        log::info!("Canvas cleared");
    }

    /// Resize the canvas and rebuild it from the drawing.
    pub fn resize(&mut self, width: u32, height: u32) -> EngineResult<()> {
        if width == 0 || height == 0 {
            let err = EngineError::invalid(format!("canvas size must be non-zero, got {width}x{height}"));
            log::warn!("{err}");
            return Err(err);
        }
        self.abort();
        if !self.surface.resize(width, height) {
            return Err(EngineError::invalid(format!("surface cannot be resized to {width}x{height}")));
        }
        self.canvas_rect.width = f64::from(width);
        self.canvas_rect.height = f64::from(height);
        self.replay_committed();
        log::info!("Canvas resized to {width}x{height}");
        Ok(())
    }

    /// Rebuild the canvas from the committed drawing. An in-progress stroke
    /// or curve guide is painted back on top.
    pub fn redraw(&mut self) {
        self.replay_committed();
        match &self.gesture {
            Gesture::Freehand { stroke, .. } => render::paint_stroke(&mut self.surface, stroke),
            Gesture::BezierAwaiting { .. } => self.paint_curve_preview(None),
            Gesture::Idle | Gesture::ShapePreview { .. } => {}
        }
    }

    fn replay_committed(&mut self) {
        render::replay(&mut self.surface, &self.drawing, self.config.background);
    }

    /// Copy of the committed canvas. During a gesture this is the
    /// pre-gesture snapshot, so previews never leak into exports.
    pub fn export(&mut self) -> R::Snapshot {
        let snapshot = match self.gesture.snapshot() {
            Some(snapshot) => snapshot.clone(),
            None => self.surface.snapshot(),
        };
        self.dirty = false;
        log::info!(
            "Exported {}x{} canvas with {} items",
            self.surface.width(),
            self.surface.height(),
            self.drawing.len()
        );
        snapshot
    }

    /// Dispatch a host action.
    pub fn apply(&mut self, action: Action) -> EngineResult<ActionOutcome<R::Snapshot>> {
        match action {
            Action::PointerDown { event } => self.pointer_down(&event)?,
            Action::PointerMove { event } => self.pointer_move(&event)?,
            Action::PointerUp { event } => self.pointer_up(&event)?,
            Action::Click { event } => self.click(&event)?,
            Action::PointerLeave => self.pointer_leave(),
            Action::SelectTool { tool } => self.select_tool(tool),
            Action::SetBrushWidth { width } => self.set_brush_width(width)?,
            Action::SetColor { color } => self.set_color_str(&color)?,
            Action::SetHardness { hardness } => self.set_hardness(hardness)?,
            Action::SetEraser { enabled } => self.set_eraser(enabled),
            Action::SetFill { enabled } => self.set_fill(enabled),
            Action::ToggleFill => self.toggle_fill(),
            Action::SetCanvasRect { rect } => self.set_canvas_rect(rect)?,
            Action::Resize { width, height } => self.resize(width, height)?,
            Action::Clear => self.clear(),
            Action::Undo => {
                self.undo();
            }
            Action::Export => return Ok(ActionOutcome::Export(self.export())),
        }
        Ok(ActionOutcome::Applied)
    }
}
