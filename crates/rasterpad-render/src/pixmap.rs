//! CPU raster surface backed by a tiny-skia pixmap.

use crate::renderer::{RenderResult, RendererError};
use kurbo::{BezPath, Cap, Join, PathEl};
use peniko::Color;
use rasterpad_core::{RasterSurface, SerializableColor};
use tiny_skia::{
    Color as SkiaColor, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as SkiaStroke,
    StrokeDash, Transform,
};

/// Full copy of a pixmap's premultiplied RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixmapSnapshot {
    pixmap: Pixmap,
}

impl PixmapSnapshot {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        read_pixel(&self.pixmap, x, y)
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}

/// A [`RasterSurface`] drawing into an in-memory pixmap.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RendererError::Surface(format!("cannot allocate a {width}x{height} pixmap")))?;
        Ok(Self { pixmap })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        read_pixel(&self.pixmap, x, y)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl RasterSurface for PixmapSurface {
    type Snapshot = PixmapSnapshot;

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn snapshot(&self) -> PixmapSnapshot {
        PixmapSnapshot {
            pixmap: self.pixmap.clone(),
        }
    }

    fn restore(&mut self, snapshot: &PixmapSnapshot) -> bool {
        if snapshot.width() != self.width() || snapshot.height() != self.height() {
            return false;
        }
        self.pixmap.data_mut().copy_from_slice(snapshot.data());
        true
    }

    fn fill(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    fn resize(&mut self, width: u32, height: u32) -> bool {
        match Pixmap::new(width, height) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                true
            }
            None => false,
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping degenerate fill path");
            return;
        };
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &kurbo::Stroke, color: Color) {
        let Some(path) = to_skia_path(path) else {
            log::trace!("Skipping degenerate stroke path");
            return;
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &to_skia_stroke(stroke), Transform::identity(), None);
    }
}

fn read_pixel(pixmap: &Pixmap, x: u32, y: u32) -> Option<SerializableColor> {
    // tiny-skia only checks the flat index, so (width, y) would wrap to the next row.
    if x >= pixmap.width() || y >= pixmap.height() {
        return None;
    }
    let color = pixmap.pixel(x, y)?.demultiply();
    Some(SerializableColor::new(color.red(), color.green(), color.blue(), color.alpha()))
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint
}

fn to_skia_color(color: Color) -> SkiaColor {
    let rgba = color.to_rgba8();
    SkiaColor::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Convert a kurbo path. `None` for paths tiny-skia cannot represent
/// (empty, or zero-area bounds such as a single point).
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn to_skia_stroke(stroke: &kurbo::Stroke) -> SkiaStroke {
    let dash = if stroke.dash_pattern.is_empty() {
        None
    } else {
        StrokeDash::new(
            stroke.dash_pattern.iter().map(|v| *v as f32).collect(),
            stroke.dash_offset as f32,
        )
    };
    SkiaStroke {
        width: stroke.width as f32,
        miter_limit: stroke.miter_limit as f32,
        line_cap: match stroke.start_cap {
            Cap::Butt => LineCap::Butt,
            Cap::Round => LineCap::Round,
            Cap::Square => LineCap::Square,
        },
        line_join: match stroke.join {
            Join::Bevel => LineJoin::Bevel,
            Join::Miter => LineJoin::Miter,
            Join::Round => LineJoin::Round,
        },
        dash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect, Shape as _, Stroke};
    use rasterpad_core::{EngineConfig, PointerEvent, Session, ToolKind};

    const RED: SerializableColor = SerializableColor::new(255, 0, 0, 255);

    fn session(width: u32, height: u32) -> Session<PixmapSurface> {
        let config = EngineConfig {
            width,
            height,
            ..EngineConfig::default()
        };
        Session::new(config, PixmapSurface::new(width, height).unwrap()).unwrap()
    }

    fn drag(session: &mut Session<PixmapSurface>, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        session.pointer_down(&PointerEvent::mouse(first.0, first.1)).unwrap();
        for (x, y) in rest {
            session.pointer_move(&PointerEvent::mouse(*x, *y)).unwrap();
        }
        let last = points.last().unwrap();
        session.pointer_up(&PointerEvent::mouse(last.0, last.1)).unwrap();
    }

    fn replayed(session: &Session<PixmapSurface>) -> PixmapSnapshot {
        let surface = session.surface();
        let mut fresh = PixmapSurface::new(surface.width(), surface.height()).unwrap();
        rasterpad_core::render::replay(&mut fresh, session.drawing(), session.config().background);
        fresh.snapshot()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(PixmapSurface::new(0, 10), Err(RendererError::Surface(_))));
        let mut surface = PixmapSurface::new(4, 4).unwrap();
        assert!(!surface.resize(0, 4));
        assert_eq!(surface.width(), 4);
    }

    #[test]
    fn test_fill_and_read_pixel() {
        let mut surface = PixmapSurface::new(8, 8).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(SerializableColor::transparent()));
        surface.fill(RED.into());
        assert_eq!(surface.pixel(7, 7), Some(RED));
        assert_eq!(surface.pixel(8, 0), None);
        assert_eq!(surface.pixel(0, 8), None);
        assert_eq!(surface.pixel(u32::MAX, u32::MAX), None);

        let snapshot = surface.snapshot();
        assert_eq!(snapshot.pixel(7, 0), Some(RED));
        assert_eq!(snapshot.pixel(8, 0), None);
        assert_eq!(snapshot.pixel(3, 8), None);
    }

    #[test]
    fn test_fill_path_covers_interior() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        let rect = Rect::new(5.0, 5.0, 15.0, 15.0).to_path(0.1);
        surface.fill_path(&rect, RED.into());
        assert_eq!(surface.pixel(10, 10), Some(RED));
        assert_eq!(surface.pixel(1, 1), Some(SerializableColor::transparent()));
    }

    #[test]
    fn test_dashed_stroke_leaves_gaps() {
        let mut surface = PixmapSurface::new(40, 10).unwrap();
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 5.0));
        path.line_to(Point::new(40.0, 5.0));
        let dashed = Stroke::new(2.0)
            .with_caps(Cap::Butt)
            .with_dashes(0.0, [4.0, 4.0]);
        surface.stroke_path(&path, &dashed, RED.into());

        assert_eq!(surface.pixel(2, 5).map(|c| c.r), Some(255));
        assert_eq!(surface.pixel(5, 5).map(|c| c.a), Some(0));
    }

    #[test]
    fn test_restore_is_pixel_identical() {
        let mut surface = PixmapSurface::new(16, 16).unwrap();
        surface.fill(SerializableColor::white().into());
        let before = surface.snapshot();
        surface.fill_path(&Rect::new(2.0, 2.0, 9.0, 9.0).to_path(0.1), RED.into());
        assert_ne!(surface.snapshot(), before);

        assert!(surface.restore(&before));
        assert_eq!(surface.snapshot(), before);

        surface.resize(8, 8);
        assert!(!surface.restore(&before));
    }

    #[test]
    fn test_session_abort_restores_pixels() {
        let mut session = session(64, 48);
        drag(&mut session, &[(5.0, 5.0), (30.0, 20.0), (50.0, 40.0)]);
        session.select_tool(ToolKind::Circle);
        let before = session.surface().snapshot();

        session.pointer_down(&PointerEvent::mouse(32.0, 24.0)).unwrap();
        session.pointer_move(&PointerEvent::mouse(50.0, 24.0)).unwrap();
        session.select_tool(ToolKind::Line);

        assert_eq!(session.surface().snapshot(), before);
        assert_eq!(session.drawing().shapes().count(), 0);
    }

    #[test]
    fn test_session_undo_restores_pixels() {
        let mut session = session(64, 48);
        drag(&mut session, &[(5.0, 5.0), (20.0, 30.0)]);
        let after_first = session.surface().snapshot();
        session.select_tool(ToolKind::Rectangle);
        session.set_fill(true);
        drag(&mut session, &[(10.0, 10.0), (40.0, 40.0)]);

        assert!(session.undo());
        assert_eq!(session.surface().snapshot(), after_first);
    }

    #[test]
    fn test_session_canvas_matches_replay() {
        let mut session = session(80, 60);
        drag(&mut session, &[(2.0, 2.0), (20.0, 10.0), (40.0, 30.0)]);
        session.select_tool(ToolKind::Pencil);
        drag(&mut session, &[(10.0, 50.0), (70.0, 50.0)]);
        session.select_tool(ToolKind::Triangle);
        drag(&mut session, &[(40.0, 10.0), (55.0, 40.0)]);
        session.set_eraser(true);
        drag(&mut session, &[(0.0, 30.0), (80.0, 30.0)]);

        assert_eq!(session.surface().snapshot(), replayed(&session));
        session.resize(100, 70).unwrap();
        assert_eq!(session.surface().snapshot(), replayed(&session));
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut session = session(40, 20);
        session.set_color(RED);
        session.set_brush_width(8.0).unwrap();
        drag(&mut session, &[(0.0, 10.0), (40.0, 10.0)]);
        assert_eq!(session.surface().pixel(20, 10), Some(RED));

        session.set_eraser(true);
        drag(&mut session, &[(0.0, 10.0), (40.0, 10.0)]);
        assert_eq!(session.surface().pixel(20, 10), Some(SerializableColor::white()));
    }
}
