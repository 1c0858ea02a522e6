//! Drawing functions for committed items and transient overlays.
//!
//! These only paint; they never touch session state.

use crate::brush::StrokeProfile;
use crate::config::EngineConfig;
use crate::drawing::{DrawItem, Drawing};
use crate::raster::RasterSurface;
use crate::shapes::primitives::{self, PATH_TOLERANCE};
use crate::shapes::{FreehandStroke, SerializableColor, Shape};
use kurbo::{Circle, Point, Shape as _, Stroke};

/// Paint a parametric shape, filled or outlined per its style.
pub fn paint_shape<R: RasterSurface>(surface: &mut R, shape: &Shape) {
    let path = shape.to_path();
    let style = shape.style();
    if shape.is_filled() {
        surface.fill_path(&path, style.color());
    } else {
        surface.stroke_path(&path, &style.stroke(), style.color());
    }
}

/// Paint one freehand segment.
pub fn paint_segment<R: RasterSurface>(surface: &mut R, from: Point, to: Point, profile: &StrokeProfile) {
    let path = primitives::line_path(from, to);
    surface.stroke_path(&path, &profile.stroke(), profile.paint_color());
}

/// Paint a whole freehand stroke, segment by segment as it was drawn live.
pub fn paint_stroke<R: RasterSurface>(surface: &mut R, stroke: &FreehandStroke) {
    for (from, to) in stroke.segments() {
        paint_segment(surface, from, to, stroke.profile());
    }
}

pub fn paint_item<R: RasterSurface>(surface: &mut R, item: &DrawItem) {
    match item {
        DrawItem::Stroke(stroke) => paint_stroke(surface, stroke),
        DrawItem::Shape(shape) => paint_shape(surface, shape),
    }
}

/// Clear to `background` and replay every committed item in order.
pub fn replay<R: RasterSurface>(surface: &mut R, drawing: &Drawing, background: SerializableColor) {
    surface.fill(background.into());
    for item in drawing.items() {
        paint_item(surface, item);
    }
}

/// Dashed polyline through `guide` plus a filled marker on each recorded point.
pub fn paint_curve_guides<R: RasterSurface>(
    surface: &mut R,
    recorded: &[Point],
    guide: &[Point],
    config: &EngineConfig,
) {
    if guide.len() >= 2 {
        let dashed = Stroke::new(config.guide_width)
            .with_dashes(0.0, [config.guide_dash, config.guide_dash]);
        surface.stroke_path(&primitives::polyline_path(guide), &dashed, config.guide_color.into());
    }
    for point in recorded {
        let marker = Circle::new(*point, config.marker_radius).to_path(PATH_TOLERANCE);
        surface.fill_path(&marker, config.marker_color.into());
    }
}
