//! Click-driven two-point curve gesture.

use crate::error::{EngineError, EngineResult};
use crate::shapes::primitives;
use kurbo::{CubicBez, Point};

/// Reference points a curve needs.
pub const CURVE_POINTS: usize = 2;

/// Protocol phase, derived from the number of recorded points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BezierPhase {
    AwaitingFirst,
    AwaitingSecond,
    /// Both points recorded; the curve renders before the gesture resets.
    Previewing,
}

/// Result of recording a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierStep {
    /// First point recorded; waiting for the second.
    Armed(Point),
    /// Second point recorded; the curve is ready to render.
    Complete { start: Point, control: Point },
}

/// Up to two reference points collected from discrete clicks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BezierGesture {
    points: Vec<Point>,
}

impl BezierGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn phase(&self) -> BezierPhase {
        match self.points.len() {
            0 => BezierPhase::AwaitingFirst,
            1 => BezierPhase::AwaitingSecond,
            _ => BezierPhase::Previewing,
        }
    }

    /// Record a click.
    pub fn add_point(&mut self, point: Point) -> BezierStep {
        if self.points.len() >= CURVE_POINTS {
            self.points.clear();
        }
        self.points.push(point);
        match self.points.as_slice() {
            [start, control] => BezierStep::Complete {
                start: *start,
                control: *control,
            },
            _ => BezierStep::Armed(point),
        }
    }

    /// The curve through the recorded points, or `EmptyBezier` before the
    /// second click.
    pub fn curve(&self) -> EngineResult<CubicBez> {
        match self.points.as_slice() {
            [start, control] => Ok(primitives::bezier_curve(*start, *control)),
            _ => Err(EngineError::EmptyBezier),
        }
    }

    /// Polyline for the dashed guide: the recorded points, then the live
    /// cursor while the second point is still missing.
    pub fn guide_points(&self, cursor: Option<Point>) -> Vec<Point> {
        let mut points = self.points.clone();
        if let (BezierPhase::AwaitingSecond, Some(cursor)) = (self.phase(), cursor) {
            points.push(cursor);
        }
        points
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }
}
