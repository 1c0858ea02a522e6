//! Freehand strokes (brush, pencil, eraser).

use super::ItemId;
use crate::brush::StrokeProfile;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke: ordered sampled points plus the profile it was drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandStroke {
    id: ItemId,
    points: Vec<Point>,
    profile: StrokeProfile,
}

impl FreehandStroke {
    /// Start a stroke at `origin`.
    pub fn new(origin: Point, profile: StrokeProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![origin],
            profile,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, profile: StrokeProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            profile,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn profile(&self) -> &StrokeProfile {
        &self.profile
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, in the order they were drawn.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Bounding box of the sampled points, inflated by half the stroke width.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        let rect = self
            .points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p));
        let half = self.profile.width / 2.0;
        rect.inflate(half, half)
    }
}
