//! The persisted drawing: committed items in commit order.

use crate::shapes::{FreehandStroke, ItemId, Shape};

/// A committed gesture result.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Stroke(FreehandStroke),
    Shape(Shape),
}

impl DrawItem {
    pub fn id(&self) -> ItemId {
        match self {
            DrawItem::Stroke(s) => s.id(),
            DrawItem::Shape(s) => s.id(),
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            DrawItem::Shape(s) => Some(s),
            DrawItem::Stroke(_) => None,
        }
    }

    pub fn as_stroke(&self) -> Option<&FreehandStroke> {
        match self {
            DrawItem::Stroke(s) => Some(s),
            DrawItem::Shape(_) => None,
        }
    }
}

/// Append-only record of committed strokes and shapes.
///
/// Items are only ever appended, truncated back to an earlier length by
/// undo, or cleared all at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    items: Vec<DrawItem>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: DrawItem) -> ItemId {
        let id = item.id();
        self.items.push(item);
        id
    }

    /// Items in commit order (back to front).
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.items.iter().filter_map(DrawItem::as_shape)
    }

    pub fn strokes(&self) -> impl Iterator<Item = &FreehandStroke> {
        self.items.iter().filter_map(DrawItem::as_stroke)
    }

    pub fn get(&self, id: ItemId) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Drop everything committed after the first `len` items.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushConfig, FreehandKind, StrokeProfile};
    use crate::config::EngineConfig;
    use crate::shapes::{ShapeKind, ShapeStyle};
    use kurbo::Point;

    fn rect() -> Shape {
        Shape::new(ShapeKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0), ShapeStyle::default())
    }

    fn stroke() -> FreehandStroke {
        let profile =
            StrokeProfile::derive(FreehandKind::Brush, &BrushConfig::default(), &EngineConfig::default());
        FreehandStroke::from_points(vec![Point::ZERO, Point::new(5.0, 5.0)], profile)
    }

    #[test]
    fn test_drawing_creation() {
        let drawing = Drawing::new();
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_commit_order_preserved() {
        let mut drawing = Drawing::new();
        let a = drawing.push(DrawItem::Stroke(stroke()));
        let b = drawing.push(DrawItem::Shape(rect()));
        let ids: Vec<_> = drawing.items().iter().map(DrawItem::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(drawing.shapes().count(), 1);
        assert_eq!(drawing.strokes().count(), 1);
    }

    #[test]
    fn test_truncate_and_clear() {
        let mut drawing = Drawing::new();
        let first = drawing.push(DrawItem::Shape(rect()));
        let second = drawing.push(DrawItem::Shape(rect()));

        drawing.truncate(1);
        assert!(drawing.contains(first));
        assert!(!drawing.contains(second));

        drawing.clear();
        assert!(drawing.is_empty());
    }
}
