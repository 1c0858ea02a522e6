//! Geometry of the parametric shape primitives.
//!
//! Every primitive is derived from two reference points, `anchor` (where the
//! gesture started) and `endpoint` (the live or final pointer position).
//! These functions are pure; painting happens in [`crate::render`].

use kurbo::{BezPath, Circle, CubicBez, Point, Shape as _};

/// Flattening tolerance used when converting circles to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Offset-based rectangle: `origin` plus signed extents.
///
/// Extents keep their sign, so dragging up/left yields negative width or
/// height instead of a normalized box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectGeometry {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl RectGeometry {
    pub fn from_points(anchor: Point, endpoint: Point) -> Self {
        Self {
            origin: anchor,
            width: endpoint.x - anchor.x,
            height: endpoint.y - anchor.y,
        }
    }

    /// Corners in drawing order, starting at the origin.
    pub fn corners(&self) -> [Point; 4] {
        let Point { x, y } = self.origin;
        [
            self.origin,
            Point::new(x + self.width, y),
            Point::new(x + self.width, y + self.height),
            Point::new(x, y + self.height),
        ]
    }

    pub fn to_path(&self) -> BezPath {
        polygon_path(&self.corners())
    }
}

/// Radius of a circle centered on `anchor` passing through `endpoint`.
pub fn circle_radius(anchor: Point, endpoint: Point) -> f64 {
    anchor.distance(endpoint)
}

pub fn circle_path(anchor: Point, endpoint: Point) -> BezPath {
    Circle::new(anchor, circle_radius(anchor, endpoint)).to_path(PATH_TOLERANCE)
}

/// Isosceles triangle: `anchor`, `endpoint`, and `endpoint` mirrored across
/// the vertical line through `anchor`.
pub fn triangle_vertices(anchor: Point, endpoint: Point) -> [Point; 3] {
    [
        anchor,
        endpoint,
        Point::new(2.0 * anchor.x - endpoint.x, endpoint.y),
    ]
}

/// Rhombus through the edge midpoints of the anchor/endpoint box, in the
/// order top, right, bottom, left.
pub fn diamond_vertices(anchor: Point, endpoint: Point) -> [Point; 4] {
    let mid = anchor.midpoint(endpoint);
    [
        Point::new(mid.x, anchor.y),
        Point::new(endpoint.x, mid.y),
        Point::new(mid.x, endpoint.y),
        Point::new(anchor.x, mid.y),
    ]
}

pub fn line_path(anchor: Point, endpoint: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(anchor);
    path.line_to(endpoint);
    path
}

/// Closed path through `vertices`.
pub fn polygon_path(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = vertices.split_first() else {
        return path;
    };
    path.move_to(*first);
    for vertex in rest {
        path.line_to(*vertex);
    }
    path.close_path();
    path
}

/// Open path through `points`.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}

/// Two-click curve: the second reference point is both control points and
/// the end of the cubic.
pub fn bezier_curve(start: Point, control: Point) -> CubicBez {
    CubicBez::new(start, control, control, control)
}

pub fn bezier_path(start: Point, control: Point) -> BezPath {
    let curve = bezier_curve(start, control);
    let mut path = BezPath::new();
    path.move_to(curve.p0);
    path.curve_to(curve.p1, curve.p2, curve.p3);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rectangle_extents() {
        let rect = RectGeometry::from_points(Point::new(10.0, 10.0), Point::new(50.0, 40.0));
        assert!(approx(rect.width, 40.0));
        assert!(approx(rect.height, 30.0));
        assert_eq!(rect.origin, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_rectangle_sign_preserved() {
        let rect = RectGeometry::from_points(Point::new(50.0, 40.0), Point::new(10.0, 10.0));
        assert!(approx(rect.width, -40.0));
        assert!(approx(rect.height, -30.0));
        assert_eq!(rect.corners()[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_rectangle_path_is_closed() {
        let path = RectGeometry::from_points(Point::ZERO, Point::new(5.0, 5.0)).to_path();
        assert_eq!(path.elements().len(), 5);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn test_circle_radius_345() {
        assert!(approx(circle_radius(Point::ZERO, Point::new(3.0, 4.0)), 5.0));
    }

    #[test]
    fn test_triangle_mirror_vertex() {
        let [a, b, c] = triangle_vertices(Point::ZERO, Point::new(10.0, 20.0));
        assert_eq!(a, Point::ZERO);
        assert_eq!(b, Point::new(10.0, 20.0));
        assert_eq!(c, Point::new(-10.0, 20.0));
    }

    #[test]
    fn test_diamond_midpoints() {
        let [top, right, bottom, left] = diamond_vertices(Point::new(0.0, 0.0), Point::new(20.0, 10.0));
        assert_eq!(top, Point::new(10.0, 0.0));
        assert_eq!(right, Point::new(20.0, 5.0));
        assert_eq!(bottom, Point::new(10.0, 10.0));
        assert_eq!(left, Point::new(0.0, 5.0));
    }

    #[test]
    fn test_bezier_reuses_second_point() {
        let curve = bezier_curve(Point::ZERO, Point::new(10.0, 10.0));
        assert_eq!(curve.p1, Point::new(10.0, 10.0));
        assert_eq!(curve.p2, curve.p1);
        assert_eq!(curve.p3, curve.p1);
    }

    #[test]
    fn test_empty_polygon_path() {
        assert!(polygon_path(&[]).elements().is_empty());
        assert!(polyline_path(&[]).elements().is_empty());
    }
}
