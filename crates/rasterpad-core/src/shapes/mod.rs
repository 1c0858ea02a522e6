//! Committed drawing items: parametric shapes and freehand strokes.

mod freehand;
pub mod primitives;

pub use freehand::FreehandStroke;
pub use primitives::RectGeometry;

use kurbo::{BezPath, Cap, Join, Point, Stroke};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for committed items.
pub type ItemId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Scale alpha by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }

    /// Parse a CSS-style color as produced by color pickers and computed styles.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` and the names `black` / `white`.
    pub fn parse(input: &str) -> Option<Self> {
        let color = input.trim().to_ascii_lowercase();

        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = color.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            return parse_channels(args, true);
        }
        if let Some(args) = color.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            return parse_channels(args, false);
        }
        match color.as_str() {
            "black" => Some(Self::black()),
            "white" => Some(Self::white()),
            "transparent" => Some(Self::transparent()),
            _ => None,
        }
    }
}

fn parse_hex(hex: &str) -> Option<SerializableColor> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        3 => {
            // #rgb -> #rrggbb
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            Some(SerializableColor::new(r, g, b, 255))
        }
        6 => Some(SerializableColor::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
        8 => Some(SerializableColor::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

fn parse_channels(args: &str, with_alpha: bool) -> Option<SerializableColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = if with_alpha {
        let alpha = parts[3].parse::<f64>().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        (alpha * 255.0).round() as u8
    } else {
        255
    };
    Some(SerializableColor::new(r, g, b, a))
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Parametric shape variants (the shape subset of the tools).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Line,
    Diamond,
    Bezier,
}

impl ShapeKind {
    /// Lines and curves are always stroked.
    pub fn supports_fill(self) -> bool {
        match self {
            ShapeKind::Rectangle | ShapeKind::Circle | ShapeKind::Triangle | ShapeKind::Diamond => true,
            ShapeKind::Line | ShapeKind::Bezier => false,
        }
    }
}

/// Style captured for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke or fill color.
    pub color: SerializableColor,
    /// Stroke width.
    pub width: f64,
    /// Fill instead of stroke (ignored by kinds that cannot be filled).
    #[serde(default)]
    pub filled: bool,
}

impl ShapeStyle {
    /// Get the color as a peniko Color.
    pub fn color(&self) -> Color {
        self.color.into()
    }

    /// Outline stroke: butt caps, mitered joins.
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 5.0,
            filled: false,
        }
    }
}

/// A committed parametric shape. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ItemId,
    kind: ShapeKind,
    anchor: Point,
    endpoint: Point,
    style: ShapeStyle,
}

impl Shape {
    pub fn new(kind: ShapeKind, anchor: Point, endpoint: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            anchor,
            endpoint,
            style,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn endpoint(&self) -> Point {
        self.endpoint
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Whether this shape renders as a fill.
    pub fn is_filled(&self) -> bool {
        self.style.filled && self.kind.supports_fill()
    }

    /// Offset rectangle for `Rectangle` shapes.
    pub fn rect_geometry(&self) -> Option<RectGeometry> {
        (self.kind == ShapeKind::Rectangle)
            .then(|| RectGeometry::from_points(self.anchor, self.endpoint))
    }

    /// Radius for `Circle` shapes.
    pub fn radius(&self) -> Option<f64> {
        (self.kind == ShapeKind::Circle)
            .then(|| primitives::circle_radius(self.anchor, self.endpoint))
    }

    /// Corner points of polygonal shapes in drawing order.
    pub fn vertices(&self) -> Vec<Point> {
        match self.kind {
            ShapeKind::Rectangle => RectGeometry::from_points(self.anchor, self.endpoint)
                .corners()
                .to_vec(),
            ShapeKind::Triangle => primitives::triangle_vertices(self.anchor, self.endpoint).to_vec(),
            ShapeKind::Diamond => primitives::diamond_vertices(self.anchor, self.endpoint).to_vec(),
            ShapeKind::Line | ShapeKind::Bezier => vec![self.anchor, self.endpoint],
            ShapeKind::Circle => Vec::new(),
        }
    }

    /// Get the path representation for rendering.
    pub fn to_path(&self) -> BezPath {
        match self.kind {
            ShapeKind::Rectangle => RectGeometry::from_points(self.anchor, self.endpoint).to_path(),
            ShapeKind::Circle => primitives::circle_path(self.anchor, self.endpoint),
            ShapeKind::Triangle => {
                primitives::polygon_path(&primitives::triangle_vertices(self.anchor, self.endpoint))
            }
            ShapeKind::Line => primitives::line_path(self.anchor, self.endpoint),
            ShapeKind::Diamond => {
                primitives::polygon_path(&primitives::diamond_vertices(self.anchor, self.endpoint))
            }
            ShapeKind::Bezier => primitives::bezier_path(self.anchor, self.endpoint),
        }
    }
}
