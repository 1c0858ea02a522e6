//! Pixel surface abstraction the session draws on.

use kurbo::{BezPath, Stroke};
use peniko::Color;

/// A mutable raster canvas with cheap full-surface snapshots.
///
/// Implementations can be CPU pixmaps, browser canvases, or test doubles.
/// Snapshots are full copies: restoring one must reproduce the captured
/// pixels exactly.
pub trait RasterSurface {
    /// Full-canvas pixel capture.
    type Snapshot: Clone;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Copy the current pixels.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the pixels with a snapshot. Returns false (and leaves the
    /// surface untouched) when the snapshot's dimensions differ.
    fn restore(&mut self, snapshot: &Self::Snapshot) -> bool;

    /// Overwrite every pixel with `color`.
    fn fill(&mut self, color: Color);

    /// Change dimensions. Contents are discarded. Returns false if the
    /// size cannot be represented.
    fn resize(&mut self, width: u32, height: u32) -> bool;

    /// Fill a path (non-zero winding).
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke a path.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Surface double whose "pixels" are the list of drawing operations.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Fill(Color),
        FillPath(BezPath, Color),
        StrokePath(BezPath, f64, Color),
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct OpSnapshot {
        pub width: u32,
        pub height: u32,
        pub ops: Vec<Op>,
    }

    #[derive(Debug, Clone)]
    pub struct RecordingSurface {
        width: u32,
        height: u32,
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        pub fn stroke_count(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::StrokePath(..)))
                .count()
        }

        pub fn fill_path_count(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::FillPath(..)))
                .count()
        }
    }

    impl RasterSurface for RecordingSurface {
        type Snapshot = OpSnapshot;

        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn snapshot(&self) -> OpSnapshot {
            OpSnapshot {
                width: self.width,
                height: self.height,
                ops: self.ops.clone(),
            }
        }

        fn restore(&mut self, snapshot: &OpSnapshot) -> bool {
            if snapshot.width != self.width || snapshot.height != self.height {
                return false;
            }
            self.ops = snapshot.ops.clone();
            true
        }

        fn fill(&mut self, color: Color) {
            self.ops.clear();
            self.ops.push(Op::Fill(color));
        }

        fn resize(&mut self, width: u32, height: u32) -> bool {
            if width == 0 || height == 0 {
                return false;
            }
            self.width = width;
            self.height = height;
            self.ops.clear();
            true
        }

        fn fill_path(&mut self, path: &BezPath, color: Color) {
            self.ops.push(Op::FillPath(path.clone(), color));
        }

        fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
            self.ops.push(Op::StrokePath(path.clone(), stroke.width, color));
        }
    }
}
