//! RasterPad Render Library
//!
//! CPU raster backend for the drawing engine, built on tiny-skia, plus
//! flattening and image encoding of canvas snapshots.

pub mod export;
mod pixmap;
mod renderer;

pub use export::{DEFAULT_JPEG_QUALITY, ExportFormat, ExportJob, encode, flatten_rgb};
pub use pixmap::{PixmapSnapshot, PixmapSurface};
pub use renderer::{RenderResult, RendererError};
