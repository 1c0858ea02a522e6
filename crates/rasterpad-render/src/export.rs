//! Flattening and encoding canvas snapshots.

use crate::pixmap::PixmapSnapshot;
use crate::renderer::{RenderResult, RendererError};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg { quality: u8 },
}

impl ExportFormat {
    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`).
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            _ => Err(RendererError::Export(format!(
                "unsupported export extension: {}",
                path.display()
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

/// Composite a snapshot over opaque white and drop the alpha channel.
pub fn flatten_rgb(snapshot: &PixmapSnapshot) -> RenderResult<RgbImage> {
    // Premultiplied over white: c + 255 * (1 - a) per channel.
    let rgb: Vec<u8> = snapshot
        .data()
        .chunks_exact(4)
        .flat_map(|px| {
            let cover = 255 - px[3];
            [px[0].saturating_add(cover), px[1].saturating_add(cover), px[2].saturating_add(cover)]
        })
        .collect();
    RgbImage::from_raw(snapshot.width(), snapshot.height(), rgb)
        .ok_or_else(|| RendererError::Export("pixel buffer does not match snapshot size".into()))
}

/// Encode a snapshot as an image file.
pub fn encode(snapshot: &PixmapSnapshot, format: ExportFormat) -> RenderResult<Vec<u8>> {
    let rgb = flatten_rgb(snapshot)?;
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => {
            let mut encoder = png::Encoder::new(&mut bytes, rgb.width(), rgb.height());
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(rgb.as_raw())?;
            writer.finish()?;
        }
        ExportFormat::Jpeg { quality } => {
            JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).encode_image(&rgb)?;
        }
    }
    log::debug!("Encoded {:?}: {} bytes", format, bytes.len());
    Ok(bytes)
}

/// Encoding running on a worker thread. The job owns its snapshot, so
/// drawing can go on while it runs.
pub struct ExportJob {
    format: ExportFormat,
    receiver: Receiver<RenderResult<Vec<u8>>>,
}

impl ExportJob {
    pub fn spawn(snapshot: PixmapSnapshot, format: ExportFormat) -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let result = encode(&snapshot, format);
            if sender.send(result).is_err() {
                log::debug!("Export job dropped before encoding finished");
            }
        });
        Self { format, receiver }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Block until the encoded bytes are ready.
    pub fn wait(self) -> RenderResult<Vec<u8>> {
        self.receiver
            .recv()
            .map_err(|_| RendererError::Export("export worker exited without a result".into()))?
    }

    /// Non-blocking poll. `None` while the worker is still encoding.
    pub fn try_result(&self) -> Option<RenderResult<Vec<u8>>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(RendererError::Export(
                "export worker exited without a result".into(),
            ))),
        }
    }
}
