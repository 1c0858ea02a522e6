//! Renderer error types.

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<png::EncodingError> for RendererError {
    fn from(err: png::EncodingError) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<image::ImageError> for RendererError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;
