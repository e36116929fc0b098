//! Error types for canvas operations.

use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Failures surfaced by a canvas. Drawing primitives are infallible; only
/// creation and serialization can fail.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Failed to allocate {width}x{height} canvas: {reason}")]
    Allocation {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] std::io::Error),
}

impl CanvasError {
    pub fn is_allocation(&self) -> bool {
        matches!(self, CanvasError::Allocation { .. })
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, CanvasError::Encoding(_))
    }
}
