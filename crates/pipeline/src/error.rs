//! Render failures.

use canvas::CanvasError;
use thiserror::Error;

use crate::plugin::PaintError;

/// Why a render produced no image.
///
/// Each variant aborts only the render it happened in.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Canvas allocation failed: {0}")]
    Allocation(#[source] CanvasError),

    #[error("Plugin '{plugin}' at position {position} failed: {source}")]
    Paint {
        plugin: String,
        /// 1-based position in the registry
        position: usize,
        #[source]
        source: PaintError,
    },

    #[error("Canvas encoding failed: {0}")]
    Encoding(#[source] CanvasError),
}

impl RenderError {
    /// Stable identifier for responses and metrics labels.
    pub fn error_code(&self) -> &'static str {
        match self {
            RenderError::Allocation(_) => "AllocationError",
            RenderError::Paint { .. } => "PaintError",
            RenderError::Encoding(_) => "EncodingError",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            RenderError::Allocation(_) => 503,
            RenderError::Paint { .. } | RenderError::Encoding(_) => 500,
        }
    }
}
