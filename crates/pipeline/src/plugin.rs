//! The drawing plugin contract.

use canvas::Canvas;
use std::sync::Arc;
use thiserror::Error;

/// Reason a plugin could not complete its drawing.
///
/// Drawing already applied to the canvas before the error is not rolled back,
/// and neither is any change the plugin made to its own state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    #[error("declined to paint: {0}")]
    Declined(String),

    #[error("failed to paint: {0}")]
    Failed(String),
}

impl PaintError {
    pub fn declined(reason: impl Into<String>) -> Self {
        PaintError::Declined(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        PaintError::Failed(reason.into())
    }
}

/// A unit that paints onto the shared canvas of a render.
///
/// One instance is created at startup and serves every render, including
/// concurrent ones, so `paint` takes `&self`. Plugins that keep state across
/// calls must guard it themselves (an atomic, or a lock held only while the
/// state is read and updated, not while drawing).
///
/// The drawing state (font, color, current point) is reset before each plugin
/// runs; only pixels already on the canvas are visible from earlier steps.
pub trait DrawingPlugin: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Draw onto `canvas` and update private state.
    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError>;
}

impl<P: DrawingPlugin + ?Sized> DrawingPlugin for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError> {
        (**self).paint(canvas)
    }
}

impl<P: DrawingPlugin + ?Sized> DrawingPlugin for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError> {
        (**self).paint(canvas)
    }
}
