//! Plugin-composed image rendering.
//!
//! A [`RenderPipeline`] owns a [`PluginRegistry`] of [`DrawingPlugin`]s. Each
//! call to [`RenderPipeline::render`]:
//! - creates a fresh canvas
//! - applies the fixed base drawing
//! - hands the canvas to every plugin in registration order, stopping at the
//!   first failure
//! - encodes the canvas as PNG
//!
//! The canvas is disposed on every path. Plugins are shared by all renders,
//! so any state they keep must be synchronized by the plugin itself.

pub mod base;
pub mod error;
pub mod pipeline;
pub mod plugin;
pub mod registry;
pub mod stats;

pub use base::draw_base;
pub use error::RenderError;
pub use pipeline::{OutputMode, RenderPipeline, RenderStage, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use plugin::{DrawingPlugin, PaintError};
pub use registry::PluginRegistry;
pub use stats::{RenderStats, RenderStatsSnapshot};

// Plugins receive the canvas type from here.
pub use canvas::{Canvas, FontSlant, FontWeight};
