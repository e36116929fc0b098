//! Raster drawing surface used by the render pipeline.
//!
//! A [`Canvas`] is a fixed-size 32-bit image with a small amount of mutable
//! drawing state (font face, font size, color, current point). Drawing calls
//! land on the pixel buffer immediately; [`Canvas::encode`] serializes the
//! result as PNG.

pub mod canvas;
pub mod error;
pub mod font;
pub mod png;

pub use canvas::{Canvas, DrawState, PixelFormat};
pub use error::{CanvasError, CanvasResult};
pub use font::{FontFace, FontFamily, FontSlant, FontWeight};
