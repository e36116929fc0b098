//! The drawing surface.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CanvasError, CanvasResult};
use crate::font::{self, FontFace, FontSlant, FontWeight};
use crate::png;
use rusttype::point;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel layout of a canvas.
///
/// Only one format exists: 32 bits per pixel with an 8-bit alpha channel.
/// Samples are stored straight (not premultiplied) in R, G, B, A byte order,
/// which is what PNG color type 6 expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Argb32,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Argb32 => 4,
        }
    }
}

/// Mutable drawing state of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub face: FontFace,
    /// Em size in pixels
    pub font_size: f64,
    pub color: Rgba<u8>,
    /// Current point; text baselines start here
    pub point: (f64, f64),
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            face: FontFace::default(),
            font_size: 10.0,
            color: Rgba([0, 0, 0, 255]),
            point: (0.0, 0.0),
        }
    }
}

/// One image in progress.
///
/// Drawing calls mutate the pixel buffer immediately. A canvas is owned by a
/// single render and is never shared between threads while drawing.
pub struct Canvas {
    image: RgbaImage,
    state: DrawState,
}

impl Canvas {
    /// Create a canvas with a fully transparent pixel buffer.
    ///
    /// The buffer is reserved fallibly, so an impossible size is reported as
    /// [`CanvasError::Allocation`] instead of aborting the process.
    pub fn create(width: u32, height: u32) -> CanvasResult<Self> {
        let pixels = allocate_pixels(width, height)?;
        let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| CanvasError::Allocation {
            width,
            height,
            reason: "pixel buffer does not match dimensions".to_string(),
        })?;

        tracing::trace!(width, height, "Canvas created");
        Ok(Self {
            image,
            state: DrawState::default(),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat::Argb32
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn current_point(&self) -> (f64, f64) {
        self.state.point
    }

    pub fn font_size(&self) -> f64 {
        self.state.font_size
    }

    pub fn color(&self) -> Rgba<u8> {
        self.state.color
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    // ------------------------------------------------------------------
    // Drawing state
    // ------------------------------------------------------------------

    pub fn set_font(&mut self, family: &str, slant: FontSlant, weight: FontWeight) {
        self.state.face = FontFace::new(family, slant, weight);
    }

    /// Set the em size in pixels. Non-finite or negative sizes are ignored.
    pub fn set_font_size(&mut self, size: f64) {
        if size.is_finite() && size >= 0.0 {
            self.state.font_size = size;
        }
    }

    /// Set an opaque source color from components in `0.0..=1.0`.
    pub fn set_color(&mut self, r: f64, g: f64, b: f64) {
        self.set_color_rgba(r, g, b, 1.0);
    }

    pub fn set_color_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.state.color = Rgba([channel(r), channel(g), channel(b), channel(a)]);
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.state.point = (x, y);
    }

    /// Restore the default drawing state. Pixels are untouched.
    pub fn reset_state(&mut self) {
        self.state = DrawState::default();
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Draw `text` with its baseline at the current point, then advance the
    /// current point by the text's width.
    pub fn draw_text(&mut self, text: &str) {
        if text.is_empty() || self.state.font_size == 0.0 {
            return;
        }
        let Some(font) = font::resolve(self.state.face) else {
            tracing::warn!(face = ?self.state.face, "No font available, skipping text");
            return;
        };

        let scale = font::em_scale(font, self.state.font_size as f32);
        let (x, y) = self.state.point;
        let origin = point(x.round() as f32, y.round() as f32);
        let (width, height) = (self.width() as i32, self.height() as i32);
        let color = self.state.color;

        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                let dst = self.image.get_pixel_mut(px as u32, py as u32);
                *dst = blend_over(*dst, color, coverage);
            });
        }

        self.state.point.0 += f64::from(font::advance_width(font, scale, text));
    }

    /// Stroke a one-pixel line from the current point to `(x, y)` and make
    /// `(x, y)` the current point.
    pub fn line_to(&mut self, x: f64, y: f64) {
        let (x0, y0) = self.state.point;
        draw_line_segment_mut(
            &mut self.image,
            (x0 as f32, y0 as f32),
            (x as f32, y as f32),
            self.state.color,
        );
        self.state.point = (x, y);
    }

    /// Fill an axis-aligned rectangle with the current color. Rectangles
    /// smaller than one pixel in either direction draw nothing.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !(width >= 1.0 && height >= 1.0) {
            return;
        }
        let rect = Rect::at(x.round() as i32, y.round() as i32)
            .of_size(width.round() as u32, height.round() as u32);
        draw_filled_rect_mut(&mut self.image, rect, self.state.color);
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = TRANSPARENT;
        }
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Serialize the pixel buffer as PNG.
    pub fn encode(&self) -> CanvasResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.as_raw().len() / 8);
        self.encode_to(&mut out)?;
        Ok(out)
    }

    /// Serialize the pixel buffer as PNG into `writer`.
    pub fn encode_to<W: Write>(&self, writer: &mut W) -> CanvasResult<()> {
        png::encode_rgba(writer, self.as_raw(), self.width(), self.height())?;
        Ok(())
    }

    /// Write the PNG to a file, creating or truncating it.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> CanvasResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.encode_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Release the pixel buffer.
    pub fn dispose(self) {
        tracing::trace!(width = self.width(), height = self.height(), "Canvas disposed");
        drop(self);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format())
            .field("state", &self.state)
            .finish()
    }
}

fn allocate_pixels(width: u32, height: u32) -> CanvasResult<Vec<u8>> {
    let fail = |reason: String| CanvasError::Allocation { width, height, reason };

    if width == 0 || height == 0 {
        return Err(fail("dimensions must be non-zero".to_string()));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(PixelFormat::Argb32.bytes_per_pixel()))
        .ok_or_else(|| fail("pixel buffer size overflows".to_string()))?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|e| fail(e.to_string()))?;
    pixels.resize(len, 0);
    Ok(pixels)
}

/// Composite `src` at `coverage` over `dst`, both with straight alpha.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let sa = coverage.clamp(0.0, 1.0) * f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if (out_a * 255.0).round() == 0.0 {
        return dst;
    }

    let mix = |s: u8, d: u8| {
        let v = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_conversion() {
        assert_eq!(channel(0.0), 0);
        assert_eq!(channel(1.0), 255);
        assert_eq!(channel(0.5), 128);
        assert_eq!(channel(-3.0), 0);
        assert_eq!(channel(7.0), 255);
        assert_eq!(channel(f64::NAN), 0);
    }

    #[test]
    fn test_blend_over_transparent_keeps_source_color() {
        let blue = Rgba([0, 0, 255, 255]);
        assert_eq!(blend_over(TRANSPARENT, blue, 0.25), Rgba([0, 0, 255, 64]));
        assert_eq!(blend_over(TRANSPARENT, blue, 1.0), blue);
        assert_eq!(blend_over(TRANSPARENT, blue, 0.0), TRANSPARENT);
        assert_eq!(blend_over(TRANSPARENT, blue, 0.001), TRANSPARENT);
    }

    #[test]
    fn test_blend_over_opaque_mixes_color() {
        let red = Rgba([255, 0, 0, 255]);
        let blue = Rgba([0, 0, 255, 255]);
        assert_eq!(blend_over(red, blue, 0.5), Rgba([128, 0, 128, 255]));
    }

    #[test]
    fn test_blend_over_partial_destination() {
        let half_blue = Rgba([0, 0, 255, 128]);
        let out = blend_over(half_blue, Rgba([0, 0, 255, 255]), 0.5);
        assert_eq!((out[0], out[1], out[2]), (0, 0, 255));
        assert!(out[3] > 128 && out[3] < 255);
    }

    #[test]
    fn test_allocate_pixels_sizes() {
        assert_eq!(allocate_pixels(3, 2).unwrap().len(), 24);
        assert!(allocate_pixels(0, 2).unwrap_err().is_allocation());
        assert!(allocate_pixels(u32::MAX, u32::MAX).unwrap_err().is_allocation());
    }

    #[test]
    fn test_default_state() {
        let state = DrawState::default();
        assert_eq!(state.font_size, 10.0);
        assert_eq!(state.color, Rgba([0, 0, 0, 255]));
        assert_eq!(state.point, (0.0, 0.0));
        assert_eq!(state.face, FontFace::default());
    }

    #[test]
    fn test_debug_omits_pixels() {
        let canvas = Canvas::create(4, 4).unwrap();
        let text = format!("{:?}", canvas);
        assert!(text.contains("width: 4"));
        assert!(text.len() < 400);
    }
}
