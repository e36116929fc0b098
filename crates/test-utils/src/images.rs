//! PNG decoding and pixel inspection helpers.

use canvas::Canvas;
use image::RgbaImage;
use pipeline::draw_base;

/// Decode PNG bytes, panicking with a readable message on failure.
pub fn decode_png(png: &[u8]) -> RgbaImage {
    match image::load_from_memory(png) {
        Ok(img) => img.to_rgba8(),
        Err(e) => panic!("PNG failed to decode: {}", e),
    }
}

/// Number of pixels with non-zero alpha.
pub fn visible_pixel_count(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| p[3] > 0).count()
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of pixels with non-zero alpha.
pub fn visible_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| p[3] > 0)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

/// Render the base drawing plus `extra` onto a fresh 240x80 canvas and encode
/// it. Pipeline output can be compared against this byte for byte.
pub fn reference_png<F>(extra: F) -> Vec<u8>
where
    F: FnOnce(&mut Canvas),
{
    let mut canvas = match Canvas::create(pipeline::CANVAS_WIDTH, pipeline::CANVAS_HEIGHT) {
        Ok(canvas) => canvas,
        Err(e) => panic!("reference canvas: {}", e),
    };
    draw_base(&mut canvas);
    canvas.reset_state();
    extra(&mut canvas);
    match canvas.encode() {
        Ok(png) => png,
        Err(e) => panic!("reference encode: {}", e),
    }
}
