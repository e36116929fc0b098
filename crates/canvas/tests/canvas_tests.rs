//! Tests for canvas creation, drawing primitives and PNG output.

use canvas::{Canvas, CanvasError, FontSlant, FontWeight, PixelFormat};
use image::Rgba;
use std::io::{self, Write};

// ============================================================================
// Helper functions
// ============================================================================

/// Writer that fails after accepting `limit` bytes.
struct FailingWriter {
    written: usize,
    limit: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Bounding box (min_x, min_y, max_x, max_y) of all non-transparent pixels.
fn visible_bounds(canvas: &Canvas) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if canvas.pixel(x, y).map(|p| p[3] > 0).unwrap_or(false) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bounds
}

fn hello_canvas() -> Canvas {
    let mut canvas = Canvas::create(240, 80).unwrap();
    canvas.set_font("serif", FontSlant::Normal, FontWeight::Bold);
    canvas.set_font_size(32.0);
    canvas.set_color(0.0, 0.0, 1.0);
    canvas.move_to(10.0, 50.0);
    canvas.draw_text("Hello World");
    canvas
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_is_transparent() {
    let canvas = Canvas::create(240, 80).unwrap();
    assert_eq!(canvas.width(), 240);
    assert_eq!(canvas.height(), 80);
    assert_eq!(canvas.format(), PixelFormat::Argb32);
    assert_eq!(canvas.as_raw().len(), 240 * 80 * 4);
    assert!(canvas.as_raw().iter().all(|&b| b == 0));
}

#[test]
fn test_create_overflowing_size_is_allocation_error() {
    let err = Canvas::create(u32::MAX, u32::MAX).unwrap_err();
    assert!(matches!(err, CanvasError::Allocation { width, height, .. } if width == u32::MAX && height == u32::MAX));
}

#[test]
fn test_create_zero_size_is_allocation_error() {
    assert!(Canvas::create(0, 80).unwrap_err().is_allocation());
    assert!(Canvas::create(240, 0).unwrap_err().is_allocation());
}

#[test]
fn test_pixel_out_of_bounds() {
    let canvas = Canvas::create(2, 2).unwrap();
    assert_eq!(canvas.pixel(1, 1), Some(Rgba([0, 0, 0, 0])));
    assert_eq!(canvas.pixel(2, 0), None);
}

// ============================================================================
// Drawing state
// ============================================================================

#[test]
fn test_state_setters() {
    let mut canvas = Canvas::create(10, 10).unwrap();
    canvas.set_font_size(24.0);
    canvas.set_color(1.0, 0.0, 0.0);
    canvas.move_to(3.0, 4.0);

    assert_eq!(canvas.font_size(), 24.0);
    assert_eq!(canvas.color(), Rgba([255, 0, 0, 255]));
    assert_eq!(canvas.current_point(), (3.0, 4.0));

    canvas.set_font_size(f64::NAN);
    canvas.set_font_size(-1.0);
    assert_eq!(canvas.font_size(), 24.0);

    canvas.reset_state();
    assert_eq!(canvas.font_size(), 10.0);
    assert_eq!(canvas.color(), Rgba([0, 0, 0, 255]));
    assert_eq!(canvas.current_point(), (0.0, 0.0));
}

#[test]
fn test_reset_state_keeps_pixels() {
    let mut canvas = Canvas::create(4, 4).unwrap();
    canvas.set_color(0.0, 1.0, 0.0);
    canvas.fill_rect(0.0, 0.0, 4.0, 4.0);
    canvas.reset_state();
    assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 255, 0, 255])));
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn test_draw_text_lands_above_baseline() {
    let canvas = hello_canvas();
    let (min_x, min_y, max_x, max_y) = visible_bounds(&canvas).expect("text should be visible");

    assert!(min_x >= 8, "text starts at x=10, got {}", min_x);
    assert!(max_x > 100, "Hello World should be wide, got {}", max_x);
    assert!(min_y >= 10, "cap height is below 40px, got top {}", min_y);
    // No descenders in "Hello World"
    assert!(max_y <= 52, "glyphs sit on the baseline at y=50, got bottom {}", max_y);
}

#[test]
fn test_draw_text_uses_source_color() {
    let canvas = hello_canvas();
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let p = canvas.pixel(x, y).unwrap();
            if p[3] > 0 {
                // Antialiased edges vary only in alpha
                assert_eq!((p[0], p[1], p[2]), (0, 0, 255), "pure blue expected at ({}, {})", x, y);
            }
        }
    }
}

#[test]
fn test_draw_text_has_partially_transparent_edges() {
    let canvas = hello_canvas();
    let partial = (0..canvas.height())
        .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
        .filter_map(|(x, y)| canvas.pixel(x, y))
        .filter(|p| p[3] > 0 && p[3] < 255)
        .count();
    assert!(partial > 0, "text should be antialiased");
}

#[test]
fn test_draw_text_over_opaque_background() {
    let mut canvas = Canvas::create(120, 40).unwrap();
    canvas.set_color(1.0, 0.0, 0.0);
    canvas.fill_rect(0.0, 0.0, 120.0, 40.0);
    canvas.set_color(0.0, 0.0, 1.0);
    canvas.set_font_size(24.0);
    canvas.move_to(2.0, 30.0);
    canvas.draw_text("Hi");

    for y in 0..40 {
        for x in 0..120 {
            let p = canvas.pixel(x, y).unwrap();
            assert_eq!(p[3], 255);
            assert_eq!(p[1], 0);
            let sum = u16::from(p[0]) + u16::from(p[2]);
            assert!((254..=256).contains(&sum), "mix at ({}, {}) = {:?}", x, y, p);
        }
    }
}

#[test]
fn test_draw_text_advances_current_point() {
    let mut canvas = Canvas::create(240, 80).unwrap();
    canvas.set_font_size(24.0);
    canvas.move_to(10.0, 40.0);
    canvas.draw_text("12");
    let (x, y) = canvas.current_point();
    assert!(x > 20.0 && x < 60.0, "advance out of range: {}", x);
    assert_eq!(y, 40.0);
}

#[test]
fn test_draw_empty_text_is_noop() {
    let mut canvas = Canvas::create(20, 20).unwrap();
    canvas.move_to(5.0, 15.0);
    canvas.draw_text("");
    assert_eq!(canvas.current_point(), (5.0, 15.0));
    assert!(visible_bounds(&canvas).is_none());
}

#[test]
fn test_unknown_family_still_draws() {
    let mut canvas = Canvas::create(120, 40).unwrap();
    canvas.set_font("Nonexistent Family", FontSlant::Italic, FontWeight::Normal);
    canvas.set_font_size(20.0);
    canvas.move_to(2.0, 30.0);
    canvas.draw_text("abc");
    assert!(visible_bounds(&canvas).is_some());
}

#[test]
fn test_fill_rect() {
    let mut canvas = Canvas::create(10, 10).unwrap();
    canvas.set_color(1.0, 0.0, 0.0);
    canvas.fill_rect(2.0, 3.0, 4.0, 2.0);

    assert_eq!(visible_bounds(&canvas), Some((2, 3, 5, 4)));
    assert_eq!(canvas.pixel(2, 3), Some(Rgba([255, 0, 0, 255])));
}

#[test]
fn test_fill_rect_degenerate_is_noop() {
    let mut canvas = Canvas::create(10, 10).unwrap();
    canvas.fill_rect(2.0, 2.0, 0.0, 5.0);
    canvas.fill_rect(2.0, 2.0, 5.0, f64::NAN);
    assert!(visible_bounds(&canvas).is_none());
}

#[test]
fn test_fill_rect_clipped_to_canvas() {
    let mut canvas = Canvas::create(10, 10).unwrap();
    canvas.fill_rect(-5.0, -5.0, 100.0, 100.0);
    assert_eq!(visible_bounds(&canvas), Some((0, 0, 9, 9)));
}

#[test]
fn test_line_to_moves_current_point() {
    let mut canvas = Canvas::create(10, 10).unwrap();
    canvas.move_to(0.0, 5.0);
    canvas.line_to(9.0, 5.0);

    assert_eq!(canvas.current_point(), (9.0, 5.0));
    for x in 0..9 {
        assert_eq!(canvas.pixel(x, 5), Some(Rgba([0, 0, 0, 255])));
    }
    assert_eq!(canvas.pixel(0, 4), Some(Rgba([0, 0, 0, 0])));
}

#[test]
fn test_clear() {
    let mut canvas = hello_canvas();
    canvas.clear();
    assert!(visible_bounds(&canvas).is_none());
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_decodes_to_same_pixels() {
    let canvas = hello_canvas();
    let png = canvas.encode().unwrap();

    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (240, 80));
    assert_eq!(decoded.as_raw().as_slice(), canvas.as_raw());
}

#[test]
fn test_encode_is_always_rgba() {
    // IHDR color type sits at byte 25
    assert_eq!(hello_canvas().encode().unwrap()[25], 6);
    assert_eq!(Canvas::create(240, 80).unwrap().encode().unwrap()[25], 6);
}

#[test]
fn test_encode_empty_canvas() {
    let canvas = Canvas::create(240, 80).unwrap();
    let decoded = image::load_from_memory(&canvas.encode().unwrap()).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p[3] == 0));
}

#[test]
fn test_encode_is_deterministic() {
    assert_eq!(hello_canvas().encode().unwrap(), hello_canvas().encode().unwrap());
}

#[test]
fn test_encode_many_colors_round_trip() {
    let mut canvas = Canvas::create(32, 32).unwrap();
    for i in 0..32 {
        for j in 0..32 {
            canvas.set_color(i as f64 / 31.0, j as f64 / 31.0, 0.5);
            canvas.fill_rect(i as f64, j as f64, 1.0, 1.0);
        }
    }
    let decoded = image::load_from_memory(&canvas.encode().unwrap()).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw().as_slice(), canvas.as_raw());
}

#[test]
fn test_encode_to_failing_writer() {
    let canvas = hello_canvas();
    let mut writer = FailingWriter { written: 0, limit: 20 };
    let err = canvas.encode_to(&mut writer).unwrap_err();
    assert!(err.is_encoding());
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn test_write_png_matches_encode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.png");
    let canvas = hello_canvas();

    canvas.write_png(&path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, canvas.encode().unwrap());
}

#[test]
fn test_write_png_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("hello.png");
    let err = hello_canvas().write_png(&path).unwrap_err();
    assert!(err.is_encoding());
}

#[test]
fn test_dispose() {
    let canvas = hello_canvas();
    canvas.dispose();
}
