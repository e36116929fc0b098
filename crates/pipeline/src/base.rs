//! The fixed drawing every render starts from.

use canvas::{Canvas, FontSlant, FontWeight};

pub const BASE_TEXT: &str = "Hello World";
pub const BASE_FONT_FAMILY: &str = "serif";
pub const BASE_FONT_SIZE: f64 = 32.0;
/// Baseline origin of the base text
pub const BASE_ORIGIN: (f64, f64) = (10.0, 50.0);

/// Draw blue bold serif "Hello World" with its baseline at (10, 50).
pub fn draw_base(canvas: &mut Canvas) {
    canvas.set_font(BASE_FONT_FAMILY, FontSlant::Normal, FontWeight::Bold);
    canvas.set_font_size(BASE_FONT_SIZE);
    canvas.set_color(0.0, 0.0, 1.0);
    canvas.move_to(BASE_ORIGIN.0, BASE_ORIGIN.1);
    canvas.draw_text(BASE_TEXT);
}
