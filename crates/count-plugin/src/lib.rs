//! A drawing plugin that counts its own invocations.
//!
//! Every paint call increments a process-wide counter and draws the new value
//! in the top-right area of the canvas. The counter starts at zero when the
//! plugin is created and is never reset.

use pipeline::{Canvas, DrawingPlugin, FontSlant, FontWeight, PaintError};
use std::sync::atomic::{AtomicU64, Ordering};

pub const PLUGIN_NAME: &str = "count-plugin";

pub const COUNT_FONT_FAMILY: &str = "serif";
pub const COUNT_FONT_SIZE: f64 = 24.0;
/// Baseline origin of the counter text
pub const COUNT_ORIGIN: (f64, f64) = (200.0, 20.0);

#[derive(Debug)]
pub struct CountPlugin {
    count: AtomicU64,
}

impl CountPlugin {
    pub fn new() -> Self {
        tracing::info!("initializing count-plugin");
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Number of paint calls so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Increment and return the new value in one step, so concurrent renders
    /// each see a distinct value.
    fn next(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for CountPlugin {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw `value` the way [`CountPlugin`] does.
pub fn draw_count(canvas: &mut Canvas, value: u64) {
    canvas.set_font(COUNT_FONT_FAMILY, FontSlant::Normal, FontWeight::Bold);
    canvas.set_font_size(COUNT_FONT_SIZE);
    canvas.set_color(0.0, 0.0, 1.0);
    canvas.move_to(COUNT_ORIGIN.0, COUNT_ORIGIN.1);
    canvas.draw_text(&value.to_string());
}

impl DrawingPlugin for CountPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError> {
        let value = self.next();
        tracing::trace!(value, "Painting count");
        draw_count(canvas, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(CountPlugin::new().count(), 0);
    }

    #[test]
    fn test_next_increments() {
        let plugin = CountPlugin::default();
        assert_eq!(plugin.next(), 1);
        assert_eq!(plugin.next(), 2);
        assert_eq!(plugin.count(), 2);
    }

    #[test]
    fn test_paint_draws_near_origin() {
        let plugin = CountPlugin::new();
        let mut canvas = Canvas::create(240, 80).unwrap();
        plugin.paint(&mut canvas).unwrap();

        let mut visible = 0;
        for y in 0..80 {
            for x in 0..240 {
                if canvas.pixel(x, y).map(|p| p[3] > 0).unwrap_or(false) {
                    visible += 1;
                    assert!(x >= 198, "count drawn left of its origin at x={}", x);
                    assert!(y <= 22, "count drawn below its baseline at y={}", y);
                }
            }
        }
        assert!(visible > 0);
        assert_eq!(plugin.count(), 1);
    }
}
