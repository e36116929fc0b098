//! Instrumented drawing plugins.
//!
//! Every plugin here appends its name to a shared [`CallLog`] when painted,
//! so tests can check which plugins ran and in what order.

use canvas::Canvas;
use pipeline::{DrawingPlugin, PaintError};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of paint calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(name.to_string());
    }

    /// Names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.calls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

/// Records the call and draws nothing.
pub struct RecordingPlugin {
    name: String,
    log: CallLog,
}

impl RecordingPlugin {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

impl DrawingPlugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn paint(&self, _canvas: &mut Canvas) -> Result<(), PaintError> {
        self.log.record(&self.name);
        Ok(())
    }
}

/// Does nothing at all, not even logging.
pub struct NoopPlugin;

impl DrawingPlugin for NoopPlugin {
    fn name(&self) -> &str {
        "noop"
    }

    fn paint(&self, _canvas: &mut Canvas) -> Result<(), PaintError> {
        Ok(())
    }
}

/// Records the call, optionally draws a red mark, then fails.
pub struct FailingPlugin {
    name: String,
    log: CallLog,
    draw_first: bool,
}

impl FailingPlugin {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            draw_first: false,
        }
    }

    /// Fill a red square at the top-left corner before failing.
    pub fn drawing_first(mut self) -> Self {
        self.draw_first = true;
        self
    }
}

impl DrawingPlugin for FailingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError> {
        self.log.record(&self.name);
        if self.draw_first {
            canvas.set_color(1.0, 0.0, 0.0);
            canvas.fill_rect(0.0, 0.0, 4.0, 4.0);
        }
        Err(PaintError::failed(format!("{} always fails", self.name)))
    }
}

/// Records the call and fills a small rectangle with a fixed color.
pub struct MarkerPlugin {
    name: String,
    log: CallLog,
    rect: (f64, f64, f64, f64),
    rgb: (f64, f64, f64),
}

impl MarkerPlugin {
    pub fn new(name: &str, log: &CallLog, rect: (f64, f64, f64, f64), rgb: (f64, f64, f64)) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            rect,
            rgb,
        }
    }
}

impl DrawingPlugin for MarkerPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError> {
        self.log.record(&self.name);
        let (r, g, b) = self.rgb;
        let (x, y, w, h) = self.rect;
        canvas.set_color(r, g, b);
        canvas.fill_rect(x, y, w, h);
        Ok(())
    }
}

/// Records the drawing state it was handed, then scribbles over it.
pub struct StateProbePlugin {
    name: String,
    log: CallLog,
    seen: Arc<Mutex<Vec<canvas::DrawState>>>,
}

impl StateProbePlugin {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            seen: Arc::default(),
        }
    }

    pub fn seen(&self) -> Arc<Mutex<Vec<canvas::DrawState>>> {
        Arc::clone(&self.seen)
    }
}

impl DrawingPlugin for StateProbePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn paint(&self, canvas: &mut Canvas) -> Result<(), PaintError> {
        self.log.record(&self.name);
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(*canvas.state());
        canvas.set_font_size(99.0);
        canvas.set_color(0.0, 1.0, 0.0);
        canvas.move_to(123.0, 45.0);
        Ok(())
    }
}
