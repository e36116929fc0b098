//! The render pipeline.

use canvas::{Canvas, CanvasError};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use tracing::{debug, trace, warn};

use crate::base::draw_base;
use crate::error::RenderError;
use crate::registry::PluginRegistry;
use crate::stats::{RenderStats, RenderStatsSnapshot};

pub const CANVAS_WIDTH: u32 = 240;
pub const CANVAS_HEIGHT: u32 = 80;

/// How the finished canvas becomes PNG bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Encode straight into memory.
    #[default]
    Memory,
    /// Write the PNG to a temporary file and read it back. The file is
    /// removed afterwards. See [`RenderPipeline::with_temp_dir`].
    TempFile,
}

/// Where a render is. `Aborted` is terminal and reachable from creation, any
/// plugin, or encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Created,
    BaseDrawn,
    /// 1-based plugin position
    Plugin(usize),
    Encoded,
    Disposed,
    Aborted,
}

/// Sequences base drawing, plugins and encoding for each render.
///
/// The registry is owned by the pipeline, so its order is fixed once the
/// pipeline exists. A pipeline can be shared (`Arc`) between threads; every
/// render gets its own canvas.
#[derive(Debug)]
pub struct RenderPipeline {
    registry: PluginRegistry,
    width: u32,
    height: u32,
    output_mode: OutputMode,
    /// Directory for [`OutputMode::TempFile`]; the system default when unset
    temp_dir: Option<PathBuf>,
    stats: RenderStats,
}

impl RenderPipeline {
    /// Pipeline producing 240x80 images.
    pub fn new(registry: PluginRegistry) -> Self {
        Self::with_dimensions(registry, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Pipeline with non-standard canvas dimensions.
    pub fn with_dimensions(registry: PluginRegistry, width: u32, height: u32) -> Self {
        Self {
            registry,
            width,
            height,
            output_mode: OutputMode::default(),
            temp_dir: None,
            stats: RenderStats::default(),
        }
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    pub fn with_temp_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn stats(&self) -> RenderStatsSnapshot {
        self.stats.snapshot()
    }

    /// Render one image.
    ///
    /// Returns the PNG bytes, or the first error met. The canvas is disposed
    /// exactly once whether or not the render succeeds.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        self.stats.renders_started.fetch_add(1, Ordering::Relaxed);

        let result = self.run();
        match &result {
            Ok(png) => {
                self.stats.renders_succeeded.fetch_add(1, Ordering::Relaxed);
                debug!(bytes = png.len(), "Render complete");
            }
            Err(e) => {
                self.stats.renders_failed.fetch_add(1, Ordering::Relaxed);
                warn!(stage = ?RenderStage::Aborted, code = e.error_code(), error = %e, "Render aborted");
            }
        }
        result
    }

    fn run(&self) -> Result<Vec<u8>, RenderError> {
        let mut canvas = Canvas::create(self.width, self.height).map_err(RenderError::Allocation)?;
        let disposal = DisposalRecord::new(&self.stats);
        trace!(stage = ?RenderStage::Created, width = self.width, height = self.height);

        // No early return between here and dispose.
        let result = self.draw_and_encode(&mut canvas);
        disposal.dispose(canvas);
        trace!(stage = ?RenderStage::Disposed);
        result
    }

    fn draw_and_encode(&self, canvas: &mut Canvas) -> Result<Vec<u8>, RenderError> {
        draw_base(canvas);
        trace!(stage = ?RenderStage::BaseDrawn);

        for (index, plugin) in self.registry.list().iter().enumerate() {
            let position = index + 1;
            canvas.reset_state();
            plugin.paint(canvas).map_err(|source| RenderError::Paint {
                plugin: plugin.name().to_string(),
                position,
                source,
            })?;
            trace!(stage = ?RenderStage::Plugin(position), plugin = plugin.name());
        }

        let png = self.encode(canvas).map_err(RenderError::Encoding)?;
        trace!(stage = ?RenderStage::Encoded, bytes = png.len());
        Ok(png)
    }

    fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>, CanvasError> {
        match self.output_mode {
            OutputMode::Memory => canvas.encode(),
            OutputMode::TempFile => {
                let mut builder = tempfile::Builder::new();
                builder.prefix("render-").suffix(".png");
                let file = match &self.temp_dir {
                    Some(dir) => builder.tempfile_in(dir)?,
                    None => builder.tempfile()?,
                };
                canvas.write_png(file.path())?;
                let png = std::fs::read(file.path())?;
                Ok(png)
            }
        }
    }
}

/// Counts a canvas as created now and as disposed by [`dispose`](Self::dispose).
///
/// A record dropped without `dispose` only counts when the thread is
/// unwinding out of a panicking plugin, where the canvas is dropped alongside
/// it.
struct DisposalRecord<'a> {
    stats: &'a RenderStats,
    disposed: bool,
}

impl<'a> DisposalRecord<'a> {
    fn new(stats: &'a RenderStats) -> Self {
        stats.canvases_created.fetch_add(1, Ordering::Relaxed);
        Self {
            stats,
            disposed: false,
        }
    }

    fn dispose(mut self, canvas: Canvas) {
        canvas.dispose();
        self.mark_disposed();
    }

    fn mark_disposed(&mut self) {
        self.disposed = true;
        self.stats.canvases_disposed.fetch_add(1, Ordering::Relaxed);
    }
}

impl Drop for DisposalRecord<'_> {
    fn drop(&mut self) {
        if !self.disposed && std::thread::panicking() {
            self.mark_disposed();
        }
    }
}
